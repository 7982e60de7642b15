//! Implement command - Execute the next workflow step for a change request

use std::path::Path;

use crate::errors::Result;

use super::GlobalOptions;

/// Execute the next step, or reset the workflow when `reset` is set.
///
/// An already-complete workflow is a success.
pub fn run(options: &GlobalOptions, change_request: &Path, reset: bool) -> Result<()> {
    let runner = options.runner()?;
    let change_request = options.resolve_path(change_request);

    let outcome = runner.run(&change_request, reset)?;
    tracing::debug!(?outcome, "implement finished");
    Ok(())
}
