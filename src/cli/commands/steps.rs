//! Steps command - List the configured workflow steps

use crate::errors::{Result, StepwiseError};

use super::GlobalOptions;

/// Print the workflow's steps in execution order
pub fn run(options: &GlobalOptions, json: bool) -> Result<()> {
    let runner = options.runner()?;
    let steps = runner.manager().definition().steps();

    if json {
        let out = serde_json::to_string_pretty(steps)
            .map_err(|e| StepwiseError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    for (i, step) in steps.iter().enumerate() {
        let kind = if step.is_test { "test" } else { "impl" };
        println!("{:>2}. {:<18} [{}] {}", i + 1, step.id, kind, step.description);
    }
    Ok(())
}
