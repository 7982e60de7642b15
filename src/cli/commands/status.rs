//! Status command - Show how far a change request has progressed

use std::path::Path;

use crate::errors::{Result, StepwiseError};

use super::GlobalOptions;

/// Print the progress of a change request
pub fn run(options: &GlobalOptions, change_request: &Path, json: bool) -> Result<()> {
    let runner = options.runner()?;
    let change_request = options.resolve_path(change_request);
    let report = runner.status(&change_request)?;

    if json {
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| StepwiseError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Change request: {}", report.change_request_path);
    println!(
        "Progress:       {}/{} steps",
        report.current_step_index, report.total_steps
    );
    for (i, step) in runner.manager().definition().steps().iter().enumerate() {
        let mark = if i < report.current_step_index {
            "x"
        } else if Some(&step.id) == report.next_step.as_ref() {
            ">"
        } else {
            " "
        };
        println!("  [{}] {:<18} {}", mark, step.id, step.description);
    }
    if let Some(next) = &report.next_step {
        println!("Next step:      {}", next);
    } else if report.complete {
        println!("All steps completed");
    }
    if let Some(modified) = report.last_modified {
        println!("Last modified:  {}", modified.to_rfc3339());
    }
    Ok(())
}
