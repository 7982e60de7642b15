//! The per-invocation pipeline: determine step → execute → advance
//!
//! State is only advanced after the step's artifact has been written, so a
//! failure at any point leaves the workflow where it was and the same step
//! runs again next time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::build_definition;
use crate::domain::{NextStep, WorkflowDefinition, WorkflowProgress};
use crate::errors::{Result, StepwiseError};
use crate::fs::FileSystem;
use crate::report::Reporter;
use crate::schemas::Config;

use super::executor::StepExecutor;
use super::manager::WorkflowManager;

/// What a single invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// One step was executed and the state advanced past it
    StepCompleted {
        index: usize,
        step_id: String,
        output_path: PathBuf,
        /// True when this was the final step
        workflow_complete: bool,
    },
    /// Every step had already been executed; nothing was written
    AlreadyComplete,
    /// The workflow was reset to its first step
    Reset,
}

/// Read-only summary of a change request's progress
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub change_request_path: String,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub completed_steps: Vec<String>,
    pub next_step: Option<String>,
    pub complete: bool,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Wires a [`WorkflowManager`] and a [`StepExecutor`] together
pub struct WorkflowRunner {
    manager: WorkflowManager,
    executor: StepExecutor,
    fs: Arc<dyn FileSystem>,
    reporter: Arc<dyn Reporter>,
}

impl WorkflowRunner {
    pub fn new(
        definition: WorkflowDefinition,
        fs: Arc<dyn FileSystem>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let manager = WorkflowManager::new(Arc::new(definition), fs.clone(), reporter.clone());
        let executor = StepExecutor::new(fs.clone(), reporter.clone());
        WorkflowRunner {
            manager,
            executor,
            fs,
            reporter,
        }
    }

    /// Build a runner from configuration
    ///
    /// # Errors
    /// * `InvalidDefinition` - If the configured steps are invalid
    pub fn from_config(
        config: &Config,
        fs: Arc<dyn FileSystem>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let definition = build_definition(config)?;
        let mut runner = Self::new(definition, fs, reporter);
        runner.executor = runner
            .executor
            .with_strict_variables(config.strict_variables);
        Ok(runner)
    }

    pub fn manager(&self) -> &WorkflowManager {
        &self.manager
    }

    fn require_change_request(&self, change_request: &Path) -> Result<()> {
        if !self.fs.exists(change_request) {
            return Err(StepwiseError::FileNotFound(
                change_request.display().to_string(),
            ));
        }
        Ok(())
    }

    /// Run one invocation against a change request.
    ///
    /// With `reset`, the workflow is reset and nothing is executed.
    /// Otherwise the next step (if any) is executed and, on success, the
    /// state advanced past it.
    ///
    /// # Errors
    /// * `FileNotFound` - If the change request does not exist
    /// * `StepExecution` / `Interpolation` - If the step fails; state is untouched
    pub fn run(&self, change_request: &Path, reset: bool) -> Result<RunOutcome> {
        self.require_change_request(change_request)?;

        if reset {
            self.manager.reset_workflow(change_request)?;
            self.reporter.success(&format!(
                "Workflow reset for {}; the next run starts at the first step",
                change_request.display()
            ));
            return Ok(RunOutcome::Reset);
        }

        let index = match self.manager.determine_next_step(change_request) {
            NextStep::Complete => {
                self.reporter.success(&format!(
                    "All steps completed for {}",
                    change_request.display()
                ));
                return Ok(RunOutcome::AlreadyComplete);
            }
            NextStep::Step(index) => index,
        };

        let total = self.manager.total_steps();
        let step = self.manager.definition().step(index).ok_or_else(|| {
            StepwiseError::StateValidation(format!("no step at index {}", index))
        })?;

        self.reporter.step(index + 1, total, &step.description);
        let output_path = self.executor.output_path(change_request, step)?;
        self.executor
            .execute_step(change_request, step, &output_path)?;

        let state = self.manager.update_state(change_request, index + 1)?;
        let workflow_complete = state.current_step_index == total;

        self.reporter
            .info(&format!("Wrote {}", output_path.display()));
        if workflow_complete {
            self.reporter.success(&format!(
                "All steps completed for {}",
                change_request.display()
            ));
        } else {
            self.reporter.success(&format!(
                "Step {} of {} done ({})",
                index + 1,
                total,
                step.id
            ));
        }

        Ok(RunOutcome::StepCompleted {
            index,
            step_id: step.id.clone(),
            output_path,
            workflow_complete,
        })
    }

    /// Summarise progress without writing anything.
    ///
    /// An invalid state file is reported as a warning and shown as not started.
    ///
    /// # Errors
    /// * `FileNotFound` - If the change request does not exist
    pub fn status(&self, change_request: &Path) -> Result<StatusReport> {
        self.require_change_request(change_request)?;

        let state = match self.manager.load_state(change_request) {
            Ok(state) => state,
            Err(e) => {
                self.reporter.warn(&e.to_string());
                None
            }
        };

        let definition = self.manager.definition();
        let index = state.as_ref().map_or(0, |s| s.current_step_index);
        let progress =
            WorkflowProgress::from_index(state.as_ref().map(|s| s.current_step_index), definition.len());
        let next_step = progress
            .next_step()
            .index()
            .and_then(|i| definition.step(i))
            .map(|s| s.id.clone());

        Ok(StatusReport {
            change_request_path: change_request.to_string_lossy().into_owned(),
            current_step_index: index,
            total_steps: definition.len(),
            completed_steps: definition.completed_ids(index),
            next_step,
            complete: progress.is_complete(),
            last_modified: state.map(|s| s.last_modified),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use crate::report::{RecordingReporter, Report};
    use crate::schemas::WorkflowStep;

    fn two_step_runner() -> (Arc<MemoryFileSystem>, Arc<RecordingReporter>, WorkflowRunner) {
        let fs = Arc::new(MemoryFileSystem::new());
        let reporter = Arc::new(RecordingReporter::new());
        fs.insert("cr1.md", "change request");
        let definition = WorkflowDefinition::new(vec![
            WorkflowStep::new("draft", "Draft").with_prompt("Draft ${changeRequestFilePath}."),
            WorkflowStep::new("polish", "Polish").with_prompt("Polish it."),
        ])
        .unwrap();
        let runner = WorkflowRunner::new(definition, fs.clone(), reporter.clone());
        (fs, reporter, runner)
    }

    #[test]
    fn test_run_executes_steps_in_order() {
        let (fs, reporter, runner) = two_step_runner();

        let first = runner.run(Path::new("cr1.md"), false).unwrap();
        assert_eq!(
            first,
            RunOutcome::StepCompleted {
                index: 0,
                step_id: "draft".to_string(),
                output_path: PathBuf::from("cr1.md.draft.md"),
                workflow_complete: false,
            }
        );
        assert!(fs.exists(Path::new("cr1.md.draft.md")));

        let second = runner.run(Path::new("cr1.md"), false).unwrap();
        assert!(matches!(
            second,
            RunOutcome::StepCompleted { index: 1, workflow_complete: true, .. }
        ));

        assert!(reporter.reports().contains(&Report::Step {
            index: 2,
            total: 2,
            description: "Polish".to_string()
        }));
    }

    #[test]
    fn test_complete_workflow_writes_nothing() {
        let (fs, _, runner) = two_step_runner();
        runner.run(Path::new("cr1.md"), false).unwrap();
        runner.run(Path::new("cr1.md"), false).unwrap();
        let writes = fs.write_count();

        assert_eq!(runner.run(Path::new("cr1.md"), false).unwrap(), RunOutcome::AlreadyComplete);
        assert_eq!(fs.write_count(), writes);
    }

    #[test]
    fn test_failed_step_leaves_state_untouched() {
        let (fs, _, runner) = two_step_runner();
        fs.fail_writes_to("cr1.md.draft.md");

        let err = runner.run(Path::new("cr1.md"), false).unwrap_err();
        assert!(matches!(err, StepwiseError::StepExecution(_)));
        assert!(!fs.exists(Path::new("cr1.md.step")));
        assert_eq!(runner.manager().determine_next_step(Path::new("cr1.md")), NextStep::Step(0));
    }

    #[test]
    fn test_step_cannot_overwrite_change_request() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("cr1.md", "ORIGINAL CHANGE REQUEST");
        let definition = WorkflowDefinition::new(vec![WorkflowStep::new("a", "A")
            .with_prompt("Do it.")
            .with_output_file("${changeRequestFilePath}")])
        .unwrap();
        let runner = WorkflowRunner::new(definition, fs.clone(), Arc::new(RecordingReporter::new()));

        let err = runner.run(Path::new("cr1.md"), false).unwrap_err();
        assert!(matches!(err, StepwiseError::StepExecution(_)));
        assert_eq!(
            fs.contents(Path::new("cr1.md")).as_deref(),
            Some("ORIGINAL CHANGE REQUEST")
        );
        assert!(!fs.exists(Path::new("cr1.md.step")));
    }

    #[test]
    fn test_missing_change_request() {
        let (fs, _, runner) = two_step_runner();
        let err = runner.run(Path::new("nope.md"), false).unwrap_err();
        assert!(matches!(err, StepwiseError::FileNotFound(_)));
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_reset_only_resets() {
        let (fs, _, runner) = two_step_runner();
        runner.run(Path::new("cr1.md"), false).unwrap();

        assert_eq!(runner.run(Path::new("cr1.md"), true).unwrap(), RunOutcome::Reset);
        let state = runner.manager().load_state(Path::new("cr1.md")).unwrap().unwrap();
        assert_eq!(state.current_step_index, 0);
        assert!(!fs.exists(Path::new("cr1.md.polish.md")));
    }

    #[test]
    fn test_status_report() {
        let (_, _, runner) = two_step_runner();
        let before = runner.status(Path::new("cr1.md")).unwrap();
        assert_eq!(before.current_step_index, 0);
        assert_eq!(before.next_step.as_deref(), Some("draft"));
        assert!(before.last_modified.is_none());

        runner.run(Path::new("cr1.md"), false).unwrap();
        let after = runner.status(Path::new("cr1.md")).unwrap();
        assert_eq!(after.completed_steps, vec!["draft"]);
        assert_eq!(after.next_step.as_deref(), Some("polish"));
        assert!(!after.complete);
        assert!(after.last_modified.is_some());
    }

    #[test]
    fn test_status_on_corrupt_state_does_not_write() {
        let (fs, reporter, runner) = two_step_runner();
        fs.insert("cr1.md.step", "garbage");

        let report = runner.status(Path::new("cr1.md")).unwrap();
        assert_eq!(report.current_step_index, 0);
        assert_eq!(reporter.warnings().len(), 1);
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_from_config_strict_variables() {
        let fs = Arc::new(MemoryFileSystem::new());
        fs.insert("cr1.md", "x");
        let config: Config = serde_json::from_str(
            r#"{"strict_variables": true, "steps": [{"id": "a", "description": "A", "prompt": "Use ${unknown}."}]}"#,
        )
        .unwrap();
        let runner =
            WorkflowRunner::from_config(&config, fs.clone(), Arc::new(RecordingReporter::new()))
                .unwrap();

        let err = runner.run(Path::new("cr1.md"), false).unwrap_err();
        assert!(matches!(err, StepwiseError::Interpolation { .. }));
        assert!(!fs.exists(Path::new("cr1.md.step")));
    }
}
