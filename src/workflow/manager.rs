//! Workflow state persistence and next-step selection
//!
//! The manager exclusively owns the `<change request>.step` file. Each change
//! request has its own state file, so managers working on different change
//! requests never touch each other's data. Concurrent writers on the *same*
//! change request are not coordinated: every save is an atomic replace and
//! the last one wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::{
    advance_state, reset_state, validate_state, validate_step_index, NextStep, WorkflowDefinition,
    WorkflowProgress,
};
use crate::errors::{Result, StepwiseError};
use crate::fs::{read_json, state_file_path, write_json, FileSystem};
use crate::report::Reporter;
use crate::schemas::WorkflowState;

/// Loads, validates, advances and resets workflow state
pub struct WorkflowManager {
    definition: Arc<WorkflowDefinition>,
    fs: Arc<dyn FileSystem>,
    reporter: Arc<dyn Reporter>,
}

fn path_key(change_request: &Path) -> String {
    change_request.to_string_lossy().into_owned()
}

impl WorkflowManager {
    pub fn new(
        definition: Arc<WorkflowDefinition>,
        fs: Arc<dyn FileSystem>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        WorkflowManager {
            definition,
            fs,
            reporter,
        }
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    /// Number of steps in the workflow (`N`)
    pub fn total_steps(&self) -> usize {
        self.definition.len()
    }

    /// Location of the state file for a change request
    pub fn state_path(&self, change_request: &Path) -> PathBuf {
        state_file_path(change_request)
    }

    /// Load the persisted state for a change request.
    ///
    /// # Returns
    /// `None` when no state file exists.
    ///
    /// # Errors
    /// * `InvalidStateFile` - If the file cannot be read, is not a valid
    ///   state document, or its step index is out of range
    pub fn load_state(&self, change_request: &Path) -> Result<Option<WorkflowState>> {
        let path = self.state_path(change_request);
        if !self.fs.exists(&path) {
            return Ok(None);
        }

        let state: WorkflowState = match read_json(self.fs.as_ref(), &path) {
            Ok(state) => state,
            Err(StepwiseError::FileNotFound(_)) => return Ok(None),
            Err(e) => {
                return Err(StepwiseError::InvalidStateFile(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let state = validate_state(state, &path_key(change_request), &self.definition).map_err(
            |e| StepwiseError::InvalidStateFile(format!("{}: {}", path.display(), e)),
        )?;
        tracing::debug!(
            path = %path.display(),
            index = state.current_step_index,
            "loaded workflow state"
        );
        Ok(Some(state))
    }

    /// Persist a state, replacing whatever was stored for `change_request`.
    ///
    /// The state file location comes from the path itself, not from the
    /// state's `change_request_path` field, which is only a display string.
    ///
    /// # Errors
    /// * `StateValidation` - If the state's index is out of range
    /// * `Wrapped` - If the state file cannot be written
    pub fn save_state(&self, change_request: &Path, state: &WorkflowState) -> Result<()> {
        validate_step_index(state.current_step_index, self.definition.len())?;

        let path = self.state_path(change_request);
        write_json(self.fs.as_ref(), &path, state).map_err(|e| {
            StepwiseError::wrap(e, format!("Failed to save workflow state {}", path.display()))
        })?;
        tracing::debug!(
            path = %path.display(),
            index = state.current_step_index,
            "saved workflow state"
        );
        Ok(())
    }

    /// Current progress of a change request.
    ///
    /// A corrupted or out-of-range state file is reported once as a warning,
    /// reset on disk, and treated as not started.
    pub fn progress(&self, change_request: &Path) -> WorkflowProgress {
        match self.load_state(change_request) {
            Ok(state) => WorkflowProgress::from_index(
                state.map(|s| s.current_step_index),
                self.definition.len(),
            ),
            Err(e) => {
                self.reporter.warn(&format!(
                    "{}; restarting the workflow from the first step",
                    e
                ));
                tracing::info!(error = %e, "recovering from invalid workflow state");
                let fresh = reset_state(&path_key(change_request));
                if let Err(reset_err) = self.save_state(change_request, &fresh) {
                    tracing::debug!(error = %reset_err, "could not rewrite invalid state file");
                }
                WorkflowProgress::NotStarted
            }
        }
    }

    /// Index of the next step to run, or `Complete`. Never fails.
    pub fn determine_next_step(&self, change_request: &Path) -> NextStep {
        self.progress(change_request).next_step()
    }

    /// Record that every step before `new_index` is done.
    ///
    /// # Errors
    /// * `StateValidation` - If `new_index` exceeds the step count
    pub fn update_state(&self, change_request: &Path, new_index: usize) -> Result<WorkflowState> {
        let base = WorkflowState::new(path_key(change_request));
        let state = advance_state(&base, new_index, &self.definition)?;
        self.save_state(change_request, &state)?;
        Ok(state)
    }

    /// Force the workflow back to its first step, regardless of stored content
    pub fn reset_workflow(&self, change_request: &Path) -> Result<WorkflowState> {
        let state = reset_state(&path_key(change_request));
        self.save_state(change_request, &state)?;
        Ok(state)
    }

    pub fn is_workflow_complete(&self, change_request: &Path) -> bool {
        self.progress(change_request).is_complete()
    }
}
