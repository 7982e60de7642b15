//! Validation rules for workflow state

use crate::errors::{Result, StepwiseError};
use crate::schemas::WorkflowState;

use super::definition::WorkflowDefinition;

/// Check that `index` lies in `[0, total]`.
///
/// # Errors
/// * `StateValidation` - If the index is past the end of the workflow
pub fn validate_step_index(index: usize, total: usize) -> Result<()> {
    if index > total {
        return Err(StepwiseError::StateValidation(format!(
            "step index {} is out of range (workflow has {} steps)",
            index, total
        )));
    }
    Ok(())
}

/// Validate a state read from disk and bring it in line with `definition`.
///
/// An out-of-range index makes the state unusable. A `completed_steps` list
/// that disagrees with the index (for example after the step table was
/// edited) is re-derived from the index, as is a mismatched
/// `change_request_path`.
///
/// # Errors
/// * `InvalidStateFile` - If `current_step_index` exceeds the step count
pub fn validate_state(
    state: WorkflowState,
    change_request_path: &str,
    definition: &WorkflowDefinition,
) -> Result<WorkflowState> {
    if let Err(e) = validate_step_index(state.current_step_index, definition.len()) {
        return Err(StepwiseError::InvalidStateFile(e.to_string()));
    }

    let mut state = state;
    let expected = definition.completed_ids(state.current_step_index);
    if state.completed_steps != expected {
        tracing::debug!(
            found = ?state.completed_steps,
            expected = ?expected,
            "re-deriving completed steps from step index"
        );
        state.completed_steps = expected;
    }
    if state.change_request_path != change_request_path {
        tracing::debug!(
            found = %state.change_request_path,
            expected = %change_request_path,
            "state file names a different change request path"
        );
        state.change_request_path = change_request_path.to_string();
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_step_index() {
        assert!(validate_step_index(0, 8).is_ok());
        assert!(validate_step_index(8, 8).is_ok());
        let err = validate_step_index(9, 8).unwrap_err();
        assert!(matches!(err, StepwiseError::StateValidation(_)));
    }

    #[test]
    fn test_validate_state_in_range_is_kept() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("cr1.md").with_progress(2, def.completed_ids(2));
        let validated = validate_state(state.clone(), "cr1.md", &def).unwrap();
        assert_eq!(validated, state);
    }

    #[test]
    fn test_validate_state_out_of_range() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("cr1.md").with_progress(9, vec![]);
        let err = validate_state(state, "cr1.md", &def).unwrap_err();
        assert!(matches!(err, StepwiseError::InvalidStateFile(_)));
    }

    #[test]
    fn test_validate_state_rederives_completed_steps() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("cr1.md").with_progress(2, vec!["stale".into()]);
        let validated = validate_state(state, "cr1.md", &def).unwrap();
        assert_eq!(validated.current_step_index, 2);
        assert_eq!(validated.completed_steps, def.completed_ids(2));
    }

    #[test]
    fn test_validate_state_adopts_requested_path() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("old/cr1.md");
        let validated = validate_state(state, "new/cr1.md", &def).unwrap();
        assert_eq!(validated.change_request_path, "new/cr1.md");
    }
}
