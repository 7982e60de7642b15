//! State transition logic
//!
//! Pure functions producing new workflow states; inputs are never mutated.

use crate::errors::Result;
use crate::schemas::WorkflowState;

use super::definition::WorkflowDefinition;
use super::validation::validate_step_index;

/// Return a copy of `state` positioned at `new_index`.
///
/// `completed_steps` is recomputed as the ids of `steps[0..new_index]` and
/// `last_modified` is refreshed.
///
/// # Errors
/// * `StateValidation` - If `new_index` is greater than the step count
pub fn advance_state(
    state: &WorkflowState,
    new_index: usize,
    definition: &WorkflowDefinition,
) -> Result<WorkflowState> {
    validate_step_index(new_index, definition.len())?;
    Ok(state
        .clone()
        .with_progress(new_index, definition.completed_ids(new_index)))
}

/// A not-started state for `change_request_path`
pub fn reset_state(change_request_path: &str) -> WorkflowState {
    WorkflowState::new(change_request_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StepwiseError;

    #[test]
    fn test_advance_recomputes_completed_steps() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("cr1.md");

        let next = advance_state(&state, 3, &def).unwrap();
        assert_eq!(next.current_step_index, 3);
        assert_eq!(next.completed_steps, vec!["foundation", "foundation-tests", "minimal"]);
        assert!(next.last_modified >= state.last_modified);
    }

    #[test]
    fn test_advance_to_complete() {
        let def = WorkflowDefinition::default();
        let next = advance_state(&WorkflowState::new("cr1.md"), 8, &def).unwrap();
        assert_eq!(next.completed_steps.len(), 8);
    }

    #[test]
    fn test_advance_out_of_range_rejected() {
        let def = WorkflowDefinition::default();
        let err = advance_state(&WorkflowState::new("cr1.md"), 9, &def).unwrap_err();
        assert!(matches!(err, StepwiseError::StateValidation(_)));
    }

    #[test]
    fn test_advance_does_not_mutate_original() {
        let def = WorkflowDefinition::default();
        let state = WorkflowState::new("cr1.md");
        let original = state.clone();

        let _ = advance_state(&state, 4, &def);
        assert_eq!(state, original);
    }

    #[test]
    fn test_reset_state() {
        let state = reset_state("cr1.md");
        assert_eq!(state.current_step_index, 0);
        assert!(state.completed_steps.is_empty());
    }
}
