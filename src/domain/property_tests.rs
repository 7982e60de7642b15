//! Property-based tests for domain logic
//!
//! These tests use proptest to verify invariants across many random inputs.

#[cfg(test)]
mod tests {
    use crate::domain::definition::WorkflowDefinition;
    use crate::domain::states::{NextStep, WorkflowProgress};
    use crate::domain::transitions::advance_state;
    use crate::domain::validation::validate_state;
    use crate::schemas::{WorkflowState, WorkflowStep};
    use proptest::prelude::*;

    // ===== STRATEGY HELPERS =====

    /// Generate a valid definition with 1..12 uniquely named steps
    fn any_definition() -> impl Strategy<Value = WorkflowDefinition> {
        (1usize..12).prop_map(|n| {
            let steps = (0..n)
                .map(|i| WorkflowStep::new(format!("step-{}", i), format!("Step {}", i)))
                .collect();
            WorkflowDefinition::new(steps).unwrap()
        })
    }

    /// Generate a definition together with an in-range index
    fn definition_and_index() -> impl Strategy<Value = (WorkflowDefinition, usize)> {
        any_definition().prop_flat_map(|def| {
            let n = def.len();
            (Just(def), 0..=n)
        })
    }

    // ===== DERIVATION TESTS =====

    proptest! {
        /// Property: completed_steps is always steps[0..index]
        #[test]
        fn test_advance_derives_completed_steps((def, index) in definition_and_index()) {
            let next = advance_state(&WorkflowState::new("cr.md"), index, &def).unwrap();
            prop_assert_eq!(next.current_step_index, index);
            prop_assert_eq!(next.completed_steps.len(), index);
            for (i, id) in next.completed_steps.iter().enumerate() {
                prop_assert_eq!(id, &def.steps()[i].id);
            }
        }

        /// Property: indices past the end are always rejected
        #[test]
        fn test_advance_rejects_out_of_range(def in any_definition(), extra in 1usize..100) {
            let index = def.len() + extra;
            prop_assert!(advance_state(&WorkflowState::new("cr.md"), index, &def).is_err());
        }

        /// Property: advance_state never mutates its input
        #[test]
        fn test_advance_never_mutates((def, index) in definition_and_index()) {
            let state = WorkflowState::new("cr.md");
            let original = state.clone();
            let _ = advance_state(&state, index, &def);
            prop_assert_eq!(state, original);
        }

        /// Property: any in-range persisted index survives validation unchanged
        #[test]
        fn test_validation_keeps_in_range_index(
            (def, index) in definition_and_index(),
            junk in prop::collection::vec("[a-z]{1,6}", 0..5),
        ) {
            let state = WorkflowState::new("cr.md").with_progress(index, junk);
            let validated = validate_state(state, "cr.md", &def).unwrap();
            prop_assert_eq!(validated.current_step_index, index);
            prop_assert_eq!(validated.completed_steps, def.completed_ids(index));
        }

        /// Property: out-of-range persisted indices are always invalid
        #[test]
        fn test_validation_rejects_out_of_range(def in any_definition(), extra in 1usize..100) {
            let state = WorkflowState::new("cr.md").with_progress(def.len() + extra, vec![]);
            prop_assert!(validate_state(state, "cr.md", &def).is_err());
        }

        /// Property: the next step is the persisted index, or complete at N
        #[test]
        fn test_next_step_matches_index((def, index) in definition_and_index()) {
            let next = WorkflowProgress::from_index(Some(index), def.len()).next_step();
            if index == def.len() {
                prop_assert_eq!(next, NextStep::Complete);
            } else {
                prop_assert_eq!(next, NextStep::Step(index));
            }
        }
    }
}
