//! Domain logic for workflow definitions, progress and transitions

mod definition;
mod states;
mod transitions;
mod validation;

// Property-based tests (compiled only in test builds)
#[cfg(test)]
mod property_tests;

pub use definition::{default_steps, WorkflowDefinition};
pub use states::{NextStep, WorkflowProgress};
pub use transitions::{advance_state, reset_state};
pub use validation::{validate_state, validate_step_index};
