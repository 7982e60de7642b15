//! Schema types for stepwise
//!
//! Serializable records: workflow steps, persisted workflow state and configuration.

mod config;
mod state;
mod step;

pub use config::Config;
pub use state::WorkflowState;
pub use step::WorkflowStep;
