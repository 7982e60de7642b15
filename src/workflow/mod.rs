//! Workflow step-execution engine
//!
//! - [`WorkflowManager`] owns persisted progress and picks the next step
//! - [`StepExecutor`] turns a step into its output artifact
//! - [`WorkflowRunner`] runs one determine → execute → advance cycle

mod executor;
mod manager;
mod runner;

pub use executor::StepExecutor;
pub use manager::WorkflowManager;
pub use runner::{RunOutcome, StatusReport, WorkflowRunner};
