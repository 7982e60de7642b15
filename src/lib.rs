//! Stepwise - Drive a change request through an ordered, resumable sequence of implementation steps
//!
//! This library provides the workflow step-execution engine behind the
//! stepwise CLI, including:
//! - Schema definitions for workflow steps, persisted state and configuration
//! - Domain logic for the step table, progress and state transitions
//! - Prompt interpolation and numbered instruction rendering
//! - File access and reporting collaborators
//! - The workflow manager, step executor and per-invocation runner

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod prompts;
pub mod report;
pub mod schemas;
pub mod workflow;

// Re-export commonly used types
pub use domain::{NextStep, WorkflowDefinition, WorkflowProgress};
pub use errors::{Result, StepwiseError};
pub use schemas::{Config, WorkflowState, WorkflowStep};
pub use workflow::{RunOutcome, StepExecutor, WorkflowManager, WorkflowRunner};
