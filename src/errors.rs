//! Error types for stepwise
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for stepwise operations
pub type Result<T> = std::result::Result<T, StepwiseError>;

/// Main error type for all stepwise operations
#[derive(Debug, Error)]
pub enum StepwiseError {
    /// Input change request (or an explicitly requested file) is missing
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// Persisted workflow state is unreadable, malformed or out of range
    #[error("Invalid state file: {0}")]
    InvalidStateFile(String),

    /// A requested state change violates the workflow's bounds
    #[error("State validation failed: {0}")]
    StateValidation(String),

    /// I/O failure while reading input or writing output for a step
    #[error("Step execution failed: {0}")]
    StepExecution(String),

    /// Prompt placeholders that could not be resolved (strict mode only)
    #[error("Unresolved prompt variables (missing: [{}], malformed: [{}])", .missing.join(", "), .malformed.join(", "))]
    Interpolation {
        missing: Vec<String>,
        malformed: Vec<String>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The workflow step table is unusable
    #[error("Invalid workflow definition: {0}")]
    InvalidDefinition(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl StepwiseError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            StepwiseError::FileNotFound(_) => "FILE_NOT_FOUND",
            StepwiseError::InvalidJson(_) => "INVALID_JSON",
            StepwiseError::InvalidStateFile(_) => "INVALID_STATE_FILE",
            StepwiseError::StateValidation(_) => "STATE_VALIDATION",
            StepwiseError::StepExecution(_) => "STEP_EXECUTION_FAILURE",
            StepwiseError::Interpolation { .. } => "INTERPOLATION_DIAGNOSTIC",
            StepwiseError::ConfigError(_) => "CONFIG_ERROR",
            StepwiseError::InvalidDefinition(_) => "INVALID_DEFINITION",
            StepwiseError::Io(_) => "IO_ERROR",
            StepwiseError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        StepwiseError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &StepwiseError) -> i32 {
    match error {
        StepwiseError::FileNotFound(_) => 2,
        _ => 1,
    }
}
