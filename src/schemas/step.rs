//! Workflow step schema - one ordered phase of implementing a change request

use serde::{Deserialize, Serialize};

/// A single step in the workflow.
///
/// `prompt` and `output_file` are templates that may reference
/// `${name}` placeholders resolved at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Stable identifier, also used in artifact file names
    pub id: String,

    /// Human-readable description
    pub description: String,

    /// Instruction template; empty means "derive from the description"
    #[serde(default)]
    pub prompt: String,

    /// Output artifact path template; empty means `<change request>.<id>.md`
    #[serde(default)]
    pub output_file: String,

    /// Whether this step writes tests rather than implementation
    #[serde(default)]
    pub is_test: bool,
}

impl WorkflowStep {
    /// Create a step with an empty prompt and default output location
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        WorkflowStep {
            id: id.into(),
            description: description.into(),
            prompt: String::new(),
            output_file: String::new(),
            is_test: false,
        }
    }

    /// Builder: set the prompt template
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder: set the output file template
    pub fn with_output_file(mut self, output_file: impl Into<String>) -> Self {
        self.output_file = output_file.into();
        self
    }

    /// Builder: mark as a test-writing step
    pub fn as_test(mut self) -> Self {
        self.is_test = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let step = WorkflowStep::new("foundation", "Lay the foundation")
            .with_prompt("Process ${changeRequestFilePath}.")
            .with_output_file("${changeRequestFilePath}.foundation.md");

        assert_eq!(step.id, "foundation");
        assert_eq!(step.prompt, "Process ${changeRequestFilePath}.");
        assert!(!step.is_test);
        assert!(step.clone().as_test().is_test);
    }

    #[test]
    fn test_step_partial_json() {
        let json = r#"{"id": "extension", "description": "Extend it"}"#;
        let step: WorkflowStep = serde_json::from_str(json).unwrap();

        assert_eq!(step.id, "extension");
        assert!(step.prompt.is_empty());
        assert!(step.output_file.is_empty());
        assert!(!step.is_test);
    }
}
