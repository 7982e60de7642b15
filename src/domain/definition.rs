//! Workflow definition - the immutable, ordered table of steps

use std::collections::HashSet;

use crate::errors::{Result, StepwiseError};
use crate::prompts::{bundled_prompt, malformed_placeholders, CHANGE_REQUEST_FILE_PATH};
use crate::schemas::WorkflowStep;

/// Ids and descriptions of the bundled workflow, in execution order.
const DEFAULT_STEPS: &[(&str, &str, bool)] = &[
    ("foundation", "Foundation: core types and project scaffolding", false),
    ("foundation-tests", "Tests for the foundation", true),
    ("minimal", "Minimal implementation of the primary user story", false),
    ("minimal-tests", "Tests for the minimal implementation", true),
    ("extension", "Extension to the remaining user stories", false),
    ("extension-tests", "Tests for the extensions", true),
    ("refinement", "Refinement and cleanup", false),
    ("refinement-tests", "Final review of the test suite", true),
];

/// The bundled 8-step workflow.
pub fn default_steps() -> Vec<WorkflowStep> {
    DEFAULT_STEPS
        .iter()
        .map(|&(id, description, is_test)| {
            let step = WorkflowStep::new(id, description)
                .with_prompt(bundled_prompt(id).unwrap_or_default())
                .with_output_file(format!("${{{}}}.{}.md", CHANGE_REQUEST_FILE_PATH, id));
            if is_test {
                step.as_test()
            } else {
                step
            }
        })
        .collect()
}

fn is_valid_step_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Ordered, validated sequence of workflow steps.
///
/// Validation happens once in [`WorkflowDefinition::new`]; afterwards the
/// table cannot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDefinition {
    steps: Vec<WorkflowStep>,
}

impl WorkflowDefinition {
    /// Build a definition from a list of steps.
    ///
    /// # Errors
    /// * `InvalidDefinition` - If there are no steps, an id is empty, contains
    ///   characters unsafe for file names or is duplicated, or a template has
    ///   a malformed `${...}` placeholder
    pub fn new(steps: Vec<WorkflowStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(StepwiseError::InvalidDefinition(
                "workflow must have at least one step".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !is_valid_step_id(&step.id) {
                return Err(StepwiseError::InvalidDefinition(format!(
                    "invalid step id {:?}: use letters, digits, '-' or '_'",
                    step.id
                )));
            }
            if !seen.insert(step.id.as_str()) {
                return Err(StepwiseError::InvalidDefinition(format!(
                    "duplicate step id: {}",
                    step.id
                )));
            }
            for (field, template) in [("prompt", &step.prompt), ("output_file", &step.output_file)] {
                let malformed = malformed_placeholders(template);
                if !malformed.is_empty() {
                    return Err(StepwiseError::InvalidDefinition(format!(
                        "step {} has malformed placeholders in {}: {}",
                        step.id,
                        field,
                        malformed.join(", ")
                    )));
                }
            }
        }

        Ok(WorkflowDefinition { steps })
    }

    pub fn steps(&self) -> &[WorkflowStep] {
        &self.steps
    }

    /// Number of steps (`N`); a state at this index is complete
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed definition
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&WorkflowStep> {
        self.steps.get(index)
    }

    /// Ids of `steps[0..index]`, clamped to the table length
    pub fn completed_ids(&self, index: usize) -> Vec<String> {
        self.steps
            .iter()
            .take(index)
            .map(|s| s.id.clone())
            .collect()
    }
}

impl Default for WorkflowDefinition {
    fn default() -> Self {
        WorkflowDefinition {
            steps: default_steps(),
        }
    }
}
