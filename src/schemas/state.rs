//! Workflow state schema - persisted progress for one change request

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress record for a single change request.
///
/// Serialized as the `<change request>.step` JSON document. `completed_steps`
/// always mirrors `steps[0..current_step_index]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Path of the change request this state belongs to
    pub change_request_path: String,

    /// Index of the next step to execute; equal to the step count when complete
    pub current_step_index: usize,

    /// Time of the last persisted change (RFC 3339)
    pub last_modified: DateTime<Utc>,

    /// Ids of the steps already executed, in order
    #[serde(default)]
    pub completed_steps: Vec<String>,
}

impl WorkflowState {
    /// Create a fresh, not-started state
    pub fn new(change_request_path: impl Into<String>) -> Self {
        WorkflowState {
            change_request_path: change_request_path.into(),
            current_step_index: 0,
            last_modified: Utc::now(),
            completed_steps: Vec::new(),
        }
    }

    /// Builder: return a copy positioned at `index` with the given completed ids.
    /// Refreshes `last_modified`.
    pub fn with_progress(mut self, index: usize, completed_steps: Vec<String>) -> Self {
        self.current_step_index = index;
        self.completed_steps = completed_steps;
        self.touch();
        self
    }

    /// Update the last_modified timestamp to now
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = WorkflowState::new("cr1.md");
        assert_eq!(state.change_request_path, "cr1.md");
        assert_eq!(state.current_step_index, 0);
        assert!(state.completed_steps.is_empty());
    }

    #[test]
    fn test_state_json_field_names() {
        let state = WorkflowState::new("cr1.md").with_progress(1, vec!["foundation".into()]);
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["change_request_path"], "cr1.md");
        assert_eq!(value["current_step_index"], 1);
        assert_eq!(value["completed_steps"][0], "foundation");
        let stamp = value["last_modified"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_state_rejects_negative_index() {
        let json = r#"{
            "change_request_path": "cr1.md",
            "current_step_index": -1,
            "last_modified": "2024-01-01T00:00:00Z",
            "completed_steps": []
        }"#;
        assert!(serde_json::from_str::<WorkflowState>(json).is_err());
    }

    #[test]
    fn test_with_progress_does_not_touch_original() {
        let state = WorkflowState::new("cr1.md");
        let original = state.clone();
        let _advanced = state.clone().with_progress(2, vec!["a".into(), "b".into()]);
        assert_eq!(state, original);
    }
}
