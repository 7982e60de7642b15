//! Workflow progress state machine
//!
//! Progress is linear: not started → in progress (step i) → complete.
//! Only a successful step execution moves it forward.

/// Where a change request stands in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowProgress {
    /// No usable state has been persisted
    NotStarted,
    /// Step `i` is the next one to execute (`0 <= i < N`)
    InProgress(usize),
    /// Every step has been executed
    Complete,
}

impl WorkflowProgress {
    /// Classify a persisted step index against a workflow of `total` steps.
    ///
    /// `None` means no (valid) state exists.
    pub fn from_index(index: Option<usize>, total: usize) -> Self {
        match index {
            None => WorkflowProgress::NotStarted,
            Some(i) if i >= total => WorkflowProgress::Complete,
            Some(i) => WorkflowProgress::InProgress(i),
        }
    }

    /// The step to run next
    pub fn next_step(&self) -> NextStep {
        match self {
            WorkflowProgress::NotStarted => NextStep::Step(0),
            WorkflowProgress::InProgress(i) => NextStep::Step(*i),
            WorkflowProgress::Complete => NextStep::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, WorkflowProgress::Complete)
    }
}

impl std::fmt::Display for WorkflowProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowProgress::NotStarted => write!(f, "not_started"),
            WorkflowProgress::InProgress(i) => write!(f, "in_progress({})", i),
            WorkflowProgress::Complete => write!(f, "complete"),
        }
    }
}

/// Result of asking which step comes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Execute the step at this index
    Step(usize),
    /// Nothing left to do
    Complete,
}

impl NextStep {
    pub fn index(&self) -> Option<usize> {
        match self {
            NextStep::Step(i) => Some(*i),
            NextStep::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, NextStep::Complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(WorkflowProgress::from_index(None, 8), WorkflowProgress::NotStarted);
        assert_eq!(WorkflowProgress::from_index(Some(0), 8), WorkflowProgress::InProgress(0));
        assert_eq!(WorkflowProgress::from_index(Some(7), 8), WorkflowProgress::InProgress(7));
        assert_eq!(WorkflowProgress::from_index(Some(8), 8), WorkflowProgress::Complete);
    }

    #[test]
    fn test_next_step() {
        assert_eq!(WorkflowProgress::NotStarted.next_step(), NextStep::Step(0));
        assert_eq!(WorkflowProgress::InProgress(3).next_step(), NextStep::Step(3));
        assert_eq!(WorkflowProgress::Complete.next_step(), NextStep::Complete);
        assert_eq!(NextStep::Step(3).index(), Some(3));
        assert!(NextStep::Complete.is_complete());
        assert_eq!(NextStep::Complete.index(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkflowProgress::NotStarted.to_string(), "not_started");
        assert_eq!(WorkflowProgress::InProgress(2).to_string(), "in_progress(2)");
        assert_eq!(WorkflowProgress::Complete.to_string(), "complete");
    }
}
