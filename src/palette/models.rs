/// Data models for the command bar
///
/// Intents, workflow steps and suggestions. All of it is derived from the
/// current query and lives only as long as the session.

use crate::palette::catalog::{ActionCategory, ToolAction};
use serde::Serialize;
use std::fmt;

/// Status of one workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Ready,
    Processing,
    Completed,
    Error,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Ready => "ready",
            StepStatus::Processing => "processing",
            StepStatus::Completed => "completed",
            StepStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// One matched tool placed in a workflow
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStep {
    pub id: String,
    /// 1-based position in the workflow
    pub order: usize,
    pub tool: &'static ToolAction,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl WorkflowStep {
    /// A pending step at `index` (0-based) in the workflow
    pub fn pending(index: usize, tool: &'static ToolAction) -> Self {
        Self {
            id: format!("step-{}", index + 1),
            order: index + 1,
            tool,
            status: StepStatus::Pending,
            input: None,
            output: None,
        }
    }
}

/// Rough run time of a workflow, summed over its tools
pub fn estimated_total_seconds(steps: &[WorkflowStep]) -> u32 {
    steps.iter().map(|step| step.tool.estimated_seconds()).sum()
}

/// True when every step completed. An empty workflow counts as done.
pub fn all_completed(steps: &[WorkflowStep]) -> bool {
    steps.iter().all(|step| step.status == StepStatus::Completed)
}

/// The matcher's best guess at what the user wants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedIntent {
    /// 0-100
    pub confidence: u8,
    /// First matched tool id, or "search"
    pub action: String,
    pub description: String,
    pub required_tools: Vec<&'static ToolAction>,
    pub suggested_workflow: Vec<WorkflowStep>,
}

impl DetectedIntent {
    pub fn has_tools(&self) -> bool {
        !self.required_tools.is_empty()
    }

    /// Seconds the suggested workflow should take
    pub fn estimated_seconds(&self) -> u32 {
        estimated_total_seconds(&self.suggested_workflow)
    }
}

/// A row in the command bar's suggestion list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandSuggestion {
    pub id: String,
    pub text: String,
    pub icon: String,
    pub category: ActionCategory,
    pub is_recent: bool,
    pub is_featured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::catalog::find_tool;

    #[test]
    fn test_pending_step_numbering() {
        let tool = find_tool("ai-writer").unwrap();
        let step = WorkflowStep::pending(2, tool);
        assert_eq!(step.id, "step-3");
        assert_eq!(step.order, 3);
        assert_eq!(step.status, StepStatus::Pending);
    }

    #[test]
    fn test_estimate_counts_varies_as_five() {
        let steps = vec![
            WorkflowStep::pending(0, find_tool("image-resize").unwrap()),
            WorkflowStep::pending(1, find_tool("batch-process").unwrap()),
        ];
        assert_eq!(estimated_total_seconds(&steps), 2 + 5);
        assert_eq!(estimated_total_seconds(&[]), 0);
    }

    #[test]
    fn test_all_completed() {
        let mut steps = vec![WorkflowStep::pending(0, find_tool("zip-create").unwrap())];
        assert!(!all_completed(&steps));
        steps[0].status = StepStatus::Completed;
        assert!(all_completed(&steps));
        assert!(all_completed(&[]));
    }

    #[test]
    fn test_step_status_serializes_snake_case() {
        let json = serde_json::to_string(&StepStatus::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
        assert_eq!(StepStatus::Completed.to_string(), "completed");
    }
}
