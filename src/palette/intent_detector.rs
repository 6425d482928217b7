/// Intent detection
///
/// Keyword matching of a free-text query against the tool catalog.
/// Each matched tool becomes one workflow step.

use crate::palette::catalog::{ToolAction, AVAILABLE_TOOLS};
use crate::palette::models::{DetectedIntent, WorkflowStep};

/// Queries shorter than this (in chars) produce no intent
pub const MIN_QUERY_LEN: usize = 3;

const BASE_CONFIDENCE: usize = 50;
const CONFIDENCE_PER_TOOL: usize = 15;
const MAX_CONFIDENCE: usize = 95;
const HELP_CONFIDENCE: u8 = 80;
const SEARCH_CONFIDENCE: u8 = 30;

/// Action id used when no tool matched
pub const SEARCH_ACTION: &str = "search";

/// Matches queries against a tool table
pub struct IntentDetector {
    tools: &'static [ToolAction],
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new(AVAILABLE_TOOLS)
    }
}

impl IntentDetector {
    pub fn new(tools: &'static [ToolAction]) -> Self {
        Self { tools }
    }

    /// Detect the intent behind `query`
    ///
    /// # Returns
    /// * `None` - query is shorter than [`MIN_QUERY_LEN`]
    /// * `Some(DetectedIntent)` - otherwise, even when nothing matched
    pub fn detect(&self, query: &str) -> Option<DetectedIntent> {
        if query.chars().count() < MIN_QUERY_LEN {
            return None;
        }

        let lower_query = query.to_lowercase();

        // Catalog order decides ties and step order
        let matched: Vec<&'static ToolAction> = self
            .tools
            .iter()
            .filter(|tool| tool.keyword_hits(&lower_query) > 0)
            .collect();

        let suggested_workflow: Vec<WorkflowStep> = matched
            .iter()
            .enumerate()
            .map(|(index, tool)| WorkflowStep::pending(index, *tool))
            .collect();

        let (confidence, description) = match matched.as_slice() {
            [] if lower_query.contains("help") || lower_query.contains('?') => (
                HELP_CONFIDENCE,
                "Show help and available commands".to_string(),
            ),
            [] => (
                SEARCH_CONFIDENCE,
                "Searching for matching tools...".to_string(),
            ),
            [only] => (
                Self::confidence_for(1),
                format!("Execute {}", only.name),
            ),
            many => (
                Self::confidence_for(many.len()),
                format!(
                    "Chain {} tools: {}",
                    many.len(),
                    many.iter().map(|t| t.name).collect::<Vec<_>>().join(" → ")
                ),
            ),
        };

        let action = matched
            .first()
            .map(|tool| tool.id.to_string())
            .unwrap_or_else(|| SEARCH_ACTION.to_string());

        tracing::debug!(
            query = %query,
            matched = matched.len(),
            confidence,
            "detected intent"
        );

        Some(DetectedIntent {
            confidence,
            action,
            description,
            required_tools: matched,
            suggested_workflow,
        })
    }

    /// Step function of the number of matched tools, capped at 95
    fn confidence_for(matched_count: usize) -> u8 {
        let raw = BASE_CONFIDENCE.saturating_add(matched_count.saturating_mul(CONFIDENCE_PER_TOOL));
        raw.min(MAX_CONFIDENCE) as u8
    }
}

/// Detect an intent against the builtin catalog
pub fn detect_intent(query: &str) -> Option<DetectedIntent> {
    IntentDetector::default().detect(query)
}
