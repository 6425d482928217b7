/// Suggestion engine
///
/// Builds the command bar's suggestion list from the tool catalog and the
/// example commands. Order is catalog order, then example order.

use crate::palette::catalog::{ActionCategory, ToolAction, AVAILABLE_TOOLS, EXAMPLE_COMMANDS};
use crate::palette::models::CommandSuggestion;

/// How many examples are featured on an empty query
pub const FEATURED_COUNT: usize = 4;

/// Upper bound on the suggestion list
pub const MAX_SUGGESTIONS: usize = 6;

const EXAMPLE_ICON: &str = "Sparkles";

pub struct SuggestionEngine {
    tools: &'static [ToolAction],
    examples: &'static [&'static str],
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(AVAILABLE_TOOLS, EXAMPLE_COMMANDS)
    }
}

impl SuggestionEngine {
    pub fn new(tools: &'static [ToolAction], examples: &'static [&'static str]) -> Self {
        Self { tools, examples }
    }

    /// Generate suggestions for `query`
    ///
    /// An empty query features the first few examples. Anything else
    /// returns matching tools followed by matching examples, capped at
    /// [`MAX_SUGGESTIONS`].
    pub fn generate_suggestions(&self, query: &str) -> Vec<CommandSuggestion> {
        if query.is_empty() {
            return self.featured();
        }

        let lower_query = query.to_lowercase();

        let tool_matches = self
            .tools
            .iter()
            .filter(|tool| Self::tool_matches(tool, &lower_query))
            .map(|tool| CommandSuggestion {
                id: tool.id.to_string(),
                text: format!("{}: {}", tool.name, tool.description),
                icon: tool.icon.to_string(),
                category: tool.category,
                is_recent: false,
                is_featured: false,
            });

        let example_matches = self
            .examples
            .iter()
            .enumerate()
            .filter(|(_, cmd)| cmd.to_lowercase().contains(&lower_query))
            .map(|(index, cmd)| Self::example(format!("cmd-{}", index), cmd));

        let suggestions: Vec<CommandSuggestion> = tool_matches
            .chain(example_matches)
            .take(MAX_SUGGESTIONS)
            .collect();

        tracing::debug!(query = %query, count = suggestions.len(), "generated suggestions");

        suggestions
    }

    fn featured(&self) -> Vec<CommandSuggestion> {
        self.examples
            .iter()
            .take(FEATURED_COUNT)
            .enumerate()
            .map(|(index, cmd)| Self::example(format!("example-{}", index), cmd))
            .collect()
    }

    // A keyword inside the query, or the query inside the tool name
    fn tool_matches(tool: &ToolAction, lower_query: &str) -> bool {
        tool.keyword_hits(lower_query) > 0 || tool.name.to_lowercase().contains(lower_query)
    }

    fn example(id: String, cmd: &str) -> CommandSuggestion {
        CommandSuggestion {
            id,
            text: cmd.to_string(),
            icon: EXAMPLE_ICON.to_string(),
            category: ActionCategory::Ai,
            is_recent: false,
            is_featured: true,
        }
    }
}

/// Suggestions against the builtin catalog
pub fn generate_suggestions(query: &str) -> Vec<CommandSuggestion> {
    SuggestionEngine::default().generate_suggestions(query)
}
