/// Command palette
///
/// Intent detection, suggestions and the simulated workflow run behind
/// the command bar.

pub mod catalog;
pub mod command_bar;
pub mod intent_detector;
pub mod models;
pub mod suggestion_engine;
pub mod workflow_runner;

pub use catalog::{
    find_tool, ActionCategory, DEFAULT_ESTIMATE_SECS, QuickAction, ToolAction, AVAILABLE_TOOLS, EXAMPLE_COMMANDS,
    QUICK_ACTIONS,
};
pub use command_bar::{CommandBar, Key, KeyOutcome, WorkflowHandle};
pub use intent_detector::{detect_intent, IntentDetector};
pub use models::{
    all_completed, estimated_total_seconds, CommandSuggestion, DetectedIntent, StepStatus,
    WorkflowStep,
};
pub use suggestion_engine::{generate_suggestions, SuggestionEngine};
pub use workflow_runner::{changed_steps, WorkflowRunner};
