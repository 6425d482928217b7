/// Command bar session
///
/// Holds what the palette dialog shows: the query, the highlighted
/// suggestion, whether the workflow preview is open, and the steps of the
/// run in progress. Runs happen on a tokio task and are cancelled by
/// `reset()`, so a reopened bar never sees updates from an old run.
/// Hosts that redraw on every transition can follow a run through
/// `watch_steps()`.

use crate::config::WorkflowSettings;
use crate::error::{PineError, Result};
use crate::palette::catalog::QuickAction;
use crate::palette::intent_detector::IntentDetector;
use crate::palette::models::{
    all_completed, estimated_total_seconds, CommandSuggestion, DetectedIntent, StepStatus,
    WorkflowStep,
};
use crate::palette::suggestion_engine::SuggestionEngine;
use crate::palette::workflow_runner::WorkflowRunner;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Keys the command bar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Tab,
    Enter,
    Escape,
}

impl FromStr for Key {
    type Err = PineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ArrowDown" => Ok(Key::ArrowDown),
            "ArrowUp" => Ok(Key::ArrowUp),
            "Tab" => Ok(Key::Tab),
            "Enter" => Ok(Key::Enter),
            "Escape" => Ok(Key::Escape),
            other => Err(PineError::InvalidInput(format!("unsupported key '{}'", other))),
        }
    }
}

/// What a key press did
#[derive(Debug)]
pub enum KeyOutcome {
    /// Not consumed; the caller's default handling applies
    Unhandled,
    Handled,
    /// Enter on an open preview started a run
    Started(WorkflowHandle),
}

impl KeyOutcome {
    pub fn is_handled(&self) -> bool {
        !matches!(self, KeyOutcome::Unhandled)
    }
}

/// A background workflow run
#[derive(Debug)]
pub struct WorkflowHandle {
    task: JoinHandle<Result<Vec<WorkflowStep>>>,
}

impl WorkflowHandle {
    /// Wait for the run to end
    pub async fn finished(self) -> Result<Vec<WorkflowStep>> {
        self.task
            .await
            .map_err(|e| PineError::Generic(format!("workflow task failed: {}", e)))?
    }
}

#[derive(Debug)]
struct Execution {
    steps: Vec<WorkflowStep>,
    is_processing: bool,
    updates: watch::Sender<Vec<WorkflowStep>>,
}

impl Execution {
    fn new() -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            steps: Vec::new(),
            is_processing: false,
            updates,
        }
    }

    /// Store a snapshot and wake anyone watching
    fn publish(&mut self, steps: Vec<WorkflowStep>) {
        self.updates.send_replace(steps.clone());
        self.steps = steps;
    }
}

pub struct CommandBar {
    query: String,
    selected_index: usize,
    show_preview: bool,
    detector: IntentDetector,
    suggestion_engine: SuggestionEngine,
    runner: WorkflowRunner,
    execution: Arc<Mutex<Execution>>,
    session: CancellationToken,
    current_run: Option<CancellationToken>,
}

impl Default for CommandBar {
    fn default() -> Self {
        Self::new(&WorkflowSettings::default())
    }
}

impl CommandBar {
    pub fn new(settings: &WorkflowSettings) -> Self {
        Self {
            query: String::new(),
            selected_index: 0,
            show_preview: false,
            detector: IntentDetector::default(),
            suggestion_engine: SuggestionEngine::default(),
            runner: WorkflowRunner::new(settings),
            execution: Arc::new(Mutex::new(Execution::new())),
            session: CancellationToken::new(),
            current_run: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query. Resets the highlight and closes the preview.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected_index = 0;
        self.show_preview = false;
    }

    pub fn apply_quick_action(&mut self, action: &QuickAction) {
        self.set_query(action.command);
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn set_show_preview(&mut self, show: bool) {
        self.show_preview = show;
    }

    pub fn detected_intent(&self) -> Option<DetectedIntent> {
        self.detector.detect(&self.query)
    }

    pub fn suggestions(&self) -> Vec<CommandSuggestion> {
        self.suggestion_engine.generate_suggestions(&self.query)
    }

    /// Snapshot of the current run's steps
    pub fn execution_steps(&self) -> Vec<WorkflowStep> {
        lock(&self.execution).steps.clone()
    }

    pub fn is_processing(&self) -> bool {
        lock(&self.execution).is_processing
    }

    /// Follow the execution steps. The receiver sees every snapshot the
    /// bar stores from now on, including the clear done by `reset()`.
    pub fn watch_steps(&self) -> watch::Receiver<Vec<WorkflowStep>> {
        lock(&self.execution).updates.subscribe()
    }

    /// What the workflow preview lists: the current run's steps, or the
    /// detected intent's suggested workflow when nothing has run yet
    pub fn display_steps(&self) -> Vec<WorkflowStep> {
        let steps = self.execution_steps();
        if !steps.is_empty() {
            return steps;
        }
        self.detected_intent()
            .map(|intent| intent.suggested_workflow)
            .unwrap_or_default()
    }

    /// Estimated seconds for the steps in the preview
    pub fn estimated_seconds(&self) -> u32 {
        estimated_total_seconds(&self.display_steps())
    }

    /// Whether the preview offers to execute: idle and not already done
    pub fn can_execute(&self) -> bool {
        !self.is_processing() && !all_completed(&self.display_steps())
    }

    /// Keyboard handling for the palette
    ///
    /// Enter may start a run, which spawns onto the current tokio runtime.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        let suggestions = self.suggestions();
        let total = suggestions.len();
        let modulus = total.max(1);

        match key {
            Key::ArrowDown => {
                self.selected_index = (self.selected_index + 1) % modulus;
                KeyOutcome::Handled
            }
            Key::ArrowUp => {
                self.selected_index = (self.selected_index + total).saturating_sub(1) % modulus;
                KeyOutcome::Handled
            }
            Key::Tab => {
                if self.detected_intent().is_some_and(|intent| intent.has_tools()) {
                    self.show_preview = true;
                }
                KeyOutcome::Handled
            }
            Key::Enter => {
                if self.show_preview {
                    if let Some(intent) = self.detected_intent() {
                        let handle = self.execute_workflow(intent.suggested_workflow);
                        return KeyOutcome::Started(handle);
                    }
                }
                if let Some(suggestion) = suggestions.get(self.selected_index) {
                    // keeps the highlight where it was
                    self.query = suggestion.text.clone();
                    self.show_preview = true;
                }
                KeyOutcome::Handled
            }
            Key::Escape => {
                if self.show_preview {
                    self.show_preview = false;
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Unhandled
                }
            }
        }
    }

    /// Start a simulated run of `steps` in the background
    ///
    /// A run already in progress is cancelled first. The steps are stored
    /// as pending before this returns, ahead of the first timer.
    pub fn execute_workflow(&mut self, steps: Vec<WorkflowStep>) -> WorkflowHandle {
        let run_token = self.session.child_token();
        {
            let mut execution = lock(&self.execution);
            if let Some(previous) = self.current_run.replace(run_token.clone()) {
                previous.cancel();
            }
            execution.is_processing = true;
            execution.publish(
                steps
                    .iter()
                    .cloned()
                    .map(|mut step| {
                        step.status = StepStatus::Pending;
                        step
                    })
                    .collect(),
            );
        }
        self.show_preview = true;

        tracing::info!(steps = steps.len(), "starting workflow run");

        let runner = self.runner.clone();
        let shared = Arc::clone(&self.execution);

        let task = tokio::spawn(async move {
            let publish_to = Arc::clone(&shared);
            let publish_token = run_token.clone();

            let result = runner
                .run(&steps, &run_token, |snapshot| {
                    // checked under the lock so a reset can't interleave
                    let mut execution = lock(&publish_to);
                    if !publish_token.is_cancelled() {
                        execution.publish(snapshot.to_vec());
                    }
                })
                .await;

            let mut execution = lock(&shared);
            if !run_token.is_cancelled() {
                execution.is_processing = false;
            }
            result
        });

        WorkflowHandle { task }
    }

    /// Clear the session and cancel any run in flight
    pub fn reset(&mut self) {
        {
            let mut execution = lock(&self.execution);
            self.session.cancel();
            execution.publish(Vec::new());
            execution.is_processing = false;
        }
        self.session = CancellationToken::new();
        self.current_run = None;
        self.query.clear();
        self.selected_index = 0;
        self.show_preview = false;
    }
}

impl Drop for CommandBar {
    fn drop(&mut self) {
        self.session.cancel();
    }
}

fn lock(execution: &Mutex<Execution>) -> MutexGuard<'_, Execution> {
    execution.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::catalog::QUICK_ACTIONS;
    use std::time::Duration;

    #[test]
    fn test_set_query_resets_navigation() {
        let mut bar = CommandBar::default();
        bar.set_selected_index(3);
        bar.set_show_preview(true);

        bar.set_query("resize");

        assert_eq!(bar.query(), "resize");
        assert_eq!(bar.selected_index(), 0);
        assert!(!bar.show_preview());
    }

    #[test]
    fn test_arrow_navigation_wraps() {
        let mut bar = CommandBar::default();
        // empty query: four featured examples
        assert_eq!(bar.suggestions().len(), 4);

        bar.handle_key(Key::ArrowUp);
        assert_eq!(bar.selected_index(), 3);

        bar.handle_key(Key::ArrowDown);
        assert_eq!(bar.selected_index(), 0);

        for _ in 0..5 {
            bar.handle_key(Key::ArrowDown);
        }
        assert_eq!(bar.selected_index(), 1);
    }

    #[test]
    fn test_arrows_with_no_suggestions_stay_at_zero() {
        let mut bar = CommandBar::default();
        bar.set_query("qqqq");
        assert!(bar.suggestions().is_empty());

        bar.handle_key(Key::ArrowUp);
        assert_eq!(bar.selected_index(), 0);
        bar.handle_key(Key::ArrowDown);
        assert_eq!(bar.selected_index(), 0);
    }

    #[test]
    fn test_tab_needs_matched_tools() {
        let mut bar = CommandBar::default();
        bar.set_query("hello there");
        bar.handle_key(Key::Tab);
        assert!(!bar.show_preview());

        bar.set_query("translate this");
        bar.handle_key(Key::Tab);
        assert!(bar.show_preview());
    }

    #[test]
    fn test_enter_picks_suggestion() {
        let mut bar = CommandBar::default();
        bar.handle_key(Key::ArrowDown);

        let outcome = bar.handle_key(Key::Enter);

        assert!(outcome.is_handled());
        assert_eq!(bar.query(), crate::palette::EXAMPLE_COMMANDS[1]);
        assert!(bar.show_preview());
        assert_eq!(bar.selected_index(), 1);
    }

    #[test]
    fn test_escape_closes_preview_only_when_open() {
        let mut bar = CommandBar::default();
        assert!(!bar.handle_key(Key::Escape).is_handled());

        bar.set_show_preview(true);
        assert!(bar.handle_key(Key::Escape).is_handled());
        assert!(!bar.show_preview());
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("Enter".parse::<Key>().unwrap(), Key::Enter);
        assert!("Space".parse::<Key>().is_err());
    }

    #[test]
    fn test_quick_action_prefills_query() {
        let mut bar = CommandBar::default();
        bar.apply_quick_action(&QUICK_ACTIONS[2]);
        let intent = bar.detected_intent().unwrap();
        assert!(intent.required_tools.iter().any(|t| t.id == "image-resize"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_on_preview_runs_workflow() {
        let mut bar = CommandBar::default();
        bar.set_query("resize and compress");
        bar.handle_key(Key::Tab);

        let handle = match bar.handle_key(Key::Enter) {
            KeyOutcome::Started(handle) => handle,
            other => panic!("Expected a started run, got {:?}", other),
        };
        assert!(bar.is_processing());

        let done = handle.finished().await.unwrap();
        assert_eq!(done.len(), 3);
        assert!(!bar.is_processing());
        assert!(bar
            .execution_steps()
            .iter()
            .all(|s| s.status == StepStatus::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_drops_stale_updates() {
        let mut bar = CommandBar::default();
        bar.set_query("resize and compress");
        let steps = bar.detected_intent().unwrap().suggested_workflow;
        let handle = bar.execute_workflow(steps);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(bar.execution_steps()[0].status, StepStatus::Processing);

        bar.reset();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(bar.execution_steps().is_empty());
        assert!(!bar.is_processing());
        assert!(matches!(handle.finished().await, Err(PineError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_run_cancels_previous() {
        let mut bar = CommandBar::default();
        bar.set_query("resize");
        let steps = bar.detected_intent().unwrap().suggested_workflow;

        let first = bar.execute_workflow(steps.clone());
        let second = bar.execute_workflow(steps);

        assert!(matches!(first.finished().await, Err(PineError::Cancelled)));
        assert!(second.finished().await.is_ok());
        assert!(!bar.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_are_pending_as_soon_as_run_starts() {
        let mut bar = CommandBar::default();
        bar.set_query("resize and compress");
        let mut steps = bar.detected_intent().unwrap().suggested_workflow;
        steps[1].status = StepStatus::Completed;

        let _handle = bar.execute_workflow(steps);

        // nothing has been polled yet
        let shown = bar.execution_steps();
        assert_eq!(shown.len(), 3);
        assert!(shown.iter().all(|s| s.status == StepStatus::Pending));
        assert!(bar.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_sees_every_transition() {
        let mut bar = CommandBar::default();
        bar.set_query("resize");
        let steps = bar.detected_intent().unwrap().suggested_workflow;

        let mut updates = bar.watch_steps();
        let handle = bar.execute_workflow(steps);

        let mut seen = vec![updates.borrow_and_update()[0].status];
        while seen.last() != Some(&StepStatus::Completed) {
            updates.changed().await.unwrap();
            let status = updates.borrow_and_update()[0].status;
            if seen.last() != Some(&status) {
                seen.push(status);
            }
        }

        assert_eq!(
            seen,
            vec![StepStatus::Pending, StepStatus::Processing, StepStatus::Completed]
        );
        assert!(handle.finished().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_steps_prefers_the_run() {
        let mut bar = CommandBar::default();
        bar.set_query("batch resize");
        assert!(bar.execution_steps().is_empty());

        // before a run: the suggested workflow, "varies" counted as 5
        let preview = bar.display_steps();
        let ids: Vec<_> = preview.iter().map(|s| s.tool.id).collect();
        assert_eq!(ids, vec!["image-resize", "batch-process"]);
        assert_eq!(bar.estimated_seconds(), 2 + 5);
        assert!(bar.can_execute());

        let handle = bar.execute_workflow(preview);
        assert!(!bar.can_execute());
        handle.finished().await.unwrap();

        assert!(bar.display_steps().iter().all(|s| s.status == StepStatus::Completed));
        assert!(!bar.can_execute());
    }
}
