/// Simulated workflow execution
///
/// Walks the steps one at a time on timers. Nothing is actually executed;
/// each step goes pending -> processing -> completed and every transition
/// is handed to an observer.

use crate::config::WorkflowSettings;
use crate::error::{PineError, Result};
use crate::palette::models::{StepStatus, WorkflowStep};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct WorkflowRunner {
    start_delay: Duration,
    finish_delay: Duration,
}

impl Default for WorkflowRunner {
    fn default() -> Self {
        Self::new(&WorkflowSettings::default())
    }
}

impl WorkflowRunner {
    pub fn new(settings: &WorkflowSettings) -> Self {
        Self {
            start_delay: settings.step_start_delay(),
            finish_delay: settings.step_finish_delay(),
        }
    }

    /// Run `steps` to completion
    ///
    /// `on_update` sees the initial all-pending snapshot and then one
    /// snapshot per transition. A cancelled token stops the run at the next
    /// timer; no snapshot is published after that.
    ///
    /// # Returns
    /// * `Ok(Vec<WorkflowStep>)` - every step completed
    /// * `Err(PineError::Cancelled)` - token fired mid-run
    pub async fn run<F>(
        &self,
        steps: &[WorkflowStep],
        cancel: &CancellationToken,
        mut on_update: F,
    ) -> Result<Vec<WorkflowStep>>
    where
        F: FnMut(&[WorkflowStep]),
    {
        let mut current: Vec<WorkflowStep> = steps
            .iter()
            .cloned()
            .map(|mut step| {
                step.status = StepStatus::Pending;
                step
            })
            .collect();

        if cancel.is_cancelled() {
            return Err(PineError::Cancelled);
        }
        on_update(&current);

        for index in 0..current.len() {
            self.wait(self.start_delay, cancel).await?;
            Self::mark(&mut current, |i| match i.cmp(&index) {
                std::cmp::Ordering::Less => StepStatus::Completed,
                std::cmp::Ordering::Equal => StepStatus::Processing,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            });
            tracing::debug!(step = %current[index].id, tool = current[index].tool.id, "step processing");
            on_update(&current);

            self.wait(self.finish_delay, cancel).await?;
            Self::mark(&mut current, |i| {
                if i <= index {
                    StepStatus::Completed
                } else {
                    StepStatus::Pending
                }
            });
            tracing::debug!(step = %current[index].id, "step completed");
            on_update(&current);
        }

        Ok(current)
    }

    async fn wait(&self, delay: Duration, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("workflow run cancelled");
                Err(PineError::Cancelled)
            }
            _ = tokio::time::sleep(delay) => Ok(()),
        }
    }

    fn mark(steps: &mut [WorkflowStep], status_for: impl Fn(usize) -> StepStatus) {
        for (i, step) in steps.iter_mut().enumerate() {
            step.status = status_for(i);
        }
    }
}

/// Steps of `current` whose status differs from the same position in
/// `previous`. Positions missing from `previous` count as changed.
pub fn changed_steps<'a>(
    previous: &[WorkflowStep],
    current: &'a [WorkflowStep],
) -> Vec<&'a WorkflowStep> {
    current
        .iter()
        .enumerate()
        .filter(|(i, step)| previous.get(*i).map_or(true, |before| before.status != step.status))
        .map(|(_, step)| step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::intent_detector::detect_intent;
    use tokio::time::Instant;

    fn three_steps() -> Vec<WorkflowStep> {
        detect_intent("resize and compress").unwrap().suggested_workflow
    }

    #[tokio::test(start_paused = true)]
    async fn test_changed_steps_follow_each_transition() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let mut previous: Vec<WorkflowStep> = Vec::new();
        let mut lines: Vec<String> = Vec::new();

        runner
            .run(&three_steps(), &token, |steps| {
                for step in changed_steps(&previous, steps) {
                    lines.push(format!("{} {}", step.id, step.status));
                }
                previous = steps.to_vec();
            })
            .await
            .unwrap();

        assert_eq!(
            lines,
            vec![
                "step-1 pending",
                "step-2 pending",
                "step-3 pending",
                "step-1 processing",
                "step-1 completed",
                "step-2 processing",
                "step-2 completed",
                "step-3 processing",
                "step-3 completed",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_steps_complete() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();

        let done = runner.run(&three_steps(), &token, |_| {}).await.unwrap();

        assert_eq!(done.len(), 3);
        assert!(done.iter().all(|s| s.status == StepStatus::Completed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_steps_complete_in_order() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let mut snapshots: Vec<Vec<StepStatus>> = Vec::new();

        runner
            .run(&three_steps(), &token, |steps| {
                snapshots.push(steps.iter().map(|s| s.status).collect());
            })
            .await
            .unwrap();

        // initial + two per step
        assert_eq!(snapshots.len(), 7);
        assert_eq!(snapshots[0], vec![StepStatus::Pending; 3]);
        assert_eq!(
            snapshots[1],
            vec![StepStatus::Processing, StepStatus::Pending, StepStatus::Pending]
        );
        assert_eq!(
            snapshots[4],
            vec![StepStatus::Completed, StepStatus::Completed, StepStatus::Pending]
        );

        // completed prefix only ever grows
        let mut last_done = 0;
        for snap in &snapshots {
            let done = snap.iter().take_while(|s| **s == StepStatus::Completed).count();
            assert!(done >= last_done);
            assert_eq!(snap.iter().filter(|s| **s == StepStatus::Completed).count(), done);
            last_done = done;
        }
        assert_eq!(last_done, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timing_matches_delays() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let started = Instant::now();

        runner.run(&three_steps(), &token, |_| {}).await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3 * 2000));
        assert!(elapsed < Duration::from_millis(3 * 2000 + 50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_statuses_are_reset_first() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let mut steps = three_steps();
        steps[1].status = StepStatus::Error;

        let mut first = None;
        runner
            .run(&steps, &token, |snap| {
                if first.is_none() {
                    first = Some(snap[1].status);
                }
            })
            .await
            .unwrap();

        assert_eq!(first, Some(StepStatus::Pending));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_updates() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let canceller = token.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(900)).await;
            canceller.cancel();
        });

        let mut updates = 0;
        let result = runner.run(&three_steps(), &token, |_| updates += 1).await;

        assert!(matches!(result, Err(PineError::Cancelled)));
        // initial snapshot + step 1 processing, nothing after the cancel
        assert_eq!(updates, 2);
    }

    #[tokio::test]
    async fn test_empty_workflow() {
        let runner = WorkflowRunner::default();
        let token = CancellationToken::new();
        let done = runner.run(&[], &token, |_| {}).await.unwrap();
        assert!(done.is_empty());
    }
}
