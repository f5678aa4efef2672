// Scheduler engine: fires the update task on its cron schedule

use crate::errors::ScheduleError;
use crate::lock::ExecutionSlot;
use crate::schedule::Schedule;
use crate::task::UpdateTask;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Drives the update task: sleeps until the next fire time, runs the task,
/// repeats until stopped.
///
/// Failure policy: every execution error is logged and discarded here. A
/// failed execution never suppresses, retries, or re-triggers scheduling;
/// the next fire happens on schedule regardless of prior outcome.
pub struct SchedulerEngine {
    schedule: Schedule,
    task: Arc<UpdateTask>,
    slot: ExecutionSlot,
    shutdown_tx: tokio::sync::broadcast::Sender<()>,
}

impl SchedulerEngine {
    pub fn new(schedule: Schedule, task: Arc<UpdateTask>) -> Self {
        let (shutdown_tx, _shutdown_rx) = tokio::sync::broadcast::channel(1);

        Self {
            schedule,
            task,
            slot: ExecutionSlot::new(),
            shutdown_tx,
        }
    }

    /// Get a shutdown signal receiver
    pub fn shutdown_receiver(&self) -> tokio::sync::broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Run the fire loop until a shutdown signal arrives.
    pub async fn start(&self) -> Result<(), ScheduleError> {
        info!(
            expression = %self.schedule.cron_expression(),
            timezone = %self.schedule.timezone(),
            "Starting scheduler engine"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            let now = Utc::now();
            let next = self.schedule.next_fire_time(now)?;
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);

            debug!(
                next_fire = %next,
                wait_seconds = wait.as_secs(),
                "Sleeping until next fire"
            );

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    self.fire();
                }
                _ = shutdown_rx.recv() => {
                    info!("Shutdown signal received, stopping scheduler");
                    break;
                }
            }
        }

        // Let an in-flight execution finish before returning.
        loop {
            match self.slot.try_acquire() {
                Some(_) => break,
                None => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        info!("Scheduler engine stopped");
        Ok(())
    }

    /// Fire one execution without blocking the timer. A fire that overlaps a
    /// still-running execution is skipped, never queued.
    fn fire(&self) {
        let Some(guard) = self.slot.try_acquire() else {
            warn!("Previous execution still running, skipping this fire");
            return;
        };

        let task = self.task.clone();
        tokio::spawn(async move {
            let _guard = guard;
            match task.run_once().await {
                Ok(outcome) => {
                    info!(
                        previous = outcome.previous,
                        value = outcome.value,
                        message = %outcome.message,
                        "Scheduled execution succeeded"
                    );
                }
                Err(e) => {
                    error!(error = %e, "Scheduled execution failed");
                }
            }
        });
    }

    /// Signal the fire loop to stop after the current sleep or execution.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }
}
