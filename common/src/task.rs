// Update-and-publish task: one read-increment-write-commit-push cycle

use crate::config::TimestampFormat;
use crate::counter::CounterFile;
use crate::errors::TaskError;
use crate::git::Publisher;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of one successful execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub previous: u64,
    pub value: u64,
    pub message: String,
}

/// The unit of work the scheduler fires.
///
/// Steps are strictly sequential with no partial-success recovery: a commit
/// failure leaves the incremented value on disk uncommitted (the next run
/// absorbs it, since only the file content is committed, not the delta), and
/// a push failure leaves the local commit un-pushed.
pub struct UpdateTask {
    counter: CounterFile,
    publisher: Arc<dyn Publisher>,
    message_prefix: String,
    timestamp: TimestampFormat,
}

impl UpdateTask {
    pub fn new(
        counter: CounterFile,
        publisher: Arc<dyn Publisher>,
        message_prefix: impl Into<String>,
        timestamp: TimestampFormat,
    ) -> Self {
        Self {
            counter,
            publisher,
            message_prefix: message_prefix.into(),
            timestamp,
        }
    }

    #[instrument(skip(self))]
    pub async fn run_once(&self) -> Result<TaskOutcome, TaskError> {
        // Read failures abort before any mutation.
        let previous = self.counter.read()?;
        let value = previous + 1;
        self.counter.write(value)?;

        let message = self.commit_message(Local::now());
        self.publisher.commit(&message).await?;
        self.publisher.push().await?;

        info!(previous, value, message = %message, "Counter advanced and published");
        Ok(TaskOutcome {
            previous,
            value,
            message,
        })
    }

    fn commit_message(&self, now: DateTime<Local>) -> String {
        format!(
            "{}{}",
            self.message_prefix,
            now.format(self.timestamp.strftime())
        )
    }
}
