// Error handling framework

use std::path::PathBuf;
use thiserror::Error;

/// Schedule-related errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCronExpression { expression: String, reason: String },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid schedule configuration: {0}")]
    InvalidConfiguration(String),

    #[error("No next fire time for cron expression '{expression}'")]
    NoNextFireTime { expression: String },
}

/// Counter file errors
#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Counter file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Counter file {} does not contain an integer: {content:?}", .path.display())]
    Parse { path: PathBuf, content: String },

    #[error("Failed to {action} counter file {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from driving the git command line
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Environment variable {variable} is not set; cannot authenticate push")]
    MissingToken { variable: String },
}

/// Errors from a single update-and-publish execution
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error(transparent)]
    Git(#[from] GitError),
}
