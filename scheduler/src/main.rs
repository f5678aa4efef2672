// Scheduler binary entry point

use anyhow::Context;
use common::config::Settings;
use common::counter::CounterFile;
use common::git::GitPublisher;
use common::schedule::Schedule;
use common::scheduler::SchedulerEngine;
use common::task::UpdateTask;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging with JSON format
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduler=info,common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting counter update-and-publish scheduler");

    // Load configuration
    let settings = Settings::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;
    settings
        .validate()
        .map_err(|reason| anyhow::anyhow!("Invalid configuration: {reason}"))?;

    info!(
        counter_file = %settings.counter.path.display(),
        repo_dir = %settings.git.repo_dir.display(),
        remote = %settings.git.remote,
        "Configuration loaded"
    );

    // Build the schedule; the random daily time is drawn here, once.
    let schedule = Schedule::from_config(&settings.schedule).context("Invalid schedule")?;
    if let Schedule::RandomDaily { hour, minute, .. } = &schedule {
        info!(hour, minute, "Random daily fire time drawn");
    }

    // The counter store and git both address the same file; resolve a
    // relative counter path against the repository directory.
    let counter_path: PathBuf = if settings.counter.path.is_absolute() {
        settings.counter.path.clone()
    } else {
        settings.git.repo_dir.join(&settings.counter.path)
    };

    let counter = CounterFile::new(counter_path.clone());
    let publisher = Arc::new(GitPublisher::new(&settings.git, counter_path));
    let task = Arc::new(UpdateTask::new(
        counter,
        publisher,
        settings.git.commit_message_prefix.clone(),
        settings.git.timestamp,
    ));

    let engine = Arc::new(SchedulerEngine::new(schedule, task));
    info!("Scheduler engine created");

    // Set up graceful shutdown on Ctrl+C
    let engine_for_shutdown = engine.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C signal, initiating graceful shutdown");
        engine_for_shutdown.stop();
    });

    // Run until signalled; individual task failures never end the process.
    engine.start().await.context("Scheduler error")?;

    info!("Scheduler stopped");
    Ok(())
}
