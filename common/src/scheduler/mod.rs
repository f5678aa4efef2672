// Scheduler module hosting the fire loop

pub mod engine;

pub use engine::SchedulerEngine;
