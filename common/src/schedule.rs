// Schedule parsing and fire-time calculation
//
// Two schedule modes are supported: a fixed cron expression, and a daily
// fire time drawn at random once per process start.

use crate::config::ScheduleConfig;
use crate::errors::ScheduleError;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule as CronSchedule;
use rand::Rng;
use std::str::FromStr;

/// When the update task fires.
#[derive(Debug, Clone)]
pub enum Schedule {
    /// Fixed cron expression, evaluated in a timezone.
    Cron { expression: String, timezone: Tz },
    /// Daily at an hour/minute drawn once at construction.
    RandomDaily { hour: u32, minute: u32, timezone: Tz },
}

impl Schedule {
    /// Build the schedule from configuration. The random daily time is drawn
    /// here, so it stays fixed for the lifetime of the process.
    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ScheduleError> {
        let timezone = Tz::from_str(&config.timezone)
            .map_err(|_| ScheduleError::InvalidTimezone(config.timezone.clone()))?;

        match (&config.expression, config.random_daily) {
            (Some(_), true) => Err(ScheduleError::InvalidConfiguration(
                "expression and random_daily are mutually exclusive".to_string(),
            )),
            (Some(expression), false) => {
                // Validate eagerly so a bad expression fails at startup, not
                // at the first fire.
                parse_cron_expression(expression)?;
                Ok(Schedule::Cron {
                    expression: expression.clone(),
                    timezone,
                })
            }
            (None, true) => {
                let mut rng = rand::thread_rng();
                Ok(Schedule::RandomDaily {
                    hour: rng.gen_range(0..24),
                    minute: rng.gen_range(0..60),
                    timezone,
                })
            }
            (None, false) => Err(ScheduleError::InvalidConfiguration(
                "either expression or random_daily must be set".to_string(),
            )),
        }
    }

    pub fn timezone(&self) -> Tz {
        match self {
            Schedule::Cron { timezone, .. } | Schedule::RandomDaily { timezone, .. } => *timezone,
        }
    }

    /// The cron expression this schedule evaluates; the random daily time
    /// materializes as a fixed daily expression.
    pub fn cron_expression(&self) -> String {
        match self {
            Schedule::Cron { expression, .. } => expression.clone(),
            Schedule::RandomDaily { hour, minute, .. } => format!("0 {minute} {hour} * * *"),
        }
    }

    /// Next fire time strictly after `after`, in UTC. The expression is
    /// evaluated in the schedule's timezone.
    pub fn next_fire_time(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        let expression = self.cron_expression();
        let schedule = parse_cron_expression(&expression)?;

        let after_in_tz = after.with_timezone(&self.timezone());
        let next_in_tz =
            schedule
                .after(&after_in_tz)
                .next()
                .ok_or_else(|| ScheduleError::NoNextFireTime {
                    expression: expression.clone(),
                })?;

        Ok(next_in_tz.with_timezone(&Utc))
    }
}

/// Parse and validate a cron expression (second-precision syntax)
pub fn parse_cron_expression(expression: &str) -> Result<CronSchedule, ScheduleError> {
    CronSchedule::from_str(expression).map_err(|e| ScheduleError::InvalidCronExpression {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}
