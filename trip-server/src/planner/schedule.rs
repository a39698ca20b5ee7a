//! Daily log schedule.
//!
//! Splits the trip's total hours into consecutive calendar days. Each day
//! drives as much of the remaining time as the daily limit allows, so the
//! driving hours across all days add back up to the total.

use chrono::{Days, NaiveDate};

use crate::domain::DailyLog;

use super::config::PlannerConfig;
use super::error::PlanError;

/// Most daily logs one schedule may hold (about ten years).
pub const MAX_SCHEDULE_DAYS: usize = 3660;

/// Build the daily logs for a trip of `total_hours`, starting on `start_date`.
///
/// `total_hours` should already include the pickup/drop-off allowance.
/// Produces one entry per day with no gaps, at most
/// `ceil(total_hours / max_driving_hours)` entries. Pure: the same inputs
/// always give the same logs. Totals that would need more than
/// [`MAX_SCHEDULE_DAYS`] entries are rejected up front.
pub fn build_schedule(
    total_hours: f64,
    start_date: NaiveDate,
    config: &PlannerConfig,
) -> Result<Vec<DailyLog>, PlanError> {
    config.validate()?;

    if !total_hours.is_finite() || total_hours <= 0.0 {
        return Err(PlanError::InvalidDuration(total_hours));
    }
    if (total_hours / config.max_driving_hours).ceil() > MAX_SCHEDULE_DAYS as f64 {
        return Err(PlanError::ScheduleTooLong {
            hours: total_hours,
            max_days: MAX_SCHEDULE_DAYS,
        });
    }

    let mut logs = Vec::new();
    let mut remaining_hours = total_hours;
    let mut current_date = start_date;

    while remaining_hours > 0.0 {
        let driving_hours = remaining_hours.min(config.max_driving_hours);
        let on_duty_hours =
            (driving_hours + config.on_duty_overhead_hours).min(config.max_on_duty_hours);

        logs.push(DailyLog {
            date: current_date,
            driving_hours,
            on_duty_hours,
            off_duty_hours: config.off_duty_hours,
            sleeper_hours: config.sleeper_hours,
        });

        remaining_hours -= driving_hours;

        if remaining_hours > 0.0 {
            current_date = current_date
                .checked_add_days(Days::new(1))
                .ok_or(PlanError::DateOutOfRange(current_date))?;
        }
    }

    Ok(logs)
}
