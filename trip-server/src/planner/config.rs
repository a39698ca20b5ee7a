//! Hours-of-Service limits and planning parameters.

use super::error::PlanError;

/// Configuration parameters for trip planning.
///
/// The defaults are the simplified FMCSA limits: refuel every 1000 miles,
/// a break every 8 hours, at most 11 hours driving and 14 hours on duty
/// per day, and 10 hours off duty.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Miles between fuel stops.
    pub fuel_interval_miles: f64,

    /// Hours between rest breaks.
    pub rest_interval_hours: f64,

    /// Maximum driving hours per day.
    pub max_driving_hours: f64,

    /// Maximum on-duty hours per day.
    pub max_on_duty_hours: f64,

    /// Non-driving on-duty time per day (inspection, loading, breaks).
    pub on_duty_overhead_hours: f64,

    /// Off-duty hours logged per day.
    pub off_duty_hours: f64,

    /// Sleeper berth hours logged per day.
    pub sleeper_hours: f64,

    /// Time added to the route duration for pickup and drop-off.
    pub handling_allowance_hours: f64,

    /// Maximum number of reverse lookups in flight at once.
    pub lookup_batch_size: usize,
}

impl PlannerConfig {
    /// Check the limits describe a schedule that can make progress.
    pub fn validate(&self) -> Result<(), PlanError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.fuel_interval_miles) {
            return Err(PlanError::InvalidConfig(
                "fuel interval must be a positive number of miles",
            ));
        }
        if !positive(self.rest_interval_hours) {
            return Err(PlanError::InvalidConfig(
                "rest interval must be a positive number of hours",
            ));
        }
        if !positive(self.max_driving_hours) {
            return Err(PlanError::InvalidConfig(
                "daily driving limit must be positive",
            ));
        }
        if !non_negative(self.max_on_duty_hours) || self.max_on_duty_hours < self.max_driving_hours
        {
            return Err(PlanError::InvalidConfig(
                "daily on-duty limit must cover the driving limit",
            ));
        }
        if !non_negative(self.on_duty_overhead_hours)
            || !non_negative(self.off_duty_hours)
            || !non_negative(self.sleeper_hours)
            || !non_negative(self.handling_allowance_hours)
        {
            return Err(PlanError::InvalidConfig(
                "overhead, off-duty, sleeper and allowance hours must not be negative",
            ));
        }
        if self.lookup_batch_size == 0 {
            return Err(PlanError::InvalidConfig("lookup batch size must be at least 1"));
        }

        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fuel_interval_miles: 1000.0,
            rest_interval_hours: 8.0,
            max_driving_hours: 11.0,
            max_on_duty_hours: 14.0,
            on_duty_overhead_hours: 3.0,
            off_duty_hours: 10.0,
            sleeper_hours: 0.0,
            handling_allowance_hours: 2.0, // 1 h pickup + 1 h drop-off
            lookup_batch_size: 8,
        }
    }
}
