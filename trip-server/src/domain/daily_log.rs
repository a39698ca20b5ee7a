//! Daily Hours-of-Service log entries.

use chrono::NaiveDate;

/// One calendar day of a driver's duty log.
///
/// Built in date order by the schedule builder; `on_duty_hours` always
/// covers `driving_hours`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLog {
    /// Calendar day this entry covers.
    pub date: NaiveDate,

    /// Hours behind the wheel.
    pub driving_hours: f64,

    /// Hours on duty, driving included.
    pub on_duty_hours: f64,

    /// Hours off duty.
    pub off_duty_hours: f64,

    /// Hours in the sleeper berth.
    pub sleeper_hours: f64,
}

impl DailyLog {
    /// On-duty time spent not driving (inspection, loading, breaks).
    pub fn on_duty_not_driving_hours(&self) -> f64 {
        self.on_duty_hours - self.driving_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_duty_not_driving() {
        let log = DailyLog {
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            driving_hours: 9.5,
            on_duty_hours: 12.5,
            off_duty_hours: 10.0,
            sleeper_hours: 0.0,
        };

        assert_eq!(log.on_duty_not_driving_hours(), 3.0);
    }
}
