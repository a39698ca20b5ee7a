//! Askama templates for the HTML log sheet.

use askama::Template;

use crate::domain::{DailyLog, TripRecord};
use crate::planner::TripPlan;

/// Planned trip with its daily log sheet.
#[derive(Template)]
#[template(path = "trip_plan.html")]
pub struct TripPlanTemplate {
    pub trip_id: u64,
    pub pickup: String,
    pub dropoff: String,
    pub distance: String,
    pub duration: String,
    pub total_days: u32,
    pub fuel_stops: Vec<String>,
    pub rest_stops: Vec<String>,
    pub logs: Vec<LogView>,
}

impl TripPlanTemplate {
    /// Create from a plan and the record it was stored under.
    pub fn from_plan(record: &TripRecord, plan: &TripPlan) -> Self {
        Self {
            trip_id: record.id.0,
            pickup: record.pickup_location.to_string(),
            dropoff: record.dropoff_location.to_string(),
            distance: plan.distance_display(),
            duration: plan.duration_display(),
            total_days: plan.total_days,
            fuel_stops: plan.stops.fuel_stop_places.clone(),
            rest_stops: plan.stops.rest_stop_places.clone(),
            logs: plan.logs.iter().map(LogView::from_log).collect(),
        }
    }
}

/// One row of the log sheet.
#[derive(Debug, Clone)]
pub struct LogView {
    pub date: String,
    pub driving: String,
    pub on_duty_not_driving: String,
    pub on_duty: String,
    pub off_duty: String,
    pub sleeper: String,
}

impl LogView {
    /// Create from a daily log.
    pub fn from_log(log: &DailyLog) -> Self {
        Self {
            date: log.date.format("%a %Y-%m-%d").to_string(),
            driving: hours(log.driving_hours),
            on_duty_not_driving: hours(log.on_duty_not_driving_hours()),
            on_duty: hours(log.on_duty_hours),
            off_duty: hours(log.off_duty_hours),
            sleeper: hours(log.sleeper_hours),
        }
    }
}

fn hours(h: f64) -> String {
    format!("{h:.2}")
}
