//! Fuel and rest stop plan.

/// Place names for the fuel and rest stops of one trip, in route order.
///
/// The counts are the lengths of the place lists, so they always agree.
/// Plans built by the planner hold at least one stop of each kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPlan {
    /// Fuel stop place names, ordered by stop index.
    pub fuel_stop_places: Vec<String>,

    /// Rest stop place names, ordered by stop index.
    pub rest_stop_places: Vec<String>,
}

impl StopPlan {
    pub fn fuel_stop_count(&self) -> usize {
        self.fuel_stop_places.len()
    }

    pub fn rest_stop_count(&self) -> usize {
        self.rest_stop_places.len()
    }
}
