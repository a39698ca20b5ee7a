//! In-memory trip storage.
//!
//! Holds planned trips and their daily logs for the lifetime of the
//! process. Logs belong to exactly one trip and are removed with it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{DailyLog, TripId, TripRecord, TripRequest};

/// Errors from store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("trip {0} not found")]
    TripNotFound(TripId),
}

/// A trip together with its logs, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTrip {
    pub record: TripRecord,
    pub logs: Vec<DailyLog>,
}

#[derive(Debug, Default)]
struct StoreState {
    next_id: u64,
    trips: BTreeMap<TripId, StoredTrip>,
}

/// Thread-safe trip store.
///
/// Cheap to clone; clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct TripStore {
    inner: Arc<RwLock<StoreState>>,
}

impl TripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new trip with its logs, in emission order, and return it.
    ///
    /// The record and its logs are written under one lock. Ids start at 1
    /// and are never reused.
    pub async fn create_trip(&self, request: &TripRequest, logs: &[DailyLog]) -> TripRecord {
        let mut guard = self.inner.write().await;
        guard.next_id += 1;

        let record = TripRecord {
            id: TripId(guard.next_id),
            current_location: request.current_location,
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            cycle_hours: request.cycle_hours,
            created_at: Utc::now(),
        };

        guard.trips.insert(
            record.id,
            StoredTrip {
                record: record.clone(),
                logs: logs.to_vec(),
            },
        );

        record
    }

    /// Look up a trip with its logs.
    pub async fn get(&self, id: TripId) -> Option<StoredTrip> {
        let guard = self.inner.read().await;
        guard.trips.get(&id).cloned()
    }

    /// All trip records, newest first.
    pub async fn list(&self) -> Vec<TripRecord> {
        let guard = self.inner.read().await;
        guard
            .trips
            .values()
            .rev()
            .map(|t| t.record.clone())
            .collect()
    }

    /// Remove a trip and all of its logs.
    pub async fn delete(&self, id: TripId) -> Result<StoredTrip, StoreError> {
        let mut guard = self.inner.write().await;
        guard.trips.remove(&id).ok_or(StoreError::TripNotFound(id))
    }

    /// Number of stored trips.
    pub async fn len(&self) -> usize {
        self.inner.read().await.trips.len()
    }

    /// Check if the store holds no trips.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.trips.is_empty()
    }
}
