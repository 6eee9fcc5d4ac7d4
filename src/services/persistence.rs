// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Save and restore the workout store through a durable slot.
//!
//! The whole store is written as one JSON array under [`keys::WORKOUTS`].
//! Restoring dispatches on each entry's `kind` tag and rebuilds a typed
//! [`crate::models::Workout`], re-deriving pace/speed from the base fields.
//!
//! Load policy:
//! - empty slot: empty store
//! - slot that is not a JSON array: the load fails
//! - individual malformed entries (unknown kind, bad fields, values that
//!   fail the workout rules, repeated id): skipped, logged, and listed in
//!   [`LoadReport::skipped`]

use std::collections::HashSet;

use crate::db::{keys, KeyValueStore, StorageError};
use crate::models::WorkoutRecord;
use crate::services::factory;
use crate::services::store::WorkoutStore;

/// Relative difference above which a stored metric is reported as stale.
const METRIC_TOLERANCE: f64 = 1e-9;

/// Persistence errors that abort a whole operation.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize workouts: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Stored workouts are corrupt: {0}")]
    Corrupt(String),
}

/// A persisted entry that could not be restored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Skipped stored workout #{index} (id {id:?}): {reason}")]
pub struct CorruptEntry {
    /// Position in the stored array
    pub index: usize,
    /// The entry's id, when one could be read
    pub id: Option<String>,
    pub reason: String,
}

/// Result of [`PersistenceGateway::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub store: WorkoutStore,
    pub skipped: Vec<CorruptEntry>,
}

/// Serializes the store to a durable slot and restores it.
pub struct PersistenceGateway {
    storage: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new<S: KeyValueStore + 'static>(storage: S) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Write every workout, in store order, to the slot.
    pub fn save(&mut self, store: &WorkoutStore) -> Result<(), PersistenceError> {
        let records: Vec<WorkoutRecord> = store.all().iter().map(WorkoutRecord::from).collect();
        let json = serde_json::to_string(&records).map_err(PersistenceError::Serialize)?;

        self.storage.set(keys::WORKOUTS, &json)?;

        tracing::debug!(count = records.len(), bytes = json.len(), "Saved workouts");
        Ok(())
    }

    /// Read the slot and rebuild the store.
    pub fn load(&self) -> Result<LoadReport, PersistenceError> {
        let Some(json) = self.storage.get(keys::WORKOUTS)? else {
            tracing::debug!("No stored workouts");
            return Ok(LoadReport::default());
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)
            .map_err(|e| PersistenceError::Corrupt(format!("expected a JSON array: {}", e)))?;

        let mut workouts = Vec::with_capacity(entries.len());
        let mut skipped = Vec::new();
        let mut seen = HashSet::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let id = entry
                .get("id")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let record: WorkoutRecord = match serde_json::from_value(entry) {
                Ok(record) => record,
                Err(e) => {
                    skipped.push(CorruptEntry {
                        index,
                        id,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if let Err(e) = factory::validate(
                record.details.kind(),
                record.distance_km,
                record.duration_min,
                record.details.extra(),
            ) {
                skipped.push(CorruptEntry {
                    index,
                    id,
                    reason: e.to_string(),
                });
                continue;
            }

            if !seen.insert(record.id.clone()) {
                skipped.push(CorruptEntry {
                    index,
                    id,
                    reason: "duplicate id".to_string(),
                });
                continue;
            }

            let stored_metric = record.details.stored_metric();
            let workout = record.into_workout();

            if let Some(stored) = stored_metric {
                let derived = workout.details().metric();
                if (stored - derived).abs() > METRIC_TOLERANCE * derived.abs().max(1.0) {
                    tracing::warn!(
                        workout_id = %workout.id(),
                        stored,
                        derived,
                        "Stored metric disagrees with base fields; using derived value"
                    );
                }
            }

            workouts.push(workout);
        }

        for entry in &skipped {
            tracing::warn!(
                index = entry.index,
                workout_id = ?entry.id,
                reason = %entry.reason,
                "Skipping corrupt stored workout"
            );
        }

        let mut store = WorkoutStore::new();
        store
            .replace_all(workouts)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

        tracing::info!(
            count = store.len(),
            skipped = skipped.len(),
            "Loaded workouts"
        );
        Ok(LoadReport { store, skipped })
    }

    /// Delete the slot. Safe to call when nothing is stored.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        self.storage.remove(keys::WORKOUTS)?;
        tracing::info!("Stored workouts deleted");
        Ok(())
    }
}
