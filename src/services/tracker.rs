// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout tracker: the application context.
//!
//! Handles the core workflow:
//! 1. Validate submitted form input and build a typed workout
//! 2. Append it to the store
//! 3. Persist the whole store to the durable slot
//!
//! On startup the store is restored from the slot; on reset both the store
//! and the slot are emptied.

use crate::error::{AppError, Result};
use crate::models::{Coords, MapFocus, Workout, WorkoutId};
use crate::services::factory::{self, RawFields};
use crate::services::persistence::{CorruptEntry, PersistenceGateway};
use crate::services::store::WorkoutStore;

/// Owns the workout store and the gateway that persists it.
pub struct WorkoutTracker {
    store: WorkoutStore,
    gateway: PersistenceGateway,
    zoom_level: u8,
    skipped_on_load: Vec<CorruptEntry>,
}

/// Returned by [`WorkoutTracker::on_reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    /// The view should reload and re-render from an empty store.
    pub reload: bool,
}

impl WorkoutTracker {
    /// Restore stored workouts and build the tracker.
    pub fn start(gateway: PersistenceGateway, zoom_level: u8) -> Result<Self> {
        let report = gateway.load()?;

        if !report.skipped.is_empty() {
            tracing::warn!(
                skipped = report.skipped.len(),
                "Some stored workouts could not be restored"
            );
        }
        tracing::info!(count = report.store.len(), "Workout tracker started");

        Ok(Self {
            store: report.store,
            gateway,
            zoom_level,
            skipped_on_load: report.skipped,
        })
    }

    /// Build, store and persist a workout from submitted form input.
    ///
    /// A validation failure leaves the store and the slot untouched. If the
    /// save fails the workout stays in memory and the error is returned.
    pub fn on_new_workout_submitted(
        &mut self,
        kind: &str,
        coords: Coords,
        fields: &RawFields,
    ) -> Result<&Workout> {
        let workout = factory::build_from_form(kind, coords, fields).inspect_err(|e| {
            tracing::info!(kind, error = %e, "Rejected workout input");
        })?;
        let id = workout.id().clone();

        self.store.append(workout).map_err(|e| {
            tracing::error!(workout_id = %e.0, "Generated workout id already in store");
            AppError::DuplicateId(e)
        })?;

        let saved = self.gateway.save(&self.store);
        let workout = self
            .store
            .find_by_id(&id)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Workout {} vanished", id)))?;

        tracing::info!(
            workout_id = %id,
            kind = %workout.kind(),
            distance_km = workout.distance_km(),
            duration_min = workout.duration_min(),
            "Workout added"
        );

        saved?;
        Ok(workout)
    }

    /// Every workout in append order, for the initial render.
    pub fn on_startup(&self) -> &[Workout] {
        self.store.all()
    }

    /// Delete the stored slot and empty the store.
    pub fn on_reset(&mut self) -> Result<ResetOutcome> {
        self.gateway.reset()?;
        let removed = self.store.len();
        self.store.clear();
        self.skipped_on_load.clear();

        tracing::info!(removed, "Workouts reset");
        Ok(ResetOutcome { reload: true })
    }

    /// Get a workout by id.
    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    /// Map view to move to when a workout is selected.
    pub fn focus(&self, id: &WorkoutId) -> Result<MapFocus> {
        self.find(id)
            .map(|w| MapFocus::new(w, self.zoom_level))
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
    }

    /// Entries that were dropped during the startup load.
    pub fn skipped_on_load(&self) -> &[CorruptEntry] {
        &self.skipped_on_load
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{keys, KeyValueStore, MemoryStore, StorageError};
    use crate::models::WorkoutKind;
    use crate::services::factory::ValidationError;

    fn run_fields() -> RawFields {
        RawFields {
            distance: "5".into(),
            duration: "25".into(),
            cadence: "180".into(),
            elevation: "".into(),
        }
    }

    fn london() -> Coords {
        Coords::new(51.5, -0.1)
    }

    #[test]
    fn test_submit_appends_and_persists() {
        let memory = MemoryStore::new();
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(memory.clone()), 13).unwrap();

        let workout = tracker
            .on_new_workout_submitted("running", london(), &run_fields())
            .unwrap();
        assert_eq!(workout.pace_min_per_km(), Some(5.0));
        assert_eq!(workout.kind(), WorkoutKind::Running);

        assert_eq!(tracker.on_startup().len(), 1);
        assert!(memory.raw(keys::WORKOUTS).is_some());
    }

    #[test]
    fn test_rejected_submission_leaves_state_untouched() {
        let memory = MemoryStore::new();
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(memory.clone()), 13).unwrap();

        let mut fields = run_fields();
        fields.distance = "-1".into();
        let err = tracker
            .on_new_workout_submitted("running", london(), &fields)
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Validation(ValidationError::NotPositive("distance"))
        ));
        assert!(tracker.on_startup().is_empty());
        assert!(memory.raw(keys::WORKOUTS).is_none());
    }

    #[test]
    fn test_restart_restores_workouts() {
        let memory = MemoryStore::new();
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(memory.clone()), 13).unwrap();
        let id = tracker
            .on_new_workout_submitted("running", london(), &run_fields())
            .unwrap()
            .id()
            .clone();

        let restarted = WorkoutTracker::start(PersistenceGateway::new(memory), 13).unwrap();
        assert_eq!(restarted.on_startup(), tracker.on_startup());
        assert_eq!(restarted.find(&id).unwrap().pace_min_per_km(), Some(5.0));
    }

    #[test]
    fn test_reset_clears_store_and_slot() {
        let memory = MemoryStore::new();
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(memory.clone()), 13).unwrap();
        tracker
            .on_new_workout_submitted("running", london(), &run_fields())
            .unwrap();

        let outcome = tracker.on_reset().unwrap();
        assert!(outcome.reload);
        assert_eq!(tracker.on_startup().len(), 0);
        assert!(memory.raw(keys::WORKOUTS).is_none());

        let restarted = WorkoutTracker::start(PersistenceGateway::new(memory), 13).unwrap();
        assert!(restarted.on_startup().is_empty());
    }

    #[test]
    fn test_focus_uses_zoom_level() {
        let mut tracker =
            WorkoutTracker::start(PersistenceGateway::new(MemoryStore::new()), 15).unwrap();
        let id = tracker
            .on_new_workout_submitted("running", london(), &run_fields())
            .unwrap()
            .id()
            .clone();

        let focus = tracker.focus(&id).unwrap();
        assert_eq!(focus.zoom, 15);
        assert_eq!(focus.coords, [51.5, -0.1]);

        let missing = tracker.focus(&WorkoutId::from("nope")).unwrap_err();
        assert!(matches!(missing, AppError::NotFound(_)));
    }

    /// Slot that refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        fn remove(&mut self, _key: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn test_failed_save_keeps_workout_in_memory() {
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(ReadOnlyStore), 13).unwrap();

        let err = tracker
            .on_new_workout_submitted("running", london(), &run_fields())
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(tracker.on_startup().len(), 1);
    }

    #[test]
    fn test_failed_reset_keeps_workouts() {
        let mut tracker = WorkoutTracker::start(PersistenceGateway::new(ReadOnlyStore), 13).unwrap();
        let _ = tracker.on_new_workout_submitted("running", london(), &run_fields());

        assert!(tracker.on_reset().is_err());
        assert_eq!(tracker.on_startup().len(), 1);
    }
}
