// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection.
//!
//! Workouts are kept in append order, which is also creation order.
//! Presentation order (e.g. newest first) is up to the caller.

use std::collections::HashMap;

use crate::models::{Workout, WorkoutId};

/// Appending an id that is already present. Ids are generated, so this is
/// an internal bug rather than bad user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Duplicate workout id: {0}")]
pub struct DuplicateIdError(pub WorkoutId);

/// Ordered, id-indexed store of workouts. Sole owner of every record.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    index: HashMap<WorkoutId, usize>,
}

impl WorkoutStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout at the tail. The store is unchanged on error.
    pub fn append(&mut self, workout: Workout) -> Result<(), DuplicateIdError> {
        if self.index.contains_key(workout.id()) {
            return Err(DuplicateIdError(workout.id().clone()));
        }
        self.index.insert(workout.id().clone(), self.workouts.len());
        self.workouts.push(workout);
        Ok(())
    }

    /// Get a workout by id.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.index.get(id).map(|&i| &self.workouts[i])
    }

    /// Check if a workout exists.
    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.index.contains_key(id)
    }

    /// All workouts in append order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Discard the current contents and take `workouts` in the given order.
    ///
    /// On a duplicate id the previous contents are kept.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> Result<(), DuplicateIdError> {
        let mut index = HashMap::with_capacity(workouts.len());
        for (i, workout) in workouts.iter().enumerate() {
            if index.insert(workout.id().clone(), i).is_some() {
                return Err(DuplicateIdError(workout.id().clone()));
            }
        }
        self.workouts = workouts;
        self.index = index;
        Ok(())
    }

    /// Remove every workout.
    pub fn clear(&mut self) {
        self.workouts.clear();
        self.index.clear();
    }

    /// Get the number of workouts.
    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
