// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Map: log runs and rides as pins on a map
//!
//! This crate provides the workout domain model, the in-memory workout
//! store and its persistence to a durable slot, plus a small JSON API that
//! a map UI drives.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::{Mutex, MutexGuard};

use config::Config;
use error::AppError;
use services::WorkoutTracker;

/// Shared application state.
///
/// The tracker is behind a mutex: every mutating call gets exclusive access.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<WorkoutTracker>,
}

impl AppState {
    pub fn new(config: Config, tracker: WorkoutTracker) -> Self {
        Self {
            config,
            tracker: Mutex::new(tracker),
        }
    }

    /// Lock the tracker for the duration of one call.
    pub fn tracker(&self) -> Result<MutexGuard<'_, WorkoutTracker>, AppError> {
        self.tracker
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Workout tracker lock poisoned")))
    }
}
