// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod factory;
pub mod persistence;
pub mod store;
pub mod tracker;

pub use factory::{FormValue, RawFields, ValidationError};
pub use persistence::{CorruptEntry, LoadReport, PersistenceError, PersistenceGateway};
pub use store::{DuplicateIdError, WorkoutStore};
pub use tracker::{ResetOutcome, WorkoutTracker};
