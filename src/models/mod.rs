// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod record;
pub mod view;
pub mod workout;

pub use record::{RecordDetails, WorkoutRecord};
pub use view::{MapFocus, MetricView, WorkoutView};
pub use workout::{Coords, UnknownKind, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
