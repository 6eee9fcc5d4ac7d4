// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persisted workout record.
//!
//! This is the plain-data shape written to the durable slot. It carries no
//! behavior; [`WorkoutRecord::into_workout`] dispatches on `kind` and
//! rebuilds a typed [`Workout`] through the same derivation as a live one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::workout::{Coords, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// Stored workout entry in the `workouts` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    /// Creation time (RFC3339)
    pub created_at: DateTime<Utc>,
    /// `[lat, lng]`
    pub coords: Coords,
    pub distance_km: f64,
    pub duration_min: f64,
    /// `kind` tag plus the kind-specific fields
    #[serde(flatten)]
    pub details: RecordDetails,
    /// Written for readers of the raw slot; recomputed from `createdAt` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Kind-tagged part of a stored record.
///
/// The derived metric is written out but never trusted on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordDetails {
    #[serde(rename_all = "camelCase")]
    Running {
        cadence_spm: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pace_min_per_km: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain_m: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed_km_per_h: Option<f64>,
    },
}

impl RecordDetails {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            RecordDetails::Running { .. } => WorkoutKind::Running,
            RecordDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The derived metric as it was written, if present.
    pub fn stored_metric(&self) -> Option<f64> {
        match *self {
            RecordDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            RecordDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }

    /// The raw kind-specific input (cadence or elevation gain).
    pub fn extra(&self) -> f64 {
        match *self {
            RecordDetails::Running { cadence_spm, .. } => cadence_spm,
            RecordDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let details = match *workout.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => RecordDetails::Running {
                cadence_spm,
                pace_min_per_km: Some(pace_min_per_km),
            },
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => RecordDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h: Some(speed_km_per_h),
            },
        };

        Self {
            id: workout.id().clone(),
            created_at: workout.created_at(),
            coords: workout.coords(),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            details,
            label: Some(workout.label().to_string()),
        }
    }
}

impl WorkoutRecord {
    /// Rebuild the typed workout. Pace/speed are re-derived from the base
    /// fields, so a restored workout equals the one that was saved.
    pub fn into_workout(self) -> Workout {
        let details = WorkoutDetails::derive(
            self.details.kind(),
            self.distance_km,
            self.duration_min,
            self.details.extra(),
        );
        Workout::assemble(
            self.id,
            self.created_at,
            self.coords,
            self.distance_km,
            self.duration_min,
            details,
            self.label,
        )
    }
}
