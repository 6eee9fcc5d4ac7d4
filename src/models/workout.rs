// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout domain model.
//!
//! A [`Workout`] is immutable once built: the kind-specific derived metric
//! (pace or speed) and the human-readable label are computed in the
//! constructor from fields that are all supplied up front.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::time_utils::format_label_date;

/// Opaque workout identifier, generated once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map position of a workout pin. Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(coords: Coords) -> Self {
        [coords.lat, coords.lng]
    }
}

/// Workout discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 2] = [WorkoutKind::Running, WorkoutKind::Cycling];

    /// Lowercase wire name ("running", "cycling").
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in labels.
    pub fn title(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Marker and list icon.
    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known workout kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown workout kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Kind-specific raw field plus the metric derived from the base fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        cadence_spm: f64,
        /// `duration_min / distance_km`
        pace_min_per_km: f64,
    },
    Cycling {
        elevation_gain_m: f64,
        /// `distance_km / (duration_min / 60)`
        speed_km_per_h: f64,
    },
}

impl WorkoutDetails {
    /// Derive the payload for `kind`. `extra` is the cadence for running and
    /// the elevation gain for cycling.
    pub fn derive(kind: WorkoutKind, distance_km: f64, duration_min: f64, extra: f64) -> Self {
        match kind {
            WorkoutKind::Running => WorkoutDetails::Running {
                cadence_spm: extra,
                pace_min_per_km: duration_min / distance_km,
            },
            WorkoutKind::Cycling => WorkoutDetails::Cycling {
                elevation_gain_m: extra,
                speed_km_per_h: distance_km / (duration_min / 60.0),
            },
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// The raw kind-specific input (cadence or elevation gain).
    pub fn extra(&self) -> f64 {
        match *self {
            WorkoutDetails::Running { cadence_spm, .. } => cadence_spm,
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => elevation_gain_m,
        }
    }

    /// The derived metric (pace or speed).
    pub fn metric(&self) -> f64 {
        match *self {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => pace_min_per_km,
            WorkoutDetails::Cycling { speed_km_per_h, .. } => speed_km_per_h,
        }
    }
}

/// A logged workout.
///
/// The constructor performs no validation; [`crate::services::factory`]
/// is the only guard against zero or non-finite input.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance_km: f64,
    duration_min: f64,
    label: String,
    details: WorkoutDetails,
}

impl Workout {
    /// Build a workout created now with a fresh id.
    pub fn new(
        kind: WorkoutKind,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        extra: f64,
    ) -> Self {
        Self::assemble(
            WorkoutId::generate(),
            Utc::now(),
            coords,
            distance_km,
            duration_min,
            WorkoutDetails::derive(kind, distance_km, duration_min, extra),
            None,
        )
    }

    pub fn running(coords: Coords, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self::new(
            WorkoutKind::Running,
            coords,
            distance_km,
            duration_min,
            cadence_spm,
        )
    }

    pub fn cycling(
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        elevation_gain_m: f64,
    ) -> Self {
        Self::new(
            WorkoutKind::Cycling,
            coords,
            distance_km,
            duration_min,
            elevation_gain_m,
        )
    }

    /// Put a workout together from already-known identity fields.
    ///
    /// Used at restore time. When `label` is `None` it is derived from the
    /// kind and creation date exactly as for a live workout.
    pub(crate) fn assemble(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance_km: f64,
        duration_min: f64,
        details: WorkoutDetails,
        label: Option<String>,
    ) -> Self {
        let label = label.unwrap_or_else(|| describe(details.kind(), created_at));
        Self {
            id,
            created_at,
            coords,
            distance_km,
            duration_min,
            label,
            details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// e.g. "Running on April 12".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn pace_min_per_km(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running {
                pace_min_per_km, ..
            } => Some(pace_min_per_km),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn speed_km_per_h(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed_km_per_h, .. } => Some(speed_km_per_h),
            WorkoutDetails::Running { .. } => None,
        }
    }

    pub fn cadence_spm(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { cadence_spm, .. } => Some(cadence_spm),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain_m(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling {
                elevation_gain_m, ..
            } => Some(elevation_gain_m),
            WorkoutDetails::Running { .. } => None,
        }
    }
}

/// "<Kind> on <Month> <day>", using the local calendar date of `created_at`.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.title(), format_label_date(created_at))
}
