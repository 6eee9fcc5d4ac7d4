// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display projections handed to the map/list UI.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::workout::{Coords, Workout, WorkoutDetails, WorkoutKind};
use crate::time_utils::format_utc_rfc3339;

/// One rendered metric row ("⚡️ 5.0 min/km").
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MetricView {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl MetricView {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// A workout as the UI shows it: map marker popup plus list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub created_at: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: [f64; 2],
    pub icon: String,
    /// CSS class for the marker popup ("running-popup")
    pub popup_class: String,
    /// Marker popup text ("🚴 Cycling on April 12")
    pub popup_text: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Distance, duration, then the two kind-specific rows.
    pub metrics: Vec<MetricView>,
}

impl From<&Workout> for WorkoutView {
    fn from(workout: &Workout) -> Self {
        let kind = workout.kind();
        let mut metrics = vec![
            MetricView::new(kind.icon(), format_number(workout.distance_km()), "km"),
            MetricView::new("⏱", format_number(workout.duration_min()), "min"),
        ];

        match *workout.details() {
            WorkoutDetails::Running {
                cadence_spm,
                pace_min_per_km,
            } => {
                metrics.push(MetricView::new(
                    "⚡️",
                    format!("{:.1}", pace_min_per_km),
                    "min/km",
                ));
                metrics.push(MetricView::new("🦶🏼", format_number(cadence_spm), "spm"));
            }
            WorkoutDetails::Cycling {
                elevation_gain_m,
                speed_km_per_h,
            } => {
                metrics.push(MetricView::new(
                    "⚡️",
                    format!("{:.1}", speed_km_per_h),
                    "km/h",
                ));
                metrics.push(MetricView::new("⛰", format_number(elevation_gain_m), "m"));
            }
        }

        Self {
            id: workout.id().to_string(),
            kind: kind.as_str().to_string(),
            title: workout.label().to_string(),
            created_at: format_utc_rfc3339(workout.created_at()),
            coords: workout.coords().into(),
            icon: kind.icon().to_string(),
            popup_class: popup_class(kind),
            popup_text: format!("{} {}", kind.icon(), workout.label()),
            distance_km: workout.distance_km(),
            duration_min: workout.duration_min(),
            metrics,
        }
    }
}

/// Where the map should move when a list entry is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapFocus {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: [f64; 2],
    pub zoom: u8,
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl MapFocus {
    pub const PAN_DURATION_SECS: f64 = 1.0;

    pub fn new(workout: &Workout, zoom: u8) -> Self {
        let coords: Coords = workout.coords();
        Self {
            id: workout.id().to_string(),
            coords: coords.into(),
            zoom,
            animate: true,
            pan_duration_secs: Self::PAN_DURATION_SECS,
        }
    }
}

fn popup_class(kind: WorkoutKind) -> String {
    format!("{}-popup", kind.as_str())
}

/// Plain numbers print without a trailing ".0" (5 rather than 5.0).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
