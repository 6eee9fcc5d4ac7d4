// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes used by the map UI.

use crate::error::{AppError, Result};
use crate::models::{Coords, MapFocus, WorkoutId, WorkoutView};
use crate::services::RawFields;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts)
                .post(create_workout)
                .delete(reset_workouts),
        )
        .route("/api/workouts/{id}", get(get_workout))
        .route("/api/workouts/{id}/focus", get(focus_workout))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    /// Append (creation) order; newest-first display is up to the client.
    pub workouts: Vec<WorkoutView>,
    pub total: u32,
}

fn saturating_total(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// All stored workouts, for the initial map and list render.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<WorkoutsResponse>> {
    let tracker = state.tracker()?;
    let workouts: Vec<WorkoutView> = tracker.on_startup().iter().map(WorkoutView::from).collect();

    tracing::debug!(count = workouts.len(), "Listing workouts");

    Ok(Json(WorkoutsResponse {
        total: saturating_total(workouts.len()),
        workouts,
    }))
}

// ─── Submission ──────────────────────────────────────────────

/// Form submission: the clicked map position plus the raw form fields.
#[derive(Deserialize)]
pub struct CreateWorkoutRequest {
    /// "running" or "cycling"
    pub kind: String,
    /// `[lat, lng]` of the map click
    pub coords: Coords,
    #[serde(flatten)]
    pub fields: RawFields,
}

fn check_coords(coords: Coords) -> Result<()> {
    let valid = (-90.0..=90.0).contains(&coords.lat) && (-180.0..=180.0).contains(&coords.lng);
    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Coordinates out of range: [{}, {}]",
            coords.lat, coords.lng
        )))
    }
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutView>)> {
    check_coords(request.coords)?;

    let mut tracker = state.tracker()?;
    let workout =
        tracker.on_new_workout_submitted(&request.kind, request.coords, &request.fields)?;

    Ok((StatusCode::CREATED, Json(WorkoutView::from(workout))))
}

// ─── Single Workout ──────────────────────────────────────────

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutView>> {
    let tracker = state.tracker()?;
    let id = WorkoutId::from(id);
    tracker
        .find(&id)
        .map(|w| Json(WorkoutView::from(w)))
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
}

/// Where the map should pan when a list entry is clicked.
async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MapFocus>> {
    let tracker = state.tracker()?;
    Ok(Json(tracker.focus(&WorkoutId::from(id))?))
}

// ─── Reset ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ResetResponse {
    pub reset: bool,
    /// The client should reload its view.
    pub reload: bool,
}

/// Delete every workout, in memory and in the durable slot.
async fn reset_workouts(State(state): State<Arc<AppState>>) -> Result<Json<ResetResponse>> {
    let mut tracker = state.tracker()?;
    let outcome = tracker.on_reset()?;

    Ok(Json(ResetResponse {
        reset: true,
        reload: outcome.reload,
    }))
}
