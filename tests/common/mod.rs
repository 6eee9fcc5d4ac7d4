// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use workout_map::config::Config;
use workout_map::db::MemoryStore;
use workout_map::routes::create_router;
use workout_map::services::{PersistenceGateway, WorkoutTracker};
use workout_map::AppState;

/// Create a test app over an in-memory slot.
/// Returns the router, the shared state and a handle on the slot.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    create_test_app_with(MemoryStore::new())
}

/// Create a test app over an existing slot (simulates a restart).
#[allow(dead_code)]
pub fn create_test_app_with(memory: MemoryStore) -> (axum::Router, Arc<AppState>, MemoryStore) {
    let config = Config::default();
    let tracker = WorkoutTracker::start(
        PersistenceGateway::new(memory.clone()),
        config.map_zoom_level,
    )
    .expect("Failed to start tracker");

    let state = Arc::new(AppState::new(config, tracker));
    (create_router(state.clone()), state, memory)
}

/// Build a JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a request without a body.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
