// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Map API Server
//!
//! Serves the workout log to the map UI and keeps it in a durable slot
//! under the configured data directory.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_map::{
    config::Config,
    db::FileStore,
    services::{PersistenceGateway, WorkoutTracker},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Workout-Map API");

    // Open the durable slot and restore stored workouts
    let storage = FileStore::open(&config.data_dir).expect("Failed to open data directory");
    let tracker = WorkoutTracker::start(PersistenceGateway::new(storage), config.map_zoom_level)
        .expect("Failed to restore stored workouts");
    tracing::info!(
        count = tracker.on_startup().len(),
        skipped = tracker.skipped_on_load().len(),
        "Workouts restored"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), tracker));

    // Build router
    let app = workout_map::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_map=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
