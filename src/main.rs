// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Serves the workout collection and map state to the map page, keeping
//! everything in a local key-value store.

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::{Config, StorageBackend},
    db::{KvStore, WorkoutRepository},
    services::Tracker,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    let kv = match config.storage_backend {
        StorageBackend::File => KvStore::open_dir(&config.data_dir)
            .await
            .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?,
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; workouts are lost on exit");
            KvStore::in_memory()
        }
    };
    tracing::info!(backend = kv.backend_name(), "Storage ready");

    // Build the application context and load saved workouts
    let mut tracker = Tracker::new(WorkoutRepository::new(kv), config.map_zoom_level);
    tracker
        .restore()
        .await
        .context("Failed to restore saved workouts")?;

    if let Some(home) = config.home_position {
        tracing::info!(lat = home.lat, lng = home.lng, "Using configured home position");
        tracker
            .resolve_position(home)
            .context("Invalid home position")?;
    }

    let state = Arc::new(AppState::new(config.clone(), tracker));
    let app = workout_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
