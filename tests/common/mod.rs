// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use workout_tracker::config::Config;
use workout_tracker::db::{KvStore, WorkoutRepository};
use workout_tracker::models::Coords;
use workout_tracker::routes::create_router;
use workout_tracker::services::Tracker;
use workout_tracker::AppState;

/// Create a test app backed by `kv`, map not yet initialized.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app_with(kv: KvStore) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let mut tracker = Tracker::new(WorkoutRepository::new(kv), config.map_zoom_level);
    tracker.restore().await.expect("restore from test storage");

    let state = Arc::new(AppState::new(config, tracker));
    (create_router(state.clone()), state)
}

/// Create a test app with empty in-memory storage and an initialized map.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let (app, state) = create_test_app_with(KvStore::in_memory()).await;
    state
        .tracker
        .lock()
        .await
        .resolve_position(Coords::new(52.52, 13.40))
        .expect("resolve test position");
    (app, state)
}

/// Build a request with an optional JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
