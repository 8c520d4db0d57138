// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map routes: geolocation result, map clicks, marker export.

use crate::error::{AppError, Result};
use crate::models::Coords;
use crate::routes::api::CommandsResponse;
use crate::routes::json_body;
use crate::services::MapState;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Map routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map", get(get_map))
        .route("/api/map/position", post(report_position))
        .route("/api/map/click", post(click_map))
        .route("/api/map/markers.geojson", get(get_markers_geojson))
}

/// Browser geolocation outcome: either a position or an error message.
#[derive(Debug, Deserialize)]
struct PositionReport {
    latitude: Option<f64>,
    longitude: Option<f64>,
    error: Option<String>,
}

/// Map click (Leaflet `latlng`).
#[derive(Debug, Deserialize)]
struct MapClick {
    lat: f64,
    lng: f64,
}

async fn get_map(State(state): State<Arc<AppState>>) -> Json<MapState> {
    Json(state.tracker.lock().await.map_state())
}

/// Geolocation resolved or failed.
///
/// A failure is only logged; the map stays uninitialized.
async fn report_position(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PositionReport>, JsonRejection>,
) -> Result<Json<CommandsResponse>> {
    let report = json_body(payload)?;
    let mut tracker = state.tracker.lock().await;

    let commands = match report {
        PositionReport {
            error: Some(reason),
            ..
        } => {
            tracker.position_unavailable(&reason);
            Vec::new()
        }
        PositionReport {
            latitude: Some(lat),
            longitude: Some(lng),
            ..
        } => tracker.resolve_position(Coords::new(lat, lng))?,
        _ => {
            return Err(AppError::InvalidInput(
                "Expected latitude and longitude, or error".to_string(),
            ))
        }
    };

    Ok(Json(CommandsResponse { commands }))
}

/// Map clicked: select the point and show the form.
async fn click_map(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<MapClick>, JsonRejection>,
) -> Result<Json<CommandsResponse>> {
    let click = json_body(payload)?;
    let commands = state
        .tracker
        .lock()
        .await
        .select_point(Coords::new(click.lat, click.lng))?;
    Ok(Json(CommandsResponse { commands }))
}

/// Workout markers as a GeoJSON FeatureCollection.
async fn get_markers_geojson(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let collection = state.tracker.lock().await.markers_geojson();
    (
        [(header::CONTENT_TYPE, "application/geo+json")],
        Json(collection),
    )
}
