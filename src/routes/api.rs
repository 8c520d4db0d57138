// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout API routes.

use crate::error::{AppError, Result};
use crate::models::WorkoutId;
use crate::routes::json_body;
use crate::services::{RenderCommand, WorkoutForm, WorkoutView};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Workout routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts).post(create_workout).delete(reset_workouts),
        )
        .route(
            "/api/workouts/{id}",
            get(get_workout).delete(delete_workout),
        )
        .route("/api/workouts/{id}/focus", post(focus_workout))
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct WorkoutsResponse {
    pub workouts: Vec<WorkoutView>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct WorkoutCreatedResponse {
    pub workout: WorkoutView,
    pub commands: Vec<RenderCommand>,
}

/// Render commands produced by a user action.
#[derive(Serialize)]
pub struct CommandsResponse {
    pub commands: Vec<RenderCommand>,
}

// ─── Handlers ────────────────────────────────────────────────

/// All workouts in display order.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Json<WorkoutsResponse> {
    let workouts = state.tracker.lock().await.list();
    Json(WorkoutsResponse {
        total: workouts.len(),
        workouts,
    })
}

/// Form submission.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<WorkoutForm>, JsonRejection>,
) -> Result<(StatusCode, Json<WorkoutCreatedResponse>)> {
    let form = json_body(payload)?;
    tracing::debug!(workout_type = %form.workout_type, "Workout form submitted");

    let submitted = state.tracker.lock().await.submit_workout(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(WorkoutCreatedResponse {
            workout: submitted.workout,
            commands: submitted.commands,
        }),
    ))
}

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutView>> {
    let id = WorkoutId::from(id);
    state
        .tracker
        .lock()
        .await
        .workout(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Workout {id} not found")))
}

/// Delete one workout. Unknown ids succeed with no commands.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandsResponse>> {
    let id = WorkoutId::from(id);
    let commands = state.tracker.lock().await.delete_workout(&id).await?;
    Ok(Json(CommandsResponse { commands }))
}

/// List entry clicked: recenter the map on the workout.
async fn focus_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandsResponse>> {
    let id = WorkoutId::from(id);
    let commands = state.tracker.lock().await.focus_workout(&id)?;
    Ok(Json(CommandsResponse { commands }))
}

/// Remove every workout, including the stored copy.
async fn reset_workouts(State(state): State<Arc<AppState>>) -> Result<Json<CommandsResponse>> {
    tracing::info!("Workout reset requested");
    let commands = state.tracker.lock().await.reset().await?;
    Ok(Json(CommandsResponse { commands }))
}
