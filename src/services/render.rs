// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View models and render commands for the UI layer.
//!
//! The client applies commands in order; it never inspects workouts
//! directly.

use crate::models::{Coords, Workout, WorkoutId, WorkoutKind, WorkoutType};
use crate::services::map::Marker;
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Map pan animation when focusing a workout.
pub const PAN_DURATION_SECS: f64 = 1.0;

/// One icon/value/unit row of a list item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutDetail {
    pub icon: String,
    pub value: String,
    pub unit: String,
}

impl WorkoutDetail {
    fn new(icon: &str, value: String, unit: &str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

/// List item for one workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutView {
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub description: String,
    pub created_at: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub clicks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// CSS class for the list entry.
    pub class_name: String,
    /// Formatted rows in display order.
    pub details: Vec<WorkoutDetail>,
}

impl From<&Workout> for WorkoutView {
    fn from(w: &Workout) -> Self {
        let workout_type = w.workout_type();
        let mut details = vec![
            WorkoutDetail::new(workout_type.emoji(), format_number(w.distance()), "km"),
            WorkoutDetail::new("⏱", format_number(w.duration()), "min"),
        ];
        match *w.kind() {
            WorkoutKind::Running { cadence, pace } => {
                details.push(WorkoutDetail::new("⚡️", format!("{pace:.1}"), "min/km"));
                details.push(WorkoutDetail::new("🦶🏼", format_number(cadence), "spm"));
            }
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => {
                details.push(WorkoutDetail::new("⚡️", format!("{speed:.1}"), "km/h"));
                details.push(WorkoutDetail::new("⛰", format_number(elevation_gain), "m"));
            }
        }

        Self {
            id: w.id().to_string(),
            workout_type,
            description: w.description().to_string(),
            created_at: format_utc_rfc3339(w.created_at()),
            coords: w.coords(),
            distance: w.distance(),
            duration: w.duration(),
            clicks: w.clicks(),
            cadence: w.cadence(),
            pace: w.pace(),
            elevation_gain: w.elevation_gain(),
            speed: w.speed(),
            class_name: format!("workout workout--{workout_type}"),
            details,
        }
    }
}

/// Shortest decimal form: `5` rather than `5.0`, `5.5` as is.
fn format_number(n: f64) -> String {
    format!("{n}")
}

/// Instruction for the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RenderCommand {
    /// Create the map and the "my position" marker.
    InitMap { center: Coords, zoom: u8 },
    AddMarker { marker: Marker },
    RemoveMarker { workout_id: WorkoutId },
    AddListItem { item: WorkoutView },
    RemoveListItem { workout_id: WorkoutId },
    /// Recenter the map.
    SetView {
        center: Coords,
        zoom: u8,
        animate: bool,
        pan_duration_secs: f64,
    },
    /// Show the entry form for a clicked point.
    ShowForm { coords: Coords },
    /// Hide and clear the entry form.
    HideForm,
}
