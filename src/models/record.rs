// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain persisted workout record.
//!
//! Field names follow the browser `localStorage` layout (`type`, `date`,
//! `coords`, `elevationGain`, ...) so an exported value can be loaded as-is.

use crate::models::workout::{Coords, TypeMetric, Workout, WorkoutId, WorkoutKind, WorkoutType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored workout record.
///
/// `pace`/`speed` are written for readers of the raw data but are ignored on
/// the way back in; [`Workout`] recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub id: WorkoutId,
    /// Creation time (RFC 3339)
    pub date: DateTime<Utc>,
    pub coords: Coords,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Errors turning a record back into a workout.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("{workout_type} record {id} is missing `{field}`")]
    MissingField {
        workout_type: WorkoutType,
        id: String,
        field: &'static str,
    },
}

impl From<&Workout> for WorkoutRecord {
    fn from(w: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match *w.kind() {
            WorkoutKind::Running { cadence, pace } => (Some(cadence), Some(pace), None, None),
            WorkoutKind::Cycling {
                elevation_gain,
                speed,
            } => (None, None, Some(elevation_gain), Some(speed)),
        };

        Self {
            workout_type: w.workout_type(),
            id: w.id().clone(),
            date: w.created_at(),
            coords: w.coords(),
            distance: w.distance(),
            duration: w.duration(),
            clicks: w.clicks(),
            description: w.description().to_string(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = RecordError;

    fn try_from(r: WorkoutRecord) -> Result<Self, Self::Error> {
        let missing = |field: &'static str| RecordError::MissingField {
            workout_type: r.workout_type,
            id: r.id.to_string(),
            field,
        };

        let metric = match r.workout_type {
            WorkoutType::Running => {
                TypeMetric::Cadence(r.cadence.ok_or_else(|| missing("cadence"))?)
            }
            WorkoutType::Cycling => {
                TypeMetric::ElevationGain(r.elevation_gain.ok_or_else(|| missing("elevationGain"))?)
            }
        };

        Ok(Workout::restore(
            r.id,
            r.date,
            r.coords,
            r.distance,
            r.duration,
            metric,
            r.description,
            r.clicks,
        ))
    }
}
