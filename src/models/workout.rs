// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: shared attributes plus a per-type payload.
//!
//! Derived metrics (`pace` for running, `speed` for cycling) and the
//! human-readable description are computed once, at construction, and
//! cached on the value.

use crate::time_utils::format_month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Geographic point as `[latitude, longitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl From<Coords> for geo::Point<f64> {
    /// geo uses (x, y) = (longitude, latitude).
    fn from(c: Coords) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Opaque workout identifier.
///
/// New workouts get a random UUID. Identifiers restored from storage are
/// kept verbatim, so older time-derived ids stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workout type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Type name with the first letter capitalized ("Running").
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw type-specific input, before anything is derived from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeMetric {
    /// Steps per minute.
    Cadence(f64),
    /// Meters climbed.
    ElevationGain(f64),
}

/// Type-specific payload with its cached derived metric.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutKind {
    Running {
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl WorkoutKind {
    /// Derive the payload for `metric` from the shared distance/duration.
    pub fn derive(metric: TypeMetric, distance: f64, duration: f64) -> Self {
        match metric {
            TypeMetric::Cadence(cadence) => WorkoutKind::Running {
                cadence,
                pace: pace(distance, duration),
            },
            TypeMetric::ElevationGain(elevation_gain) => WorkoutKind::Cycling {
                elevation_gain,
                speed: speed(distance, duration),
            },
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// Minutes per kilometer. Not guarded: zero distance yields a non-finite value.
pub fn pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

/// Kilometers per hour.
pub fn speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// `"<Type> on <Month> <day>"`, from the UTC calendar date.
pub fn describe(workout_type: WorkoutType, created_at: DateTime<Utc>) -> String {
    format!("{} on {}", workout_type.label(), format_month_day(created_at))
}

/// A single recorded workout.
///
/// Construction never validates its inputs; callers check them first
/// (see [`crate::services::form`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    clicks: u32,
    kind: WorkoutKind,
}

impl Workout {
    /// New running workout stamped with the current time.
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coords, distance, duration, cadence)
    }

    /// New cycling workout stamped with the current time.
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::cycling_at(Utc::now(), coords, distance, duration, elevation_gain)
    }

    pub fn running_at(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        Self::new_at(
            created_at,
            coords,
            distance,
            duration,
            TypeMetric::Cadence(cadence),
        )
    }

    pub fn cycling_at(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        Self::new_at(
            created_at,
            coords,
            distance,
            duration,
            TypeMetric::ElevationGain(elevation_gain),
        )
    }

    /// New workout of either type with a freshly generated id.
    pub fn new_at(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        metric: TypeMetric,
    ) -> Self {
        let kind = WorkoutKind::derive(metric, distance, duration);
        let description = describe(kind.workout_type(), created_at);
        Self {
            id: WorkoutId::generate(),
            created_at,
            coords,
            distance,
            duration,
            description,
            clicks: 0,
            kind,
        }
    }

    /// Rebuild a workout from stored attributes.
    ///
    /// The derived metric is recomputed from `distance` and `duration`; the
    /// stored description is kept unless it is empty.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        metric: TypeMetric,
        description: String,
        clicks: u32,
    ) -> Self {
        let kind = WorkoutKind::derive(metric, distance, duration);
        let description = if description.is_empty() {
            describe(kind.workout_type(), created_at)
        } else {
            description
        };
        Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            description,
            clicks,
            kind,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Kilometers.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { cadence, .. } => Some(cadence),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutKind::Running { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Record one user interaction with this workout.
    pub fn click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }
}
