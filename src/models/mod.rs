// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod record;
pub mod workout;

pub use record::{RecordError, WorkoutRecord};
pub use workout::{Coords, TypeMetric, Workout, WorkoutId, WorkoutKind, WorkoutType};
