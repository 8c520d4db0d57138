// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form input and its validation.
//!
//! This is the only place distance/duration/metric values are checked. An
//! invalid submission is rejected whole; nothing is built from it.

use crate::models::{Coords, TypeMetric, WorkoutType};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

/// Message shown to the user for any rejected submission.
pub const INVALID_INPUT_MESSAGE: &str = "Input should be positive number";

/// Raw form submission.
///
/// Numeric fields accept JSON numbers or numeric strings (HTML inputs post
/// strings). A non-numeric string is kept as NaN so validation rejects it.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_type_fields"))]
pub struct WorkoutForm {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    /// Kilometers
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(required, range(exclusive_min = 0.0))]
    pub distance: Option<f64>,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_f64")]
    #[validate(required, range(exclusive_min = 0.0))]
    pub duration: Option<f64>,
    /// Steps per minute (running only)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cadence: Option<f64>,
    /// Meters (cycling only)
    #[serde(default, alias = "elevation", deserialize_with = "lenient_f64")]
    pub elevation_gain: Option<f64>,
    /// Workout location. Falls back to the last clicked map point.
    #[serde(default)]
    pub coords: Option<Coords>,
}

/// A submission that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidWorkoutInput {
    pub coords: Option<Coords>,
    pub distance: f64,
    pub duration: f64,
    pub metric: TypeMetric,
}

/// Form rejection reasons.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Input should be positive number")]
    Invalid(#[from] ValidationErrors),
}

impl WorkoutForm {
    /// Validate and extract the numbers needed to build a workout.
    pub fn into_input(self) -> Result<ValidWorkoutInput, FormError> {
        self.validate()?;

        // Presence is guaranteed by the validation above.
        let (Some(distance), Some(duration)) = (self.distance, self.duration) else {
            return Err(FormError::Invalid(ValidationErrors::new()));
        };
        let metric = match self.workout_type {
            WorkoutType::Running => TypeMetric::Cadence(self.cadence.unwrap_or(f64::NAN)),
            WorkoutType::Cycling => {
                TypeMetric::ElevationGain(self.elevation_gain.unwrap_or(f64::NAN))
            }
        };

        Ok(ValidWorkoutInput {
            coords: self.coords,
            distance,
            duration,
            metric,
        })
    }
}

/// Checks that depend on the workout type, plus finiteness (range checks
/// alone let NaN through).
fn validate_type_fields(form: &WorkoutForm) -> Result<(), ValidationError> {
    let finite = |v: Option<f64>| v.is_some_and(f64::is_finite);

    if !finite(form.distance) || !finite(form.duration) {
        return Err(ValidationError::new("not_a_number"));
    }

    match form.workout_type {
        WorkoutType::Running => {
            if !form.cadence.is_some_and(|c| c.is_finite() && c > 0.0) {
                return Err(ValidationError::new("cadence"));
            }
        }
        WorkoutType::Cycling => {
            if !form.elevation_gain.is_some_and(|e| e.is_finite() && e >= 0.0) {
                return Err(ValidationError::new("elevation_gain"));
            }
        }
    }

    if form.coords.is_some_and(|c| !c.is_valid()) {
        return Err(ValidationError::new("coords"));
    }

    Ok(())
}

/// Accept a number, a numeric string, an empty string (absent) or null.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.parse::<f64>().unwrap_or(f64::NAN))
            }
        }
    })
}
