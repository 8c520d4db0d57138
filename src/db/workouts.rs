// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whole-collection workout persistence.
//!
//! The ordered collection is written as one JSON array under
//! [`keys::WORKOUTS`]. Every save rewrites the full array; there is no
//! incremental update and no schema version.

use crate::db::keys;
use crate::db::kv::{KvError, KvStore};
use crate::models::{Workout, WorkoutRecord};

/// Saves and restores the workout collection.
#[derive(Clone)]
pub struct WorkoutRepository {
    kv: KvStore,
}

impl WorkoutRepository {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Serialize the full ordered collection and store it.
    pub async fn save<'a, I>(&self, workouts: I) -> Result<(), KvError>
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        let records: Vec<WorkoutRecord> = workouts.into_iter().map(WorkoutRecord::from).collect();
        let json = serde_json::to_vec(&records)?;

        self.kv.set(keys::WORKOUTS, &json).await?;
        tracing::debug!(count = records.len(), bytes = json.len(), "Saved workouts");
        Ok(())
    }

    /// Load the stored collection.
    ///
    /// Absent data and undecodable data both come back as an empty list;
    /// only storage I/O failures are errors.
    pub async fn load(&self) -> Result<Vec<Workout>, KvError> {
        let Some(bytes) = self.kv.get(keys::WORKOUTS).await? else {
            tracing::debug!("No stored workouts");
            return Ok(Vec::new());
        };

        Ok(decode(&bytes))
    }

    /// Drop the stored collection.
    pub async fn clear(&self) -> Result<(), KvError> {
        self.kv.remove(keys::WORKOUTS).await?;
        tracing::info!("Cleared stored workouts");
        Ok(())
    }
}

/// Decode a stored array. Any malformed record discards the whole value.
fn decode(bytes: &[u8]) -> Vec<Workout> {
    // `null` is what the browser app stored after a reset.
    let records: Option<Vec<WorkoutRecord>> = match serde_json::from_slice(bytes) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "Stored workouts are not decodable, starting empty");
            return Vec::new();
        }
    };

    let workouts: Result<Vec<Workout>, _> = records
        .unwrap_or_default()
        .into_iter()
        .map(Workout::try_from)
        .collect();

    match workouts {
        Ok(workouts) => {
            tracing::info!(count = workouts.len(), "Loaded stored workouts");
            workouts
        }
        Err(e) => {
            tracing::warn!(error = %e, "Stored workouts are invalid, starting empty");
            Vec::new()
        }
    }
}
