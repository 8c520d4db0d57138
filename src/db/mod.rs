// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer: a flat key-value store and the workout persistence on top.

pub mod kv;
pub mod workouts;

pub use kv::{KvError, KvStore};
pub use workouts::WorkoutRepository;

/// Storage keys as constants.
pub mod keys {
    /// Whole ordered workout collection.
    pub const WORKOUTS: &str = "workouts";
}
