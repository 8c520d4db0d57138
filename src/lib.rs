// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker: log runs and rides on a map
//!
//! This crate provides the backend for a single-user workout map: the
//! workout collection, its derived metrics, persistence to a local
//! key-value store, and the JSON API the map page talks to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::Tracker;
use tokio::sync::Mutex;

/// Shared application state.
///
/// The tracker is the only mutable state; the mutex serializes every
/// request that touches it.
pub struct AppState {
    pub config: Config,
    pub tracker: Mutex<Tracker>,
}

impl AppState {
    pub fn new(config: Config, tracker: Tracker) -> Self {
        Self {
            config,
            tracker: Mutex::new(tracker),
        }
    }
}
