// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod form;
pub mod map;
pub mod render;
pub mod store;
pub mod tracker;

pub use form::{FormError, WorkoutForm};
pub use map::{MapState, MapStatus, MapView, Marker};
pub use render::{RenderCommand, WorkoutView};
pub use store::WorkoutStore;
pub use tracker::{Submitted, Tracker};
