// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view state: geolocation status, the clicked point, and the marker
//! layer that mirrors the workout store.
//!
//! Markers are keyed by workout id, so removing a workout removes exactly
//! its own marker regardless of ordering.

use crate::models::{Coords, Workout, WorkoutId};
use geo::{BoundingRect, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const DEFAULT_ZOOM: u8 = 13;

const POPUP_MAX_WIDTH: u32 = 250;
const POPUP_MIN_WIDTH: u32 = 100;

/// Whether the map has been initialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapStatus {
    /// Waiting for the user's position.
    Pending,
    /// Initialized around `center`.
    Ready { center: Coords, zoom: u8 },
    /// Position lookup failed or was denied; the map never initializes.
    Unavailable,
}

/// Popup options and content for a workout marker (Leaflet option names).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

/// A workout marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub workout_id: WorkoutId,
    pub coords: Coords,
    pub popup: Popup,
}

impl Marker {
    pub fn for_workout(w: &Workout) -> Self {
        let workout_type = w.workout_type();
        Self {
            workout_id: w.id().clone(),
            coords: w.coords(),
            popup: Popup {
                content: format!("{} {}", workout_type.emoji(), w.description()),
                class_name: format!("{workout_type}-popup"),
                max_width: POPUP_MAX_WIDTH,
                min_width: POPUP_MIN_WIDTH,
                auto_close: false,
                close_on_click: false,
            },
        }
    }
}

/// Snapshot of the map for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapState {
    #[serde(flatten)]
    pub status: MapStatus,
    pub selected: Option<Coords>,
    pub markers: Vec<Marker>,
    /// `[[south, west], [north, east]]` around all markers.
    pub bounds: Option<[[f64; 2]; 2]>,
}

impl From<&MapView> for MapState {
    fn from(map: &MapView) -> Self {
        Self {
            status: map.status,
            selected: map.selected,
            markers: map.markers.clone(),
            bounds: map.marker_bounds(),
        }
    }
}

/// Map view errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MapError {
    #[error("Map is not initialized")]
    NotReady,
}

/// Map state owned by the tracker.
#[derive(Debug, Clone)]
pub struct MapView {
    status: MapStatus,
    zoom: u8,
    selected: Option<Coords>,
    markers: Vec<Marker>,
}

impl MapView {
    pub fn new(zoom: u8) -> Self {
        Self {
            status: MapStatus::Pending,
            zoom,
            selected: None,
            markers: Vec::new(),
        }
    }

    pub fn status(&self) -> MapStatus {
        self.status
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, MapStatus::Ready { .. })
    }

    /// Initialize around the user's position.
    ///
    /// Only the first resolution counts; returns `false` if the map was
    /// already initialized or had already failed.
    pub fn resolve(&mut self, position: Coords) -> bool {
        if self.status != MapStatus::Pending {
            tracing::debug!(status = ?self.status, "Ignoring late position result");
            return false;
        }
        self.status = MapStatus::Ready {
            center: position,
            zoom: self.zoom,
        };
        tracing::info!(lat = position.lat, lng = position.lng, "Map initialized");
        true
    }

    /// Record a failed position lookup. Returns `false` if already settled.
    pub fn fail(&mut self, reason: &str) -> bool {
        if self.status != MapStatus::Pending {
            return false;
        }
        tracing::warn!(reason, "Can't get your coordinates; map stays uninitialized");
        self.status = MapStatus::Unavailable;
        true
    }

    /// Remember a clicked point for the next submission.
    pub fn select_point(&mut self, coords: Coords) -> Result<(), MapError> {
        if !self.is_ready() {
            return Err(MapError::NotReady);
        }
        self.selected = Some(coords);
        Ok(())
    }

    pub fn selected(&self) -> Option<Coords> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move the view to `center`, keeping the configured zoom.
    pub fn recenter(&mut self, center: Coords) -> Result<(), MapError> {
        match &mut self.status {
            MapStatus::Ready { center: c, .. } => {
                *c = center;
                Ok(())
            }
            _ => Err(MapError::NotReady),
        }
    }

    /// Add the marker for `w`. Markers only exist on an initialized map.
    pub fn add_marker(&mut self, w: &Workout) -> Option<Marker> {
        if !self.is_ready() {
            return None;
        }
        let marker = Marker::for_workout(w);
        self.markers.retain(|m| m.workout_id != marker.workout_id);
        self.markers.push(marker.clone());
        Some(marker)
    }

    /// Remove the marker paired with `id`, if any.
    pub fn remove_marker(&mut self, id: &WorkoutId) -> Option<Marker> {
        let index = self.markers.iter().position(|m| &m.workout_id == id)?;
        Some(self.markers.remove(index))
    }

    /// Rebuild the marker layer from `workouts`. Returns the new markers.
    pub fn sync_markers<'a, I>(&mut self, workouts: I) -> Vec<Marker>
    where
        I: IntoIterator<Item = &'a Workout>,
    {
        self.markers.clear();
        if !self.is_ready() {
            return Vec::new();
        }
        self.markers = workouts.into_iter().map(Marker::for_workout).collect();
        self.markers.clone()
    }

    /// Drop every marker. Returns what was removed.
    pub fn clear_markers(&mut self) -> Vec<Marker> {
        std::mem::take(&mut self.markers)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Bounding box of all markers as `[[south, west], [north, east]]`.
    pub fn marker_bounds(&self) -> Option<[[f64; 2]; 2]> {
        let points: MultiPoint<f64> = self
            .markers
            .iter()
            .map(|m| Point::from(m.coords))
            .collect::<Vec<_>>()
            .into();
        let rect = points.bounding_rect()?;
        Some([
            [rect.min().y, rect.min().x],
            [rect.max().y, rect.max().x],
        ])
    }

    /// Markers as a GeoJSON point collection, popup fields as properties.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .markers
            .iter()
            .map(|m| {
                let point = Point::from(m.coords);
                let mut properties = JsonObject::new();
                properties.insert("workoutId".to_string(), m.workout_id.as_str().into());
                properties.insert("popup".to_string(), m.popup.content.clone().into());
                properties.insert("className".to_string(), m.popup.class_name.clone().into());

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&point))),
                    id: Some(geojson::feature::Id::String(m.workout_id.to_string())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
