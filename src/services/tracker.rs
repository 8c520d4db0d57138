// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application controller.
//!
//! Owns the workout store and the map view, and turns user actions into
//! store mutations, saves, and render commands:
//! 1. Validate the submitted form
//! 2. Build the workout and append it to the store
//! 3. Emit marker and list-item commands
//! 4. Save the whole collection
//!
//! Deletes run the same pipeline in reverse.

use crate::db::WorkoutRepository;
use crate::error::{AppError, Result};
use crate::models::{Coords, Workout, WorkoutId};
use crate::services::form::{WorkoutForm, INVALID_INPUT_MESSAGE};
use crate::services::map::{MapState, MapView};
use crate::services::render::{RenderCommand, WorkoutView, PAN_DURATION_SECS};
use crate::services::store::WorkoutStore;
use chrono::Utc;
use geojson::FeatureCollection;

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct Submitted {
    pub workout: WorkoutView,
    pub commands: Vec<RenderCommand>,
}

/// The single application context. Built once at startup.
pub struct Tracker {
    store: WorkoutStore,
    map: MapView,
    repo: WorkoutRepository,
}

impl Tracker {
    pub fn new(repo: WorkoutRepository, zoom: u8) -> Self {
        Self {
            store: WorkoutStore::new(),
            map: MapView::new(zoom),
            repo,
        }
    }

    /// Replace the in-memory collection with what storage holds.
    pub async fn restore(&mut self) -> Result<Vec<RenderCommand>> {
        let workouts = self.repo.load().await?;
        self.store.replace_all(workouts);

        let mut commands: Vec<RenderCommand> = self
            .store
            .iter()
            .map(|w| RenderCommand::AddListItem {
                item: WorkoutView::from(w),
            })
            .collect();
        commands.extend(
            self.map
                .sync_markers(&self.store)
                .into_iter()
                .map(|marker| RenderCommand::AddMarker { marker }),
        );

        tracing::info!(count = self.store.len(), "Restored workouts");
        Ok(commands)
    }

    /// Geolocation succeeded: initialize the map and draw stored workouts.
    pub fn resolve_position(&mut self, position: Coords) -> Result<Vec<RenderCommand>> {
        if !position.is_valid() {
            tracing::debug!(lat = position.lat, lng = position.lng, "Rejected position");
            return Err(invalid_input());
        }
        if !self.map.resolve(position) {
            return Ok(Vec::new());
        }

        let mut commands = vec![RenderCommand::InitMap {
            center: position,
            zoom: self.map.zoom(),
        }];
        commands.extend(
            self.map
                .sync_markers(&self.store)
                .into_iter()
                .map(|marker| RenderCommand::AddMarker { marker }),
        );
        Ok(commands)
    }

    /// Geolocation failed or was denied. Logged only; no recovery.
    pub fn position_unavailable(&mut self, reason: &str) {
        self.map.fail(reason);
    }

    /// Map click: remember the point and show the form.
    pub fn select_point(&mut self, coords: Coords) -> Result<Vec<RenderCommand>> {
        if !coords.is_valid() {
            tracing::debug!(lat = coords.lat, lng = coords.lng, "Rejected map point");
            return Err(invalid_input());
        }
        self.map.select_point(coords)?;
        Ok(vec![RenderCommand::ShowForm { coords }])
    }

    /// Validate a form submission and record the workout.
    ///
    /// Invalid input leaves store, map and storage untouched.
    pub async fn submit_workout(&mut self, form: WorkoutForm) -> Result<Submitted> {
        let input = form.into_input()?;
        let Some(coords) = input.coords.or(self.map.selected()) else {
            tracing::debug!("Workout submitted without a location");
            return Err(invalid_input());
        };

        let workout = Workout::new_at(
            Utc::now(),
            coords,
            input.distance,
            input.duration,
            input.metric,
        );
        let view = WorkoutView::from(&workout);
        let marker = self.map.add_marker(&workout);

        tracing::info!(
            workout_id = %workout.id(),
            workout_type = %workout.workout_type(),
            distance = workout.distance(),
            duration = workout.duration(),
            "Workout added"
        );
        self.store.add(workout);
        self.map.clear_selection();

        let mut commands = Vec::with_capacity(3);
        if let Some(marker) = marker {
            commands.push(RenderCommand::AddMarker { marker });
        }
        commands.push(RenderCommand::AddListItem { item: view.clone() });
        commands.push(RenderCommand::HideForm);

        self.save().await?;

        Ok(Submitted {
            workout: view,
            commands,
        })
    }

    /// Delete a workout and its marker. Unknown ids are a silent no-op.
    pub async fn delete_workout(&mut self, id: &WorkoutId) -> Result<Vec<RenderCommand>> {
        let Some(removed) = self.store.remove_by_id(id) else {
            tracing::debug!(workout_id = %id, "Delete of unknown workout ignored");
            return Ok(Vec::new());
        };

        let mut commands = Vec::with_capacity(2);
        if let Some(marker) = self.map.remove_marker(removed.id()) {
            commands.push(RenderCommand::RemoveMarker {
                workout_id: marker.workout_id,
            });
        }
        commands.push(RenderCommand::RemoveListItem {
            workout_id: removed.id().clone(),
        });

        tracing::info!(workout_id = %id, remaining = self.store.len(), "Workout deleted");
        self.save().await?;
        Ok(commands)
    }

    /// List click: count the interaction and recenter the map on the workout.
    pub fn focus_workout(&mut self, id: &WorkoutId) -> Result<Vec<RenderCommand>> {
        let workout = self
            .store
            .find_by_id_mut(id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {id} not found")))?;
        workout.click();
        let center = workout.coords();

        if self.map.recenter(center).is_err() {
            tracing::debug!(workout_id = %id, "Map not initialized, nothing to recenter");
            return Ok(Vec::new());
        }

        Ok(vec![RenderCommand::SetView {
            center,
            zoom: self.map.zoom(),
            animate: true,
            pan_duration_secs: PAN_DURATION_SECS,
        }])
    }

    /// Forget every workout, in memory and in storage.
    pub async fn reset(&mut self) -> Result<Vec<RenderCommand>> {
        let mut commands: Vec<RenderCommand> = self
            .map
            .clear_markers()
            .into_iter()
            .map(|m| RenderCommand::RemoveMarker {
                workout_id: m.workout_id,
            })
            .collect();
        commands.extend(self.store.iter().map(|w| RenderCommand::RemoveListItem {
            workout_id: w.id().clone(),
        }));

        let count = self.store.len();
        self.store.clear();
        self.repo.clear().await?;

        tracing::info!(count, "All workouts reset");
        Ok(commands)
    }

    pub fn list(&self) -> Vec<WorkoutView> {
        self.store.iter().map(WorkoutView::from).collect()
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<WorkoutView> {
        self.store.find_by_id(id).map(WorkoutView::from)
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn map_state(&self) -> MapState {
        MapState::from(&self.map)
    }

    pub fn markers_geojson(&self) -> FeatureCollection {
        self.map.to_geojson()
    }

    async fn save(&self) -> Result<()> {
        self.repo.save(&self.store).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save workouts");
            AppError::from(e)
        })
    }
}

fn invalid_input() -> AppError {
    AppError::InvalidInput(INVALID_INPUT_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::KvStore;
    use crate::services::map::MapStatus;
    use serde_json::json;

    fn form(value: serde_json::Value) -> WorkoutForm {
        serde_json::from_value(value).unwrap()
    }

    fn running_form() -> WorkoutForm {
        form(json!({ "type": "running", "distance": 5, "duration": 24, "cadence": 178 }))
    }

    fn tracker_with(kv: KvStore) -> Tracker {
        Tracker::new(WorkoutRepository::new(kv), 13)
    }

    async fn ready_tracker(kv: KvStore) -> Tracker {
        let mut t = tracker_with(kv);
        t.restore().await.unwrap();
        t.resolve_position(Coords::new(52.52, 13.40)).unwrap();
        t
    }

    #[tokio::test]
    async fn test_submit_uses_selected_point() {
        let mut t = ready_tracker(KvStore::in_memory()).await;
        t.select_point(Coords::new(52.53, 13.41)).unwrap();

        let submitted = t.submit_workout(running_form()).await.unwrap();

        assert_eq!(submitted.workout.coords, Coords::new(52.53, 13.41));
        assert_eq!(submitted.workout.pace, Some(4.8));
        assert!(matches!(submitted.commands[0], RenderCommand::AddMarker { .. }));
        assert!(matches!(submitted.commands[1], RenderCommand::AddListItem { .. }));
        assert_eq!(submitted.commands[2], RenderCommand::HideForm);
        assert_eq!(t.map_state().selected, None);
    }

    #[tokio::test]
    async fn test_submit_without_location_rejected() {
        let mut t = ready_tracker(KvStore::in_memory()).await;
        let err = t.submit_workout(running_form()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == INVALID_INPUT_MESSAGE));
        assert!(t.store().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_position_uses_form_message() {
        let mut t = tracker_with(KvStore::in_memory());
        let err = t.resolve_position(Coords::new(95.0, 0.0)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == INVALID_INPUT_MESSAGE));
        assert_eq!(t.map_state().status, MapStatus::Pending);
    }

    #[tokio::test]
    async fn test_invalid_form_changes_nothing() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        t.select_point(Coords::new(1.0, 1.0)).unwrap();

        let bad = form(json!({ "type": "running", "distance": -5, "duration": 24, "cadence": 178 }));
        let err = t.submit_workout(bad).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(t.store().is_empty());
        assert!(t.map_state().markers.is_empty());
        assert_eq!(t.map_state().selected, Some(Coords::new(1.0, 1.0)));
        assert_eq!(kv.get("workouts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_submit_saves_whole_collection() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        for lat in [1.0, 2.0] {
            t.select_point(Coords::new(lat, 0.0)).unwrap();
            t.submit_workout(running_form()).await.unwrap();
        }

        let mut restored = tracker_with(kv);
        restored.restore().await.unwrap();
        assert_eq!(restored.store().len(), 2);
        assert_eq!(restored.list(), t.list());
    }

    #[tokio::test]
    async fn test_delete_retires_marker_and_saves() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        t.select_point(Coords::new(1.0, 1.0)).unwrap();
        let a = t.submit_workout(running_form()).await.unwrap().workout;
        t.select_point(Coords::new(2.0, 2.0)).unwrap();
        let b = t.submit_workout(running_form()).await.unwrap().workout;

        let id = WorkoutId::from(a.id.clone());
        let commands = t.delete_workout(&id).await.unwrap();

        assert_eq!(
            commands,
            vec![
                RenderCommand::RemoveMarker {
                    workout_id: id.clone()
                },
                RenderCommand::RemoveListItem { workout_id: id }
            ]
        );
        let markers = t.map_state().markers;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].workout_id.as_str(), b.id);

        let mut restored = tracker_with(kv);
        restored.restore().await.unwrap();
        assert_eq!(restored.list(), vec![b]);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_noop() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        let commands = t
            .delete_workout(&WorkoutId::from("nope"))
            .await
            .unwrap();
        assert!(commands.is_empty());
        assert_eq!(kv.get("workouts").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_focus_counts_click_and_recenters() {
        let mut t = ready_tracker(KvStore::in_memory()).await;
        t.select_point(Coords::new(3.0, 4.0)).unwrap();
        let view = t.submit_workout(running_form()).await.unwrap().workout;
        let id = WorkoutId::from(view.id);

        let commands = t.focus_workout(&id).unwrap();
        assert_eq!(
            commands,
            vec![RenderCommand::SetView {
                center: Coords::new(3.0, 4.0),
                zoom: 13,
                animate: true,
                pan_duration_secs: 1.0
            }]
        );
        t.focus_workout(&id).unwrap();
        assert_eq!(t.workout(&id).unwrap().clicks, 2);
    }

    #[tokio::test]
    async fn test_clicks_persist_with_next_save() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        t.select_point(Coords::new(3.0, 4.0)).unwrap();
        let first = WorkoutId::from(t.submit_workout(running_form()).await.unwrap().workout.id);

        t.focus_workout(&first).unwrap();
        t.focus_workout(&first).unwrap();
        t.focus_workout(&first).unwrap();

        // Focus alone does not save.
        let mut restored = tracker_with(kv.clone());
        restored.restore().await.unwrap();
        assert_eq!(restored.workout(&first).unwrap().clicks, 0);

        t.select_point(Coords::new(5.0, 6.0)).unwrap();
        t.submit_workout(running_form()).await.unwrap();

        let mut restored = tracker_with(kv);
        restored.restore().await.unwrap();
        assert_eq!(restored.store().len(), 2);
        assert_eq!(restored.workout(&first).unwrap().clicks, 3);
    }

    #[tokio::test]
    async fn test_focus_unknown_is_not_found() {
        let mut t = ready_tracker(KvStore::in_memory()).await;
        let err = t.focus_workout(&WorkoutId::from("nope")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_restored_markers_drawn_when_map_initializes() {
        let kv = KvStore::in_memory();
        let repo = WorkoutRepository::new(kv.clone());
        repo.save(&[
            Workout::running(Coords::new(1.0, 1.0), 5.0, 24.0, 178.0),
            Workout::cycling(Coords::new(2.0, 2.0), 20.0, 60.0, 400.0),
        ])
        .await
        .unwrap();

        let mut t = tracker_with(kv);
        let restored = t.restore().await.unwrap();
        // Map not ready yet: list items only.
        assert_eq!(restored.len(), 2);
        assert!(t.map_state().markers.is_empty());

        let commands = t.resolve_position(Coords::new(0.0, 0.0)).unwrap();
        assert!(matches!(commands[0], RenderCommand::InitMap { zoom: 13, .. }));
        assert_eq!(commands.len(), 3);
        assert_eq!(t.map_state().markers.len(), 2);
    }

    #[tokio::test]
    async fn test_geolocation_failure_blocks_map_clicks() {
        let mut t = tracker_with(KvStore::in_memory());
        t.position_unavailable("User denied Geolocation");

        assert_eq!(t.map_state().status, MapStatus::Unavailable);
        let err = t.select_point(Coords::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, AppError::MapUnavailable));
    }

    #[tokio::test]
    async fn test_submit_with_explicit_coords_before_map_ready() {
        let mut t = tracker_with(KvStore::in_memory());
        let f = form(json!({
            "type": "cycling", "distance": 20, "duration": 60,
            "elevationGain": 400, "coords": [47.0, 8.0]
        }));
        let submitted = t.submit_workout(f).await.unwrap();

        assert_eq!(submitted.workout.speed, Some(20.0));
        // No marker without a map, but the list item is still rendered.
        assert!(!submitted
            .commands
            .iter()
            .any(|c| matches!(c, RenderCommand::AddMarker { .. })));
        assert_eq!(t.store().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let kv = KvStore::in_memory();
        let mut t = ready_tracker(kv.clone()).await;
        t.select_point(Coords::new(1.0, 1.0)).unwrap();
        t.submit_workout(running_form()).await.unwrap();

        let commands = t.reset().await.unwrap();
        assert_eq!(commands.len(), 2);
        assert!(t.store().is_empty());
        assert!(t.map_state().markers.is_empty());
        assert_eq!(kv.get("workouts").await.unwrap(), None);
    }
}
