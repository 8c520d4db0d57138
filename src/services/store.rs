// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory ordered workout collection.

use crate::models::{Workout, WorkoutId};

/// Ordered collection of workouts. Insertion order is display order.
///
/// Pure membership: nothing here persists or renders.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end.
    pub fn add(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Remove the first workout with `id`, keeping the order of the rest.
    ///
    /// Returns `None` (and changes nothing) when no workout matches.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id() == id)?;
        Some(self.workouts.remove(index))
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    /// Overwrite the whole collection (restore path).
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn as_slice(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

impl<'a> IntoIterator for &'a WorkoutStore {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coords;

    fn run(distance: f64) -> Workout {
        Workout::running(Coords::new(0.0, 0.0), distance, 30.0, 170.0)
    }

    #[test]
    fn test_add_then_find() {
        let mut store = WorkoutStore::new();
        let w = run(5.0);
        let id = w.id().clone();
        store.add(w.clone());

        assert_eq!(store.find_by_id(&id), Some(&w));
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = WorkoutStore::new();
        for d in [1.0, 2.0, 3.0] {
            store.add(run(d));
        }
        let distances: Vec<f64> = store.iter().map(|w| w.distance()).collect();
        assert_eq!(distances, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = WorkoutStore::new();
        let ws: Vec<Workout> = [1.0, 2.0, 3.0].into_iter().map(run).collect();
        for w in &ws {
            store.add(w.clone());
        }

        let removed = store.remove_by_id(ws[1].id());
        assert_eq!(removed.as_ref(), Some(&ws[1]));

        let distances: Vec<f64> = store.iter().map(|w| w.distance()).collect();
        assert_eq!(distances, vec![1.0, 3.0]);
        assert!(store.find_by_id(ws[1].id()).is_none());
    }

    #[test]
    fn test_remove_on_empty_is_noop() {
        let mut store = WorkoutStore::new();
        assert!(store.remove_by_id(&WorkoutId::from("missing")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_unknown_keeps_length() {
        let mut store = WorkoutStore::new();
        store.add(run(1.0));
        store.add(run(2.0));
        assert!(store.remove_by_id(&WorkoutId::from("missing")).is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_replace_all_overwrites() {
        let mut store = WorkoutStore::new();
        store.add(run(1.0));
        store.replace_all(vec![run(7.0), run(8.0)]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].distance(), 7.0);
    }

    #[test]
    fn test_find_by_id_mut_allows_click() {
        let mut store = WorkoutStore::new();
        let w = run(1.0);
        let id = w.id().clone();
        store.add(w);

        store.find_by_id_mut(&id).unwrap().click();
        assert_eq!(store.find_by_id(&id).unwrap().clicks(), 1);
    }
}
