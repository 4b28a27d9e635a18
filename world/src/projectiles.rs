//! Authoritative in-flight projectile storage.

use std::{collections::BTreeMap, time::Duration};

use arena_core::{ProjectileId, ProjectileSnapshot, PROJECTILE_LIFETIME, PROJECTILE_SPEED};
use glam::Vec3;

/// State of a projectile stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) position: Vec3,
    pub(crate) direction: Vec3,
    pub(crate) damage: f32,
    pub(crate) created_at: Duration,
}

/// Registry that stores projectiles and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct ProjectileRegistry {
    entries: BTreeMap<ProjectileId, ProjectileState>,
    next_projectile_id: ProjectileId,
}

impl ProjectileRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_projectile_id: ProjectileId::new(0),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.next_projectile_id = ProjectileId::new(0);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Stores a projectile, returning the identifier allocated for it.
    pub(crate) fn insert(&mut self, state: ProjectileState) -> ProjectileId {
        let id = self.next_projectile_id;
        self.next_projectile_id = ProjectileId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(id, state);
        id
    }

    /// Removes a projectile. Missing identifiers are ignored.
    pub(crate) fn remove(&mut self, id: ProjectileId) -> Option<ProjectileState> {
        self.entries.remove(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Moves every projectile along its direction and removes those that
    /// outlived [`PROJECTILE_LIFETIME`] at time `now`.
    pub(crate) fn advance(&mut self, dt: Duration, now: Duration) -> Vec<ProjectileId> {
        let step = PROJECTILE_SPEED * dt.as_secs_f32();
        for state in self.entries.values_mut() {
            state.position += state.direction * step;
        }

        let expired: Vec<ProjectileId> = self
            .entries
            .iter()
            .filter(|(_, state)| now.saturating_sub(state.created_at) > PROJECTILE_LIFETIME)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            let _ = self.entries.remove(id);
        }
        expired
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.entries
            .iter()
            .map(|(id, state)| ProjectileSnapshot {
                id: *id,
                position: state.position,
                direction: state.direction,
                damage: state.damage,
                created_at: state.created_at,
            })
            .collect()
    }
}
