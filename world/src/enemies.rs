//! Enemy roster storage and hit resolution.

use std::collections::BTreeMap;

use arena_core::{EnemyId, EnemyKind, EnemySnapshot};
use glam::Vec3;

/// Distance an enemy is pushed away from the player when struck.
const KNOCKBACK_DISTANCE: f32 = 0.5;

#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec3,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
    pub(crate) speed: f32,
    pub(crate) damage: f32,
    pub(crate) hover_phase: f32,
}

#[derive(Debug)]
pub(crate) struct EnemyRoster {
    entries: BTreeMap<EnemyId, EnemyState>,
    next_enemy_id: EnemyId,
}

impl EnemyRoster {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.next_enemy_id = EnemyId::new(0);
    }

    /// Removes every enemy while keeping identifiers unique across waves.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn insert(&mut self, state: EnemyState) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(id, state);
        id
    }

    pub(crate) fn contains(&self, id: EnemyId) -> bool {
        self.entries.contains_key(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn relocate(&mut self, id: EnemyId, position: Vec3) -> bool {
        match self.entries.get_mut(&id) {
            Some(state) => {
                state.position = position;
                true
            }
            None => false,
        }
    }

    /// Subtracts `damage` from an enemy and knocks it away from `player`
    /// unless its kind is immune. Returns the remaining health.
    pub(crate) fn strike(&mut self, id: EnemyId, damage: f32, player: Vec3) -> Option<f32> {
        let state = self.entries.get_mut(&id)?;
        state.health -= damage;

        if !state.kind.profile().knockback_immune {
            let away = Vec3::new(state.position.x - player.x, 0.0, state.position.z - player.z);
            state.position += away.normalize_or_zero() * KNOCKBACK_DISTANCE;
        }

        Some(state.health)
    }

    /// Removes every enemy whose health is exhausted, in identifier order.
    pub(crate) fn drain_casualties(&mut self) -> Vec<(EnemyId, EnemyState)> {
        let fallen: Vec<EnemyId> = self
            .entries
            .iter()
            .filter(|(_, state)| state.health <= 0.0)
            .map(|(id, _)| *id)
            .collect();

        fallen
            .into_iter()
            .filter_map(|id| self.entries.remove(&id).map(|state| (id, state)))
            .collect()
    }

    pub(crate) fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.entries
            .iter()
            .map(|(id, state)| EnemySnapshot {
                id: *id,
                kind: state.kind,
                position: state.position,
                health: state.health,
                max_health: state.max_health,
                speed: state.speed,
                damage: state.damage,
                hover_phase: state.hover_phase,
            })
            .collect()
    }
}
