//! Destructible crate storage and placement.

use std::collections::BTreeMap;

use arena_core::{CrateId, CrateSnapshot, GridCell, StaticMap};
use glam::Vec3;
use rand::Rng;

/// Health assigned to every crate at placement.
pub(crate) const CRATE_HEALTH: f32 = 30.0;

/// Height at which crates rest.
const CRATE_HEIGHT: f32 = 1.0;

/// Attempts made to find a floor cell for a single crate.
const PLACEMENT_ATTEMPTS: u32 = 50;

/// Crates never spawn this close to the player's starting position.
const SPAWN_CLEARANCE: f32 = 5.0;

#[derive(Clone, Debug)]
pub(crate) struct CrateState {
    pub(crate) position: Vec3,
    pub(crate) health: f32,
    pub(crate) max_health: f32,
}

/// Outcome of striking a crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum CrateHit {
    Damaged { health: f32 },
    Destroyed { position: Vec3 },
}

#[derive(Debug)]
pub(crate) struct CrateRegistry {
    entries: BTreeMap<CrateId, CrateState>,
    next_crate_id: CrateId,
}

impl CrateRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_crate_id: CrateId::new(0),
        }
    }

    /// Drops every crate and restarts identifier allocation.
    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.next_crate_id = CrateId::new(0);
    }

    pub(crate) fn insert(&mut self, position: Vec3, health: f32) -> CrateId {
        let id = self.next_crate_id;
        self.next_crate_id = CrateId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            CrateState {
                position,
                health,
                max_health: health,
            },
        );
        id
    }

    pub(crate) fn contains(&self, id: CrateId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Scatters up to `count` crates on random floor cells away from `spawn`.
    ///
    /// A crate whose placement attempts are exhausted is skipped.
    pub(crate) fn scatter<R: Rng>(&mut self, map: &StaticMap, spawn: Vec3, count: u32, rng: &mut R) {
        for _ in 0..count {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let cell = GridCell::new(
                    rng.gen_range(0..map.columns()) as i32,
                    rng.gen_range(0..map.rows()) as i32,
                );
                let candidate = map.cell_center(cell) + Vec3::Y * CRATE_HEIGHT;
                if map.is_wall(cell)
                    || arena_core::planar_distance(candidate, spawn) <= SPAWN_CLEARANCE
                {
                    continue;
                }
                let _ = self.insert(candidate, CRATE_HEALTH);
                break;
            }
        }
    }

    /// Applies `damage` to a crate, removing it once its health is exhausted.
    pub(crate) fn strike(&mut self, id: CrateId, damage: f32) -> Option<CrateHit> {
        let state = self.entries.get_mut(&id)?;
        state.health -= damage;
        if state.health > 0.0 {
            return Some(CrateHit::Damaged {
                health: state.health,
            });
        }
        let position = state.position;
        let _ = self.entries.remove(&id);
        Some(CrateHit::Destroyed { position })
    }

    /// Reports whether any crate lies within `radius` of `position` on the ground plane.
    pub(crate) fn blocks(&self, position: Vec3, radius: f32) -> bool {
        self.entries
            .values()
            .any(|state| arena_core::planar_distance(state.position, position) < radius)
    }

    pub(crate) fn snapshots(&self) -> Vec<CrateSnapshot> {
        self.entries
            .iter()
            .map(|(id, state)| CrateSnapshot {
                id: *id,
                position: state.position,
                health: state.health,
                max_health: state.max_health,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn scatter_avoids_walls_and_spawn() {
        let map = StaticMap::arena();
        let spawn = Vec3::new(-18.0, 1.0, -16.0);
        let mut registry = CrateRegistry::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        registry.scatter(&map, spawn, 15, &mut rng);

        let crates = registry.snapshots();
        assert!(!crates.is_empty());
        for crate_state in crates {
            assert!(!map.is_wall_at(crate_state.position));
            assert!(arena_core::planar_distance(crate_state.position, spawn) > SPAWN_CLEARANCE);
            assert_eq!(crate_state.health, CRATE_HEALTH);
        }
    }

    #[test]
    fn strike_reports_damage_then_destruction() {
        let mut registry = CrateRegistry::new();
        let id = registry.insert(Vec3::new(1.0, 1.0, 2.0), CRATE_HEALTH);

        assert_eq!(
            registry.strike(id, 20.0),
            Some(CrateHit::Damaged { health: 10.0 })
        );
        assert_eq!(
            registry.strike(id, 20.0),
            Some(CrateHit::Destroyed {
                position: Vec3::new(1.0, 1.0, 2.0)
            })
        );
        assert_eq!(registry.strike(id, 20.0), None);
        assert!(!registry.contains(id));
    }

    #[test]
    fn blocks_uses_planar_distance() {
        let mut registry = CrateRegistry::new();
        let _ = registry.insert(Vec3::new(0.0, 1.0, 0.0), CRATE_HEALTH);

        assert!(registry.blocks(Vec3::new(1.0, 50.0, 0.0), 1.5));
        assert!(!registry.blocks(Vec3::new(1.6, 1.0, 0.0), 1.5));
    }
}
