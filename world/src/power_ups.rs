//! Collectible power-up storage.

use std::{collections::BTreeMap, time::Duration};

use arena_core::{PowerUpId, PowerUpKind, PowerUpSnapshot};
use glam::Vec3;
use rand::Rng;

/// Height at which dropped power-ups rest.
const DROP_HEIGHT: f32 = 1.0;

const BOB_AMPLITUDE: f32 = 0.2;
const BOB_FREQUENCY: f32 = 3.0;

#[derive(Clone, Debug)]
pub(crate) struct PowerUpState {
    pub(crate) kind: PowerUpKind,
    pub(crate) position: Vec3,
    pub(crate) value: u32,
    pub(crate) spawned_at: Duration,
}

#[derive(Debug)]
pub(crate) struct PowerUpRegistry {
    entries: BTreeMap<PowerUpId, PowerUpState>,
    next_power_up_id: PowerUpId,
}

impl PowerUpRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_power_up_id: PowerUpId::new(0),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.entries.clear();
        self.next_power_up_id = PowerUpId::new(0);
    }

    /// Drops a power-up of a randomly chosen kind at ground level below `position`.
    pub(crate) fn drop_random<R: Rng>(
        &mut self,
        position: Vec3,
        now: Duration,
        rng: &mut R,
    ) -> (PowerUpId, PowerUpState) {
        let kind = roll_kind(rng.gen::<f32>());
        let state = PowerUpState {
            kind,
            position: Vec3::new(position.x, DROP_HEIGHT, position.z),
            value: kind.default_value(),
            spawned_at: now,
        };
        let id = self.next_power_up_id;
        self.next_power_up_id = PowerUpId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(id, state.clone());
        (id, state)
    }

    pub(crate) fn remove(&mut self, id: PowerUpId) -> Option<PowerUpState> {
        self.entries.remove(&id)
    }

    pub(crate) fn snapshots(&self, now: Duration) -> Vec<PowerUpSnapshot> {
        self.entries
            .iter()
            .map(|(id, state)| {
                let age = now.saturating_sub(state.spawned_at).as_secs_f32();
                PowerUpSnapshot {
                    id: *id,
                    kind: state.kind,
                    position: state.position,
                    value: state.value,
                    bob_offset: BOB_AMPLITUDE * (BOB_FREQUENCY * age).sin(),
                }
            })
            .collect()
    }
}

fn roll_kind(roll: f32) -> PowerUpKind {
    if roll < 0.3 {
        PowerUpKind::Health
    } else if roll < 0.6 {
        PowerUpKind::Ammo
    } else {
        PowerUpKind::Score
    }
}
