//! Scripted stand-in for a human player.

use arena_core::{CameraBasis, EnemyView, MovementIntent, PlayerSnapshot, Upgrade};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Planar distance under which the autopilot backs away from its target.
const RETREAT_DISTANCE: f32 = 5.0;
/// Chance per frame of flipping the strafe direction.
const STRAFE_FLIP_CHANCE: f64 = 0.02;
/// Largest yaw change per frame while wandering.
const WANDER_TURN: f32 = 0.08;

/// Produces aim, movement and upgrade choices for a headless match.
#[derive(Debug)]
pub(crate) struct Autopilot {
    rng: ChaCha8Rng,
    yaw: f32,
    strafe_left: bool,
    upgrades: Vec<Upgrade>,
    next_upgrade: usize,
}

impl Autopilot {
    /// Creates an autopilot that cycles through `upgrades` in order.
    pub(crate) fn new(seed: u64, upgrades: Vec<Upgrade>) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            yaw: 0.0,
            strafe_left: false,
            upgrades,
            next_upgrade: 0,
        }
    }

    /// Picks the next upgrade, falling back to damage when none are configured.
    pub(crate) fn choose_upgrade(&mut self) -> Upgrade {
        let Some(upgrade) = self.upgrades.get(self.next_upgrade % self.upgrades.len().max(1))
        else {
            return Upgrade::Damage;
        };
        self.next_upgrade += 1;
        *upgrade
    }

    /// Aims at the nearest enemy and fires, or wanders when the arena is empty.
    pub(crate) fn steer(
        &mut self,
        player: PlayerSnapshot,
        enemies: &EnemyView,
    ) -> (MovementIntent, CameraBasis) {
        let eye = player.position;
        let target = enemies
            .iter()
            .map(|enemy| enemy.position)
            .min_by(|a, b| a.distance(eye).total_cmp(&b.distance(eye)));

        let Some(target) = target else {
            self.yaw += self.rng.gen_range(-WANDER_TURN..WANDER_TURN);
            let intent = MovementIntent {
                forward: true,
                ..MovementIntent::default()
            };
            return (intent, CameraBasis::from_yaw_pitch(self.yaw, 0.0));
        };

        if self.rng.gen_bool(STRAFE_FLIP_CHANCE) {
            self.strafe_left = !self.strafe_left;
        }

        let delta = target - eye;
        let (yaw, pitch) = aim_angles(delta);
        self.yaw = yaw;
        let intent = MovementIntent {
            forward: false,
            backward: arena_core::planar_distance(target, eye) < RETREAT_DISTANCE,
            left: self.strafe_left,
            right: !self.strafe_left,
            shoot: true,
        };
        (intent, CameraBasis::from_yaw_pitch(yaw, pitch))
    }
}

/// Yaw and pitch whose camera forward axis points along `delta`.
fn aim_angles(delta: Vec3) -> (f32, f32) {
    let yaw = (-delta.x).atan2(-delta.z);
    let pitch = delta.y.atan2(delta.x.hypot(delta.z));
    (yaw, pitch)
}
