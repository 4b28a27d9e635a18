#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure player controller that turns sampled input into movement and firing commands.

use std::time::Duration;

use arena_core::{
    CameraBasis, Command, CrateView, Event, GameState, MovementIntent, PlayerSnapshot, StaticMap,
    WeaponConfig, PLAYER_CRATE_CLEARANCE,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Player walking speed expressed in world units per second.
pub const MOVE_SPEED: f32 = 5.0;

/// Minimum walking time between two footstep events.
pub const FOOTSTEP_INTERVAL: Duration = Duration::from_millis(400);

const MUZZLE_FORWARD: f32 = 0.5;
const MUZZLE_RIGHT: f32 = 0.2;
const MUZZLE_UP: f32 = -0.2;
const MIN_SHOT_PITCH: f32 = 800.0;
const MAX_SHOT_PITCH: f32 = 1_000.0;

/// Configuration parameters required to construct the player controller.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the spread and pitch rolls.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Input snapshot sampled from the input and rendering collaborators for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Movement and trigger state.
    pub intent: MovementIntent,
    /// Camera orientation used for movement and aiming.
    pub camera: CameraBasis,
}

impl PlayerInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(intent: MovementIntent, camera: CameraBasis) -> Self {
        Self { intent, camera }
    }
}

/// Pure system that resolves player movement against the map and fires the weapon.
#[derive(Debug)]
pub struct PlayerController {
    rng_seed: u64,
    rng: ChaCha8Rng,
    elapsed: Duration,
    last_shot: Option<Duration>,
    last_step: Option<Duration>,
}

impl PlayerController {
    /// Creates a new player controller using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            elapsed: Duration::ZERO,
            last_shot: None,
            last_step: None,
        }
    }

    /// Resets the spread rolls along with fire and footstep timers whenever a match starts.
    pub fn observe(&mut self, events: &[Event]) {
        if events.iter().any(|event| matches!(event, Event::MatchStarted)) {
            self.rng = ChaCha8Rng::seed_from_u64(self.rng_seed);
            self.elapsed = Duration::ZERO;
            self.last_shot = None;
            self.last_step = None;
        }
    }

    /// Emits `MovePlayer` and `FireWeapon` commands for the current frame.
    #[allow(clippy::too_many_arguments)]
    pub fn handle(
        &mut self,
        phase: GameState,
        input: PlayerInput,
        dt: Duration,
        player: PlayerSnapshot,
        map: &StaticMap,
        crates: &CrateView,
        ammo: u32,
        weapon: WeaponConfig,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);

        let mut position = player.position;
        if input.intent.is_moving() {
            let displacement = displacement(input.intent, input.camera, dt);
            if displacement != Vec3::ZERO {
                // Walking into a wall still makes footstep noise.
                let footstep = self.footstep_due();
                let destination =
                    resolve_move(map, crates, position, displacement).unwrap_or(position);
                if destination != position || footstep {
                    out.push(Command::MovePlayer {
                        destination,
                        footstep,
                    });
                    position = destination;
                }
            }
        }

        if input.intent.shoot && ammo > 0 && self.trigger_ready(weapon.fire_interval()) {
            self.last_shot = Some(self.elapsed);
            out.push(self.shoot(position, input.camera, weapon));
        }
    }

    fn footstep_due(&mut self) -> bool {
        let due = self
            .last_step
            .map_or(true, |step| self.elapsed.saturating_sub(step) >= FOOTSTEP_INTERVAL);
        if due {
            self.last_step = Some(self.elapsed);
        }
        due
    }

    fn trigger_ready(&self, interval: Duration) -> bool {
        self.last_shot
            .map_or(true, |shot| self.elapsed.saturating_sub(shot) >= interval)
    }

    fn shoot(&mut self, position: Vec3, camera: CameraBasis, weapon: WeaponConfig) -> Command {
        let origin = position
            + camera.forward * MUZZLE_FORWARD
            + camera.right * MUZZLE_RIGHT
            + camera.up * MUZZLE_UP;

        let count = weapon.projectile_count();
        let directions = if count == 1 {
            vec![camera.forward]
        } else {
            (0..count)
                .map(|_| {
                    let lateral = (self.rng.gen::<f32>() - 0.5) * weapon.spread();
                    let vertical = (self.rng.gen::<f32>() - 0.5) * weapon.spread();
                    (camera.forward + camera.right * lateral + camera.up * vertical)
                        .normalize_or_zero()
                })
                .collect()
        };

        Command::FireWeapon {
            origin,
            directions,
            pitch: self.rng.gen_range(MIN_SHOT_PITCH..MAX_SHOT_PITCH),
        }
    }
}

/// Converts intent into a ground-plane displacement relative to the camera.
fn displacement(intent: MovementIntent, camera: CameraBasis, dt: Duration) -> Vec3 {
    let forward = Vec3::new(camera.forward.x, 0.0, camera.forward.z).normalize_or_zero();
    let right = Vec3::new(camera.right.x, 0.0, camera.right.z).normalize_or_zero();

    let mut direction = Vec3::ZERO;
    if intent.forward {
        direction += forward;
    }
    if intent.backward {
        direction -= forward;
    }
    if intent.right {
        direction += right;
    }
    if intent.left {
        direction -= right;
    }

    direction.normalize_or_zero() * MOVE_SPEED * dt.as_secs_f32()
}

/// Resolves a displacement against walls with axis sliding, then against crates.
///
/// Returns `None` when the player cannot move at all.
fn resolve_move(
    map: &StaticMap,
    crates: &CrateView,
    position: Vec3,
    displacement: Vec3,
) -> Option<Vec3> {
    if displacement == Vec3::ZERO {
        return None;
    }

    let candidates = [
        position + displacement,
        position + Vec3::new(displacement.x, 0.0, 0.0),
        position + Vec3::new(0.0, 0.0, displacement.z),
    ];
    let destination = candidates
        .into_iter()
        .find(|candidate| *candidate != position && !map.is_wall_at(*candidate))?;

    let blocked = crates.iter().any(|crate_snapshot| {
        arena_core::planar_distance(crate_snapshot.position, destination) < PLAYER_CRATE_CLEARANCE
    });
    if blocked {
        None
    } else {
        Some(destination)
    }
}
