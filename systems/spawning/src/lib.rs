#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave spawner responsible for emitting enemy spawn and wave completion commands.

use std::time::Duration;

use arena_core::{
    Command, EnemyKind, Event, GameState, GridCell, PlayerSnapshot, StaticMap, FINAL_WAVE,
};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Maximum number of enemies alive at once; spawning pauses at the cap.
pub const MAX_LIVE_ENEMIES: usize = 25;

/// Floor cells tried before a spawn attempt is abandoned.
pub const SPAWN_ATTEMPTS: u32 = 100;

/// Enemies never spawn closer than this to the player.
pub const MIN_PLAYER_DISTANCE: f32 = 10.0;

const BASE_SPAWN_INTERVAL_MS: u64 = 2_000;
const SPAWN_INTERVAL_STEP_MS: u64 = 150;
const MIN_SPAWN_INTERVAL_MS: u64 = 500;
const BOSS_SPAWN_INTERVAL_MS: u64 = 1_000;

/// Number of enemies the wave spawns in total.
#[must_use]
pub const fn quota_for_wave(wave: u32) -> u32 {
    if wave >= FINAL_WAVE {
        1
    } else {
        8 + wave * 3
    }
}

/// Time between two spawn attempts during the wave.
#[must_use]
pub fn spawn_interval_for_wave(wave: u32) -> Duration {
    if wave >= FINAL_WAVE {
        return Duration::from_millis(BOSS_SPAWN_INTERVAL_MS);
    }
    let reduction = u64::from(wave) * SPAWN_INTERVAL_STEP_MS;
    Duration::from_millis(
        BASE_SPAWN_INTERVAL_MS
            .saturating_sub(reduction)
            .max(MIN_SPAWN_INTERVAL_MS),
    )
}

/// Attributes rolled for a freshly spawned enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnProfile {
    /// Variant to spawn.
    pub kind: EnemyKind,
    /// Health before the wave multiplier.
    pub base_health: f32,
    /// Speed before jitter.
    pub base_speed: f32,
    /// Damage per second while attacking.
    pub damage: f32,
    /// Height at which the enemy appears.
    pub height: f32,
}

impl SpawnProfile {
    const fn of(kind: EnemyKind, base_health: f32, base_speed: f32, damage: f32, height: f32) -> Self {
        Self {
            kind,
            base_health,
            base_speed,
            damage,
            height,
        }
    }
}

/// Selects the enemy type for a wave from a uniform `roll` in `[0, 1)`.
#[must_use]
pub fn profile_for_wave(wave: u32, roll: f32) -> SpawnProfile {
    const DRONE: SpawnProfile = SpawnProfile::of(EnemyKind::Drone, 100.0, 4.0, 10.0, 1.5);

    if wave >= FINAL_WAVE {
        SpawnProfile::of(EnemyKind::Boss, 2_000.0, 2.0, 50.0, 3.0)
    } else if wave >= 3 {
        if roll < 0.3 {
            SpawnProfile::of(EnemyKind::Hybrid, 250.0, 3.0, 20.0, 1.5)
        } else if roll < 0.6 {
            SpawnProfile::of(EnemyKind::Parasite, 60.0, 7.0, 5.0, 0.5)
        } else {
            DRONE
        }
    } else if roll < 0.2 {
        SpawnProfile::of(EnemyKind::Parasite, 50.0, 6.0, 5.0, 0.5)
    } else {
        DRONE
    }
}

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that spawns each wave's quota and signals when the wave is cleared.
#[derive(Debug)]
pub struct Spawning {
    rng_seed: u64,
    rng: ChaCha8Rng,
    wave: u32,
    quota: u32,
    spawned: u32,
    spawn_interval: Duration,
    accumulator: Duration,
    completed: bool,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            wave: 1,
            quota: quota_for_wave(1),
            spawned: 0,
            spawn_interval: spawn_interval_for_wave(1),
            accumulator: Duration::ZERO,
            completed: false,
        }
    }

    /// Resets the per-wave bookkeeping whenever the world starts a wave.
    ///
    /// A match start also rewinds the placement rolls so that a restart
    /// replays exactly like a fresh match.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::MatchStarted => self.rng = ChaCha8Rng::seed_from_u64(self.rng_seed),
                Event::WaveStarted { wave } => self.begin_wave(*wave),
                _ => {}
            }
        }
    }

    /// Number of enemies issued during the current wave.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Total number of enemies the current wave will issue.
    #[must_use]
    pub const fn quota(&self) -> u32 {
        self.quota
    }

    fn begin_wave(&mut self, wave: u32) {
        self.wave = wave;
        self.quota = quota_for_wave(wave);
        self.spawned = 0;
        self.spawn_interval = spawn_interval_for_wave(wave);
        self.accumulator = Duration::ZERO;
        self.completed = false;
    }

    /// Consumes frame events and immutable views to emit spawn or completion commands.
    ///
    /// Wave completion is evaluated before spawning so that an enemy spawned
    /// on this frame can never be mistaken for the end of the wave.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GameState,
        player: PlayerSnapshot,
        map: &StaticMap,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing || self.completed {
            return;
        }

        if self.spawned >= self.quota {
            if live_enemies == 0 {
                self.completed = true;
                out.push(Command::CompleteWave { wave: self.wave });
            }
            return;
        }

        let accumulated = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        self.accumulator = self.accumulator.saturating_add(accumulated);

        if live_enemies >= MAX_LIVE_ENEMIES || self.accumulator < self.spawn_interval {
            return;
        }
        self.accumulator = Duration::ZERO;

        let Some(position) = self.find_spawn_position(map, player.position) else {
            debug!(wave = self.wave, "spawn attempt abandoned");
            return;
        };

        let profile = profile_for_wave(self.wave, self.rng.gen());
        let health = profile.base_health * (1.0 + self.wave as f32 * 0.1);
        let speed = profile.base_speed * self.rng.gen_range(0.9..1.1);
        self.spawned += 1;
        out.push(Command::SpawnEnemy {
            kind: profile.kind,
            position: Vec3::new(position.x, profile.height, position.z),
            health,
            speed,
            damage: profile.damage,
        });
    }

    fn find_spawn_position(&mut self, map: &StaticMap, player: Vec3) -> Option<Vec3> {
        for _ in 0..SPAWN_ATTEMPTS {
            let cell = GridCell::new(
                self.rng.gen_range(0..map.columns()) as i32,
                self.rng.gen_range(0..map.rows()) as i32,
            );
            if map.is_wall(cell) {
                continue;
            }
            let candidate = map.cell_center(cell);
            if arena_core::planar_distance(candidate, player) < MIN_PLAYER_DISTANCE {
                continue;
            }
            return Some(candidate);
        }
        None
    }
}
