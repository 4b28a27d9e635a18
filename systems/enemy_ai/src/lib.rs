#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic enemy behaviour: straight-line pursuit, melee attacks and hovering.

use std::time::Duration;

use arena_core::{Command, EnemySnapshot, EnemyView, Event, GameState, PlayerSnapshot};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Probability that an attacking enemy voices its hit on a given frame.
pub const DAMAGE_SOUND_CHANCE: f64 = 0.05;

const HOVER_BASE: f32 = 2.0;
const HOVER_AMPLITUDE: f32 = 0.5;
const HOVER_FREQUENCY: f32 = 2.0;

/// Configuration parameters required to construct the enemy AI.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding the damage-sound rolls.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that moves enemies towards the player and applies their attacks.
#[derive(Debug)]
pub struct EnemyAi {
    rng_seed: u64,
    rng: ChaCha8Rng,
}

impl EnemyAi {
    /// Creates a new enemy AI using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Rewinds the damage-sound rolls whenever a match starts.
    pub fn observe(&mut self, events: &[Event]) {
        if events.iter().any(|event| matches!(event, Event::MatchStarted)) {
            self.rng = ChaCha8Rng::seed_from_u64(self.rng_seed);
        }
    }

    /// Consumes frame events and the enemy view to emit movement and damage commands.
    ///
    /// `clock` is the simulation time after the frame's tick and drives hovering.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: GameState,
        player: PlayerSnapshot,
        enemies: &EnemyView,
        clock: Duration,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing {
            return;
        }

        let dt = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(*dt),
                _ => None,
            })
            .fold(Duration::ZERO, Duration::saturating_add);
        if dt.is_zero() {
            return;
        }

        for enemy in enemies.iter() {
            self.drive(enemy, player.position, dt, clock, out);
        }
    }

    fn drive(
        &mut self,
        enemy: &EnemySnapshot,
        player: Vec3,
        dt: Duration,
        clock: Duration,
        out: &mut Vec<Command>,
    ) {
        let profile = enemy.kind.profile();
        let mut position = enemy.position;
        if profile.hovers {
            position.y = hover_height(clock, enemy.hover_phase);
        }

        let to_player = Vec3::new(player.x - position.x, 0.0, player.z - position.z);
        if to_player.length() > profile.attack_range {
            position += to_player.normalize_or_zero() * enemy.speed * dt.as_secs_f32();
        } else {
            out.push(Command::DamagePlayer {
                amount: enemy.damage * dt.as_secs_f32() * profile.damage_scale,
                audible: self.rng.gen_bool(DAMAGE_SOUND_CHANCE),
            });
        }

        if position != enemy.position {
            out.push(Command::MoveEnemy {
                enemy: enemy.id,
                position,
            });
        }
    }
}

/// Height of a hovering enemy at simulation time `clock`.
#[must_use]
pub fn hover_height(clock: Duration, phase: f32) -> f32 {
    HOVER_BASE + HOVER_AMPLITUDE * (HOVER_FREQUENCY * clock.as_secs_f32() + phase).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_stays_within_band() {
        for millis in (0..5_000).step_by(50) {
            let height = hover_height(Duration::from_millis(millis), 1.3);
            assert!((1.5..=2.5).contains(&height));
        }
    }

    #[test]
    fn hover_starts_at_base_for_zero_phase() {
        assert!((hover_height(Duration::ZERO, 0.0) - HOVER_BASE).abs() < 1e-6);
    }
}
