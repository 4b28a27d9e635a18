#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that collects power-ups the player walks over.

use arena_core::{Command, GameState, PlayerSnapshot, PowerUpView, PICKUP_RADIUS};

/// Pickup system that queues collection commands for power-ups near the player.
#[derive(Debug, Default)]
pub struct Pickups;

impl Pickups {
    /// Creates a new pickup system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::CollectPowerUp` for every power-up within reach of the player.
    ///
    /// Distance is measured on the ground plane so the cosmetic bob never matters.
    pub fn handle(
        &self,
        phase: GameState,
        player: PlayerSnapshot,
        power_ups: &PowerUpView,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing {
            return;
        }

        out.extend(
            power_ups
                .iter()
                .filter(|power_up| {
                    arena_core::planar_distance(power_up.position, player.position) < PICKUP_RADIUS
                })
                .map(|power_up| Command::CollectPowerUp {
                    power_up: power_up.id,
                }),
        );
    }
}
