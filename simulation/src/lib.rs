#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame-driven simulation context wiring the world to its pure systems.
//!
//! A [`Simulation`] owns the authoritative [`World`] and every system. Each
//! call to [`Simulation::step`] runs the fixed per-frame pipeline: player
//! input, clock tick, crate hits, enemy behaviour, enemy hits and casualties,
//! power-up pickups and finally spawning with its wave-completion check. All
//! commands of a stage are applied before the next stage reads its views.

mod seeds;

use std::time::Duration;

use arena_core::{CameraBasis, Command, Event, MovementIntent, Upgrade};
use arena_system_combat::Combat;
use arena_system_enemy_ai::{self as enemy_ai, EnemyAi};
use arena_system_pickups::Pickups;
use arena_system_player::{self as player, PlayerController, PlayerInput};
use arena_system_spawning::{self as spawning, Spawning};
pub use arena_world::Config;
use arena_world::{self as world, query, World};
use tracing::debug_span;

pub use seeds::derive_labeled_seed;

/// Input sampled from the collaborators for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Movement and trigger state from the input collaborator.
    pub intent: MovementIntent,
    /// Camera orientation from the rendering collaborator.
    pub camera: CameraBasis,
    /// Simulated time covered by the frame.
    pub dt: Duration,
}

/// Explicit simulation context owning the world and every system.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    player: PlayerController,
    spawning: Spawning,
    enemy_ai: EnemyAi,
    combat: Combat,
    pickups: Pickups,
    frame: u64,
}

impl Simulation {
    /// Creates a simulation waiting for [`Simulation::start_match`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        let seed = config.seed();
        Self {
            world: World::new(config),
            player: PlayerController::new(player::Config::new(derive_labeled_seed(
                seed,
                seeds::PLAYER_STREAM,
            ))),
            spawning: Spawning::new(spawning::Config::new(derive_labeled_seed(
                seed,
                seeds::SPAWNING_STREAM,
            ))),
            enemy_ai: EnemyAi::new(enemy_ai::Config::new(derive_labeled_seed(
                seed,
                seeds::ENEMY_AI_STREAM,
            ))),
            combat: Combat::new(),
            pickups: Pickups::new(),
            frame: 0,
        }
    }

    /// Provides read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of frames stepped since construction.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Starts (or restarts) a match from its initial state.
    pub fn start_match(&mut self) -> Vec<Event> {
        let mut log = Vec::new();
        self.execute(vec![Command::StartMatch], &mut log);
        log
    }

    /// Applies an upgrade chosen in the upgrade menu and starts the next wave.
    pub fn select_upgrade(&mut self, upgrade: Upgrade) -> Vec<Event> {
        let mut log = Vec::new();
        self.execute(vec![Command::SelectUpgrade { upgrade }], &mut log);
        log
    }

    /// Advances the simulation by one frame and returns every event it produced.
    pub fn step(&mut self, input: FrameInput) -> Vec<Event> {
        self.frame = self.frame.saturating_add(1);
        let _span = debug_span!("frame", index = self.frame).entered();
        let mut log = Vec::new();
        let mut commands = Vec::new();

        let stats = query::stats(&self.world);
        self.player.handle(
            query::phase(&self.world),
            PlayerInput::new(input.intent, input.camera),
            input.dt,
            query::player(&self.world),
            query::map(&self.world),
            &query::crate_view(&self.world),
            stats.ammo(),
            query::weapon(&self.world),
            &mut commands,
        );
        self.execute(std::mem::take(&mut commands), &mut log);

        let mut tick_events = Vec::new();
        world::apply(
            &mut self.world,
            Command::Tick { dt: input.dt },
            &mut tick_events,
        );
        log.extend_from_slice(&tick_events);

        let projectiles = query::projectile_view(&self.world);
        self.combat.begin_frame();
        self.combat.handle_crates(
            query::phase(&self.world),
            &projectiles,
            &query::crate_view(&self.world),
            &mut commands,
        );
        self.execute(std::mem::take(&mut commands), &mut log);

        self.enemy_ai.handle(
            &tick_events,
            query::phase(&self.world),
            query::player(&self.world),
            &query::enemy_view(&self.world),
            query::clock(&self.world),
            &mut commands,
        );
        self.execute(std::mem::take(&mut commands), &mut log);

        self.combat.handle_enemies(
            query::phase(&self.world),
            &projectiles,
            &query::enemy_view(&self.world),
            &mut commands,
        );
        self.execute(std::mem::take(&mut commands), &mut log);

        self.pickups.handle(
            query::phase(&self.world),
            query::player(&self.world),
            &query::power_up_view(&self.world),
            &mut commands,
        );
        self.execute(std::mem::take(&mut commands), &mut log);

        self.spawning.handle(
            &tick_events,
            query::phase(&self.world),
            query::player(&self.world),
            query::map(&self.world),
            query::enemy_count(&self.world),
            &mut commands,
        );
        self.execute(commands, &mut log);

        log
    }

    fn execute(&mut self, commands: Vec<Command>, log: &mut Vec<Event>) {
        if commands.is_empty() {
            return;
        }
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        self.player.observe(&events);
        self.spawning.observe(&events);
        self.enemy_ai.observe(&events);
        log.append(&mut events);
    }
}
