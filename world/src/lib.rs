#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the arena.
//!
//! The world owns every entity collection and the stats ledger. It is only
//! mutated through [`apply`], which validates each [`Command`] against the
//! current phase and broadcasts the resulting [`Event`] values.

mod crates;
mod enemies;
mod power_ups;
mod progression;
mod projectiles;

use std::time::Duration;

use arena_core::{
    Command, Event, GameState, GameStats, StatsOutcome, StatsUpdate, WeaponConfig, Zone,
    PLAYER_CRATE_CLEARANCE, PLAYER_EYE_HEIGHT, UPGRADE_AMMO_BONUS,
};
pub use arena_core::{MapError, StaticMap};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    crates::{CrateHit, CrateRegistry},
    enemies::{EnemyRoster, EnemyState},
    power_ups::PowerUpRegistry,
    projectiles::{ProjectileRegistry, ProjectileState},
};

/// Number of crates scattered at match start unless configured otherwise.
pub const DEFAULT_CRATE_COUNT: u32 = 15;
const CRATE_DROP_CHANCE: f64 = 0.5;
const ENEMY_DROP_CHANCE: f64 = 0.3;

/// Construction parameters for a [`World`].
#[derive(Clone, Debug)]
pub struct Config {
    seed: u64,
    map: StaticMap,
    crate_count: u32,
    starting_stats: GameStats,
    starting_weapon: WeaponConfig,
}

impl Config {
    /// Creates a configuration for the stock arena using the provided seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map: StaticMap::arena(),
            crate_count: DEFAULT_CRATE_COUNT,
            starting_stats: GameStats::STARTING,
            starting_weapon: WeaponConfig::STARTING,
        }
    }

    /// Replaces the tile map.
    #[must_use]
    pub fn with_map(mut self, map: StaticMap) -> Self {
        self.map = map;
        self
    }

    /// Sets how many crates are scattered at match start.
    #[must_use]
    pub fn with_crate_count(mut self, crate_count: u32) -> Self {
        self.crate_count = crate_count;
        self
    }

    /// Overrides the ledger contents restored by every match start.
    #[must_use]
    pub fn with_starting_stats(mut self, stats: GameStats) -> Self {
        self.starting_stats = stats;
        self
    }

    /// Overrides the weapon handed out by every match start.
    #[must_use]
    pub fn with_starting_weapon(mut self, weapon: WeaponConfig) -> Self {
        self.starting_weapon = weapon;
        self
    }

    /// Seed feeding crate placement and drop rolls.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tile map the match is played on.
    #[must_use]
    pub fn map(&self) -> &StaticMap {
        &self.map
    }

    /// Number of crates scattered at match start.
    #[must_use]
    pub const fn crate_count(&self) -> u32 {
        self.crate_count
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Represents the authoritative arena world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    rng: ChaCha8Rng,
    phase: GameState,
    stats: GameStats,
    weapon: WeaponConfig,
    clock: Duration,
    player: Vec3,
    projectiles: ProjectileRegistry,
    crates: CrateRegistry,
    enemies: EnemyRoster,
    power_ups: PowerUpRegistry,
}

impl World {
    /// Creates a world waiting in [`GameState::Menu`] for a match to start.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let player = spawn_point(&config.map);
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            phase: GameState::Menu,
            stats: config.starting_stats,
            weapon: config.starting_weapon,
            clock: Duration::ZERO,
            player,
            projectiles: ProjectileRegistry::new(),
            crates: CrateRegistry::new(),
            enemies: EnemyRoster::new(),
            power_ups: PowerUpRegistry::new(),
            config,
        }
    }

    fn start_match(&mut self, out_events: &mut Vec<Event>) {
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.stats = self.config.starting_stats;
        self.weapon = self.config.starting_weapon;
        self.clock = Duration::ZERO;
        self.projectiles.reset();
        self.enemies.reset();

        out_events.push(Event::MatchStarted);
        self.rebuild_arena(out_events);
        info!(
            seed = self.config.seed,
            crates = self.crates.snapshots().len(),
            "match started"
        );
        self.enter_phase(GameState::Playing, out_events);
        out_events.push(Event::WaveStarted {
            wave: self.stats.wave(),
        });
        out_events.push(Event::ZoneEntered {
            zone: Zone::for_wave(self.stats.wave()),
        });
    }

    /// Returns the player to the spawn point and lays out a fresh set of crates.
    fn rebuild_arena(&mut self, out_events: &mut Vec<Event>) {
        let spawn = spawn_point(&self.config.map);
        if spawn != self.player {
            self.player = spawn;
            out_events.push(Event::PlayerMoved { position: spawn });
        }
        self.power_ups.reset();
        self.crates.reset();
        self.crates.scatter(
            &self.config.map,
            self.player,
            self.config.crate_count,
            &mut self.rng,
        );
    }

    fn enter_phase(&mut self, phase: GameState, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        info!(from = ?self.phase, to = ?phase, wave = self.stats.wave(), "phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    /// Applies a ledger update and reacts to the thresholds it crossed.
    fn update_stats(&mut self, update: StatsUpdate, out_events: &mut Vec<Event>) -> StatsOutcome {
        let outcome = self.stats.apply(update);
        self.resolve_stats_outcome(outcome, out_events);
        outcome
    }

    fn resolve_stats_outcome(&mut self, outcome: StatsOutcome, out_events: &mut Vec<Event>) {
        if outcome.critical {
            out_events.push(Event::HealthCritical);
        }
        if outcome.depleted {
            self.enter_phase(GameState::GameOver, out_events);
        }
    }

    fn drop_power_up(&mut self, position: Vec3, chance: f64, out_events: &mut Vec<Event>) {
        if !self.rng.gen_bool(chance) {
            return;
        }
        let (power_up, state) = self
            .power_ups
            .drop_random(position, self.clock, &mut self.rng);
        out_events.push(Event::PowerUpSpawned {
            power_up,
            kind: state.kind,
            position: state.position,
        });
    }

    fn fire(&mut self, origin: Vec3, directions: Vec<Vec3>, pitch: f32, out_events: &mut Vec<Event>) {
        let directions: Vec<Vec3> = directions
            .into_iter()
            .filter_map(Vec3::try_normalize)
            .collect();
        if self.stats.ammo() == 0 || directions.is_empty() {
            return;
        }

        let _ = self.update_stats(StatsUpdate::SpendAmmo, out_events);
        out_events.push(Event::ShotFired {
            pitch,
            projectiles: directions.len() as u32,
        });
        for direction in directions {
            let projectile = self.projectiles.insert(ProjectileState {
                position: origin,
                direction,
                damage: self.weapon.damage(),
                created_at: self.clock,
            });
            out_events.push(Event::ProjectileSpawned {
                projectile,
                position: origin,
                direction,
            });
        }
    }

    fn collect_casualties(&mut self, out_events: &mut Vec<Event>) {
        for (enemy, state) in self.enemies.drain_casualties() {
            let points = state.kind.profile().score;
            out_events.push(Event::EnemyDestroyed {
                enemy,
                kind: state.kind,
                position: state.position,
                points,
            });
            let _ = self.update_stats(StatsUpdate::AddScore(points), out_events);
            self.drop_power_up(state.position, ENEMY_DROP_CHANCE, out_events);
        }
    }

    fn select_upgrade(&mut self, upgrade: arena_core::Upgrade, out_events: &mut Vec<Event>) {
        let previous_zone = Zone::for_wave(self.stats.wave());
        self.weapon = self.weapon.upgraded(upgrade);
        let _ = self.update_stats(StatsUpdate::AdvanceWave, out_events);
        let _ = self.update_stats(StatsUpdate::AddAmmo(UPGRADE_AMMO_BONUS), out_events);
        self.enemies.clear();
        self.projectiles.clear();

        out_events.push(Event::UpgradeApplied {
            upgrade,
            weapon: self.weapon,
        });
        self.rebuild_arena(out_events);
        debug!(
            wave = self.stats.wave(),
            crates = self.crates.snapshots().len(),
            "arena rebuilt"
        );
        self.enter_phase(GameState::Playing, out_events);

        let wave = self.stats.wave();
        out_events.push(Event::WaveStarted { wave });
        let zone = Zone::for_wave(wave);
        if zone != previous_zone {
            out_events.push(Event::ZoneEntered { zone });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn spawn_point(map: &StaticMap) -> Vec3 {
    map.first_floor_cell()
        .map_or(Vec3::ZERO, |cell| map.cell_center(cell))
        + Vec3::Y * PLAYER_EYE_HEIGHT
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if !progression::accepts(world.phase, &command) {
        debug!(phase = ?world.phase, ?command, "command rejected");
        return;
    }

    match command {
        Command::StartMatch => world.start_match(out_events),
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            for projectile in world.projectiles.advance(dt, world.clock) {
                out_events.push(Event::ProjectileExpired { projectile });
            }
        }
        Command::MovePlayer {
            destination,
            footstep,
        } => {
            let blocked = world.config.map.is_wall_at(destination)
                || world.crates.blocks(destination, PLAYER_CRATE_CLEARANCE);
            if blocked || !destination.is_finite() {
                return;
            }
            if destination != world.player {
                world.player = destination;
                out_events.push(Event::PlayerMoved {
                    position: destination,
                });
            }
            if footstep {
                out_events.push(Event::Footstep);
            }
        }
        Command::FireWeapon {
            origin,
            directions,
            pitch,
        } => world.fire(origin, directions, pitch, out_events),
        Command::SpawnEnemy {
            kind,
            position,
            health,
            speed,
            damage,
        } => {
            if !(health.is_finite() && health > 0.0) {
                return;
            }
            let hover_phase = if kind.profile().hovers {
                world.rng.gen_range(0.0..std::f32::consts::TAU)
            } else {
                0.0
            };
            let enemy = world.enemies.insert(EnemyState {
                kind,
                position,
                health,
                max_health: health,
                speed: speed.max(0.0),
                damage: damage.max(0.0),
                hover_phase,
            });
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                position,
            });
        }
        Command::MoveEnemy { enemy, position } => {
            let _ = world.enemies.relocate(enemy, position);
        }
        Command::DamagePlayer { amount, audible } => {
            let outcome = world.stats.apply(StatsUpdate::Damage(amount));
            out_events.push(Event::PlayerDamaged {
                amount,
                health: world.stats.health(),
                audible,
            });
            world.resolve_stats_outcome(outcome, out_events);
        }
        Command::HitCrate {
            crate_id,
            projectile,
        } => {
            if !world.crates.contains(crate_id) || world.projectiles.remove(projectile).is_none() {
                return;
            }
            match world.crates.strike(crate_id, world.weapon.damage()) {
                Some(CrateHit::Damaged { health }) => {
                    out_events.push(Event::CrateDamaged { crate_id, health });
                }
                Some(CrateHit::Destroyed { position }) => {
                    out_events.push(Event::CrateDestroyed { crate_id, position });
                    world.drop_power_up(position, CRATE_DROP_CHANCE, out_events);
                }
                None => {}
            }
        }
        Command::HitEnemy { enemy, projectile } => {
            if !world.enemies.contains(enemy) {
                return;
            }
            let Some(state) = world.projectiles.remove(projectile) else {
                return;
            };
            if let Some(health) = world.enemies.strike(enemy, state.damage, world.player) {
                out_events.push(Event::EnemyDamaged { enemy, health });
            }
        }
        Command::CollectCasualties => world.collect_casualties(out_events),
        Command::CollectPowerUp { power_up } => {
            let Some(state) = world.power_ups.remove(power_up) else {
                return;
            };
            let _ = world.update_stats(state.kind.effect(state.value), out_events);
            out_events.push(Event::PowerUpCollected {
                power_up,
                kind: state.kind,
                value: state.value,
            });
        }
        Command::RemoveProjectile { projectile } => {
            let _ = world.projectiles.remove(projectile);
        }
        Command::CompleteWave { wave } => {
            if wave != world.stats.wave() {
                return;
            }
            info!(wave, score = world.stats.score(), "wave complete");
            out_events.push(Event::WaveComplete { wave });
            world.enter_phase(progression::phase_after_wave(wave), out_events);
        }
        Command::SelectUpgrade { upgrade } => world.select_upgrade(upgrade, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use arena_core::{
        CrateView, EnemyView, GameState, GameStats, PlayerSnapshot, PowerUpView, ProjectileView,
        StaticMap, WeaponConfig, Zone,
    };

    use super::World;

    /// Current phase of the match.
    #[must_use]
    pub fn phase(world: &World) -> GameState {
        world.phase
    }

    /// Current contents of the stats ledger.
    #[must_use]
    pub fn stats(world: &World) -> GameStats {
        world.stats
    }

    /// Weapon parameters used for the next shot.
    #[must_use]
    pub fn weapon(world: &World) -> WeaponConfig {
        world.weapon
    }

    /// Simulated time elapsed since the match started.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Zone hosting the current wave.
    #[must_use]
    pub fn zone(world: &World) -> Zone {
        Zone::for_wave(world.stats.wave())
    }

    /// Provides read-only access to the tile map.
    #[must_use]
    pub fn map(world: &World) -> &StaticMap {
        &world.config.map
    }

    /// Captures the player's position.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player,
        }
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(world.projectiles.snapshots())
    }

    /// Number of projectiles in flight.
    #[must_use]
    pub fn projectile_count(world: &World) -> usize {
        world.projectiles.len()
    }

    /// Captures a read-only view of the enemy roster.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.snapshots())
    }

    /// Number of enemies currently alive.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Captures a read-only view of the standing crates.
    #[must_use]
    pub fn crate_view(world: &World) -> CrateView {
        CrateView::from_snapshots(world.crates.snapshots())
    }

    /// Captures a read-only view of the uncollected power-ups.
    #[must_use]
    pub fn power_up_view(world: &World) -> PowerUpView {
        PowerUpView::from_snapshots(world.power_ups.snapshots(world.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{EnemyKind, Upgrade, FINAL_WAVE};

    fn playing_world(config: Config) -> (World, Vec<Event>) {
        let mut world = World::new(config);
        let mut events = Vec::new();
        apply(&mut world, Command::StartMatch, &mut events);
        (world, events)
    }

    fn spawn(world: &mut World, kind: EnemyKind, position: Vec3, health: f32) {
        let mut events = Vec::new();
        apply(
            world,
            Command::SpawnEnemy {
                kind,
                position,
                health,
                speed: 4.0,
                damage: 10.0,
            },
            &mut events,
        );
    }

    #[test]
    fn new_world_waits_in_menu() {
        let mut world = World::new(Config::new(1));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );

        assert_eq!(query::phase(&world), GameState::Menu);
        assert_eq!(query::clock(&world), Duration::ZERO);
        assert!(events.is_empty());
    }

    #[test]
    fn start_match_announces_wave_and_zone() {
        let (world, events) = playing_world(Config::new(1));

        assert_eq!(
            events[..2],
            [
                Event::MatchStarted,
                Event::PhaseChanged {
                    phase: GameState::Playing
                }
            ]
        );
        assert!(events.contains(&Event::WaveStarted { wave: 1 }));
        assert!(events.contains(&Event::ZoneEntered {
            zone: Zone::CryoWing
        }));
        assert_eq!(query::stats(&world), GameStats::STARTING);
        assert_eq!(query::player(&world).position, Vec3::new(-18.0, 1.0, -16.0));
        assert!(!query::crate_view(&world).is_empty());
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let (mut world, _) = playing_world(Config::new(1).with_crate_count(0));
        let before = query::player(&world).position;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MovePlayer {
                destination: Vec3::new(-22.0, 1.0, -16.0),
                footstep: true,
            },
            &mut events,
        );

        assert_eq!(query::player(&world).position, before);
        assert!(events.is_empty());
    }

    #[test]
    fn firing_spends_one_round_per_shot() {
        let (mut world, _) = playing_world(Config::new(1).with_crate_count(0));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::FireWeapon {
                origin: Vec3::ZERO,
                directions: vec![Vec3::X, Vec3::Z, Vec3::NEG_X],
                pitch: 900.0,
            },
            &mut events,
        );

        assert_eq!(query::stats(&world).ammo(), 199);
        assert_eq!(query::projectile_count(&world), 3);
        assert_eq!(
            events[0],
            Event::ShotFired {
                pitch: 900.0,
                projectiles: 3
            }
        );
    }

    #[test]
    fn crate_hits_use_current_weapon_damage() {
        let (mut world, _) = playing_world(Config::new(4).with_crate_count(1));
        let crate_snapshot = *query::crate_view(&world).iter().next().expect("crate placed");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::FireWeapon {
                origin: crate_snapshot.position,
                directions: vec![Vec3::X],
                pitch: 900.0,
            },
            &mut events,
        );
        let projectile = query::projectile_view(&world)
            .iter()
            .next()
            .expect("projectile")
            .id;
        events.clear();

        apply(
            &mut world,
            Command::HitCrate {
                crate_id: crate_snapshot.id,
                projectile,
            },
            &mut events,
        );

        assert!(matches!(
            events[0],
            Event::CrateDestroyed { crate_id, .. } if crate_id == crate_snapshot.id
        ));
        assert!(query::crate_view(&world).is_empty());
        assert_eq!(query::projectile_count(&world), 0);
    }

    #[test]
    fn casualties_award_score_once() {
        let (mut world, _) = playing_world(Config::new(1).with_crate_count(0));
        spawn(&mut world, EnemyKind::Hybrid, Vec3::new(10.0, 1.5, 10.0), 10.0);
        let enemy = query::enemy_view(&world).iter().next().expect("enemy").id;
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::FireWeapon {
                origin: Vec3::ZERO,
                directions: vec![Vec3::X],
                pitch: 900.0,
            },
            &mut events,
        );
        let projectile = query::projectile_view(&world).iter().next().expect("shot").id;

        apply(&mut world, Command::HitEnemy { enemy, projectile }, &mut events);
        apply(&mut world, Command::CollectCasualties, &mut events);
        apply(&mut world, Command::CollectCasualties, &mut events);

        assert_eq!(query::stats(&world).score(), 300);
        assert_eq!(query::enemy_count(&world), 0);
    }

    #[test]
    fn lethal_damage_ends_the_match() {
        let config = Config::new(1)
            .with_crate_count(0)
            .with_starting_stats(GameStats::new(35.0, 200, 0, 1));
        let (mut world, _) = playing_world(config);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::DamagePlayer {
                amount: 40.0,
                audible: false,
            },
            &mut events,
        );

        assert_eq!(query::stats(&world).health(), 0.0);
        assert_eq!(query::phase(&world), GameState::GameOver);
        assert!(events.contains(&Event::HealthCritical));
    }

    #[test]
    fn upgrade_advances_wave_and_grants_ammo() {
        let (mut world, _) = playing_world(Config::new(1).with_crate_count(0));
        let mut events = Vec::new();
        apply(&mut world, Command::CompleteWave { wave: 1 }, &mut events);
        assert_eq!(query::phase(&world), GameState::UpgradeMenu);

        apply(
            &mut world,
            Command::SelectUpgrade {
                upgrade: Upgrade::FireRate,
            },
            &mut events,
        );

        let stats = query::stats(&world);
        assert_eq!(stats.wave(), 2);
        assert_eq!(stats.ammo(), 300);
        assert_eq!(
            query::weapon(&world).fire_interval(),
            Duration::from_millis(170)
        );
        assert_eq!(query::phase(&world), GameState::Playing);
    }

    #[test]
    fn completing_final_wave_is_victory() {
        let config = Config::new(1)
            .with_crate_count(0)
            .with_starting_stats(GameStats::new(100.0, 200, 0, FINAL_WAVE));
        let (mut world, _) = playing_world(config);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::CompleteWave { wave: FINAL_WAVE },
            &mut events,
        );

        assert_eq!(query::phase(&world), GameState::Victory);
        assert!(!events.contains(&Event::PhaseChanged {
            phase: GameState::UpgradeMenu
        }));
    }

    #[test]
    fn restart_restores_starting_state() {
        let (mut world, _) = playing_world(Config::new(8));
        let initial_crates = query::crate_view(&world).into_vec();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::DamagePlayer {
                amount: 100.0,
                audible: true,
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), GameState::GameOver);

        apply(&mut world, Command::StartMatch, &mut events);

        assert_eq!(query::phase(&world), GameState::Playing);
        assert_eq!(query::stats(&world), GameStats::STARTING);
        assert_eq!(query::crate_view(&world).into_vec(), initial_crates);
    }
}
