#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the arena simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable views and
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for audio, HUD and narrative collaborators to react to.

pub mod map;

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use map::{GridCell, MapError, StaticMap, Tile, DEFAULT_LAYOUT, DEFAULT_TILE_SIZE};

/// Wave number whose quota is a single boss; clearing it wins the match.
pub const FINAL_WAVE: u32 = 5;

/// Upper bound of the player's health.
pub const MAX_HEALTH: f32 = 100.0;

/// Health below which the critical warning is raised.
pub const CRITICAL_HEALTH: f32 = 30.0;

/// Ammunition granted alongside every upgrade.
pub const UPGRADE_AMMO_BONUS: u32 = 100;

/// Distance travelled by a projectile per second.
pub const PROJECTILE_SPEED: f32 = 40.0;

/// Age after which a projectile expires.
pub const PROJECTILE_LIFETIME: Duration = Duration::from_millis(2_000);

/// Distance at which a projectile strikes a crate.
pub const CRATE_HIT_RADIUS: f32 = 1.5;

/// The player may never stand closer than this to a crate.
pub const PLAYER_CRATE_CLEARANCE: f32 = 1.5;

/// Distance within which the player collects a power-up.
pub const PICKUP_RADIUS: f32 = 1.5;

/// Height at which the player's eye (and camera) sits.
pub const PLAYER_EYE_HEIGHT: f32 = 1.0;

/// Top-level phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// No match has started yet.
    Menu,
    /// The simulation is advancing.
    Playing,
    /// A wave was cleared and the player must pick an upgrade.
    UpgradeMenu,
    /// The player's health reached zero.
    GameOver,
    /// The final wave was cleared.
    Victory,
}

impl GameState {
    /// Reports whether the phase ends the match.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Narrative area the player fights through, derived from the wave number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Waves one and two.
    CryoWing,
    /// Waves three and four.
    WeaponsResearch,
    /// The boss wave.
    CentralNexus,
}

impl Zone {
    /// Zone hosting the provided wave.
    #[must_use]
    pub const fn for_wave(wave: u32) -> Self {
        if wave >= FINAL_WAVE {
            Self::CentralNexus
        } else if wave >= 3 {
            Self::WeaponsResearch
        } else {
            Self::CryoWing
        }
    }

    /// Display name announced when the zone is entered.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CryoWing => "ZONE 1: CRYO WING",
            Self::WeaponsResearch => "ZONE 2: WEAPONS RESEARCH",
            Self::CentralNexus => "ZONE 3: CENTRAL NEXUS",
        }
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a destructible crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CrateId(u32);

impl CrateId {
    /// Creates a new crate identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerUpId(u32);

impl PowerUpId {
    /// Creates a new power-up identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Weapon modification offered between waves. Exactly one applies per upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Upgrade {
    /// Adds [`WeaponConfig::DAMAGE_STEP`] damage per projectile.
    Damage,
    /// Shortens the fire interval by [`WeaponConfig::FIRE_INTERVAL_STEP`].
    FireRate,
    /// Adds one projectile per shot and widens the spread.
    MultiShot,
}

/// Weapon parameters read when firing and snapshotted into each projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponConfig {
    damage: f32,
    fire_interval: Duration,
    projectile_count: u32,
    spread: f32,
}

impl WeaponConfig {
    /// Weapon handed to the player at match start.
    pub const STARTING: Self = Self {
        damage: 35.0,
        fire_interval: Duration::from_millis(200),
        projectile_count: 1,
        spread: 0.1,
    };

    /// Damage added by [`Upgrade::Damage`].
    pub const DAMAGE_STEP: f32 = 15.0;

    /// Interval removed by [`Upgrade::FireRate`].
    pub const FIRE_INTERVAL_STEP: Duration = Duration::from_millis(30);

    /// Shortest fire interval reachable through upgrades.
    pub const FIRE_INTERVAL_FLOOR: Duration = Duration::from_millis(50);

    /// Spread added by [`Upgrade::MultiShot`].
    pub const SPREAD_STEP: f32 = 0.05;

    /// Creates a weapon configuration, clamping values into their valid ranges.
    #[must_use]
    pub fn new(damage: f32, fire_interval: Duration, projectile_count: u32, spread: f32) -> Self {
        Self {
            damage: damage.max(f32::MIN_POSITIVE),
            fire_interval: fire_interval.max(Duration::from_millis(1)),
            projectile_count: projectile_count.max(1),
            spread: spread.max(0.0),
        }
    }

    /// Damage copied into each projectile at fire time.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Minimum time between two shots.
    #[must_use]
    pub const fn fire_interval(&self) -> Duration {
        self.fire_interval
    }

    /// Projectiles released per shot.
    #[must_use]
    pub const fn projectile_count(&self) -> u32 {
        self.projectile_count
    }

    /// Width of the random cone applied when more than one projectile is fired.
    #[must_use]
    pub const fn spread(&self) -> f32 {
        self.spread
    }

    /// Returns the configuration with the upgrade applied.
    #[must_use]
    pub fn upgraded(self, upgrade: Upgrade) -> Self {
        match upgrade {
            Upgrade::Damage => Self {
                damage: self.damage + Self::DAMAGE_STEP,
                ..self
            },
            Upgrade::FireRate => Self {
                fire_interval: self
                    .fire_interval
                    .saturating_sub(Self::FIRE_INTERVAL_STEP)
                    .max(Self::FIRE_INTERVAL_FLOOR),
                ..self
            },
            Upgrade::MultiShot => Self {
                projectile_count: self.projectile_count.saturating_add(1),
                spread: self.spread + Self::SPREAD_STEP,
                ..self
            },
        }
    }
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::STARTING
    }
}

/// Mutation request funnelled through [`GameStats::apply`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatsUpdate {
    /// Removes health, clamping at zero.
    Damage(f32),
    /// Restores health, clamping at [`MAX_HEALTH`].
    Heal(f32),
    /// Adds ammunition.
    AddAmmo(u32),
    /// Consumes one round, never dropping below zero.
    SpendAmmo,
    /// Adds score.
    AddScore(u32),
    /// Moves on to the next wave.
    AdvanceWave,
}

/// Threshold crossings reported by [`GameStats::apply`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsOutcome {
    /// Health went from positive to zero during this update.
    pub depleted: bool,
    /// Health dropped below [`CRITICAL_HEALTH`] during this update.
    pub critical: bool,
}

/// The health/ammo/score/wave ledger of a match.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameStats {
    health: f32,
    ammo: u32,
    score: u32,
    wave: u32,
}

impl GameStats {
    /// Ledger contents at match start.
    pub const STARTING: Self = Self {
        health: MAX_HEALTH,
        ammo: 200,
        score: 0,
        wave: 1,
    };

    /// Creates a ledger, clamping health into range and the wave to at least one.
    #[must_use]
    pub fn new(health: f32, ammo: u32, score: u32, wave: u32) -> Self {
        Self {
            health: clamp_health(health),
            ammo,
            score,
            wave: wave.max(1),
        }
    }

    /// Current health in `0.0..=100.0`.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Rounds remaining.
    #[must_use]
    pub const fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current wave, starting at one.
    #[must_use]
    pub const fn wave(&self) -> u32 {
        self.wave
    }

    /// Applies a single update, clamping every field into its valid range.
    pub fn apply(&mut self, update: StatsUpdate) -> StatsOutcome {
        let before = self.health;
        match update {
            StatsUpdate::Damage(amount) => {
                self.health = clamp_health(self.health - sanitize(amount));
            }
            StatsUpdate::Heal(amount) => {
                self.health = clamp_health(self.health + sanitize(amount));
            }
            StatsUpdate::AddAmmo(amount) => self.ammo = self.ammo.saturating_add(amount),
            StatsUpdate::SpendAmmo => self.ammo = self.ammo.saturating_sub(1),
            StatsUpdate::AddScore(points) => self.score = self.score.saturating_add(points),
            StatsUpdate::AdvanceWave => self.wave = self.wave.saturating_add(1),
        }

        StatsOutcome {
            depleted: before > 0.0 && self.health <= 0.0,
            critical: before >= CRITICAL_HEALTH && self.health < CRITICAL_HEALTH,
        }
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::STARTING
    }
}

fn clamp_health(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_HEALTH)
    }
}

fn sanitize(amount: f32) -> f32 {
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}

/// Closed set of enemy variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Default hovering enemy.
    Drone,
    /// Fast, fragile ground crawler.
    Parasite,
    /// Slow, tanky walker.
    Hybrid,
    /// Final-wave boss.
    Boss,
}

/// Per-kind behaviour table consulted by AI, combat and scoring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyProfile {
    /// Planar distance at which the enemy stops and attacks.
    pub attack_range: f32,
    /// Distance at which a projectile strikes the enemy.
    pub hit_radius: f32,
    /// Points awarded when the enemy is destroyed.
    pub score: u32,
    /// Whether hits skip the knockback impulse.
    pub knockback_immune: bool,
    /// Whether the enemy bobs vertically while alive.
    pub hovers: bool,
    /// Multiplier applied to damage-per-second while attacking.
    pub damage_scale: f32,
}

impl EnemyKind {
    /// Behaviour table entry for the kind.
    #[must_use]
    pub const fn profile(self) -> EnemyProfile {
        match self {
            Self::Drone => EnemyProfile {
                attack_range: 1.5,
                hit_radius: 1.5,
                score: 100,
                knockback_immune: false,
                hovers: true,
                damage_scale: 1.0,
            },
            Self::Parasite => EnemyProfile {
                attack_range: 1.5,
                hit_radius: 1.5,
                score: 100,
                knockback_immune: false,
                hovers: false,
                damage_scale: 1.0,
            },
            Self::Hybrid => EnemyProfile {
                attack_range: 1.5,
                hit_radius: 1.5,
                score: 300,
                knockback_immune: false,
                hovers: false,
                damage_scale: 1.0,
            },
            Self::Boss => EnemyProfile {
                attack_range: 4.0,
                hit_radius: 3.0,
                score: 5_000,
                knockback_immune: true,
                hovers: false,
                damage_scale: 0.2,
            },
        }
    }
}

/// Collectible effect carried by a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restores health, capped at [`MAX_HEALTH`].
    Health,
    /// Adds ammunition.
    Ammo,
    /// Adds score.
    Score,
}

impl PowerUpKind {
    /// Amount granted by a freshly dropped power-up of this kind.
    #[must_use]
    pub const fn default_value(self) -> u32 {
        match self {
            Self::Health => 25,
            Self::Ammo => 50,
            Self::Score => 100,
        }
    }

    /// Stats mutation performed when the power-up is collected.
    #[must_use]
    pub fn effect(self, value: u32) -> StatsUpdate {
        match self {
            Self::Health => StatsUpdate::Heal(value as f32),
            Self::Ammo => StatsUpdate::AddAmmo(value),
            Self::Score => StatsUpdate::AddScore(value),
        }
    }
}

/// Movement and fire intent sampled once per frame from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementIntent {
    /// Move along the camera's forward axis.
    pub forward: bool,
    /// Move against the camera's forward axis.
    pub backward: bool,
    /// Strafe against the camera's right axis.
    pub left: bool,
    /// Strafe along the camera's right axis.
    pub right: bool,
    /// Pull the trigger.
    pub shoot: bool,
}

impl MovementIntent {
    /// Reports whether any movement key is held.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Orthonormal camera axes supplied by the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    /// Direction the camera looks along.
    pub forward: Vec3,
    /// Camera's right-hand axis.
    pub right: Vec3,
    /// Camera's up axis.
    pub up: Vec3,
}

impl CameraBasis {
    /// Builds the basis for a camera rotated by `yaw` about world y and tilted by `pitch`.
    ///
    /// At zero yaw and pitch the camera looks along world -z with +x to its right.
    #[must_use]
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        let forward = Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch);
        let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
        let up = right.cross(forward);
        Self { forward, right, up }
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_yaw_pitch(0.0, 0.0)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets every ledger and registry to its start-of-match value and begins wave one.
    StartMatch,
    /// Advances the simulation clock, moving and expiring projectiles.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Places the player at a destination already resolved against the map.
    MovePlayer {
        /// Resolved world position.
        destination: Vec3,
        /// Whether the step cadence elapsed on this frame.
        footstep: bool,
    },
    /// Releases one shot worth of projectiles, consuming a single round.
    FireWeapon {
        /// Muzzle position.
        origin: Vec3,
        /// Travel direction of each projectile.
        directions: Vec<Vec3>,
        /// Pitch hint forwarded to the audio collaborator.
        pitch: f32,
    },
    /// Adds an enemy to the roster.
    SpawnEnemy {
        /// Variant to spawn.
        kind: EnemyKind,
        /// Spawn position.
        position: Vec3,
        /// Starting and maximum health.
        health: f32,
        /// Pursuit speed in units per second.
        speed: f32,
        /// Damage per second dealt while in attack range.
        damage: f32,
    },
    /// Relocates an enemy.
    MoveEnemy {
        /// Enemy to move.
        enemy: EnemyId,
        /// New position.
        position: Vec3,
    },
    /// Applies damage to the player's health.
    DamagePlayer {
        /// Health to remove.
        amount: f32,
        /// Whether the hit should be voiced by the audio collaborator.
        audible: bool,
    },
    /// Resolves a projectile striking a crate using the weapon's current damage.
    HitCrate {
        /// Crate that was struck.
        crate_id: CrateId,
        /// Projectile that struck it.
        projectile: ProjectileId,
    },
    /// Resolves a projectile striking an enemy using the projectile's own damage.
    HitEnemy {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Projectile that struck it.
        projectile: ProjectileId,
    },
    /// Removes enemies whose health reached zero and awards their score.
    CollectCasualties,
    /// Applies a power-up's effect and removes it.
    CollectPowerUp {
        /// Power-up touched by the player.
        power_up: PowerUpId,
    },
    /// Removes a projectile. Removing a missing projectile does nothing.
    RemoveProjectile {
        /// Projectile to remove.
        projectile: ProjectileId,
    },
    /// Signals that the wave's quota was issued and every enemy is dead.
    CompleteWave {
        /// Wave that was cleared.
        wave: u32,
    },
    /// Applies the chosen upgrade and starts the next wave.
    SelectUpgrade {
        /// Modification to apply.
        upgrade: Upgrade,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new match began.
    MatchStarted,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The match entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: GameState,
    },
    /// A wave began.
    WaveStarted {
        /// Number of the wave.
        wave: u32,
    },
    /// The player reached a new narrative zone.
    ZoneEntered {
        /// Zone entered.
        zone: Zone,
    },
    /// The player's step cadence elapsed while moving.
    Footstep,
    /// The player changed position.
    PlayerMoved {
        /// Position after the move.
        position: Vec3,
    },
    /// The weapon fired.
    ShotFired {
        /// Pitch hint for the shot sound.
        pitch: f32,
        /// Projectiles released by the shot.
        projectiles: u32,
    },
    /// A projectile entered the world.
    ProjectileSpawned {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Muzzle position.
        position: Vec3,
        /// Unit travel direction.
        direction: Vec3,
    },
    /// A projectile outlived its lifetime.
    ProjectileExpired {
        /// Projectile that expired.
        projectile: ProjectileId,
    },
    /// The player lost health.
    PlayerDamaged {
        /// Health removed before clamping.
        amount: f32,
        /// Health remaining afterwards.
        health: f32,
        /// Whether the hit should be voiced.
        audible: bool,
    },
    /// Health dropped below the critical threshold.
    HealthCritical,
    /// An enemy joined the roster.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Variant spawned.
        kind: EnemyKind,
        /// Spawn position.
        position: Vec3,
    },
    /// A projectile struck an enemy.
    EnemyDamaged {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Health remaining, possibly negative until casualties are collected.
        health: f32,
    },
    /// An enemy died.
    EnemyDestroyed {
        /// Enemy that died.
        enemy: EnemyId,
        /// Its variant.
        kind: EnemyKind,
        /// Where it died.
        position: Vec3,
        /// Score awarded.
        points: u32,
    },
    /// A crate absorbed a hit and survived.
    CrateDamaged {
        /// Crate that was struck.
        crate_id: CrateId,
        /// Health remaining.
        health: f32,
    },
    /// A crate broke.
    CrateDestroyed {
        /// Crate that broke.
        crate_id: CrateId,
        /// Where it stood.
        position: Vec3,
    },
    /// A power-up dropped into the world.
    PowerUpSpawned {
        /// Identifier assigned to the power-up.
        power_up: PowerUpId,
        /// Effect carried.
        kind: PowerUpKind,
        /// Drop position.
        position: Vec3,
    },
    /// The player collected a power-up.
    PowerUpCollected {
        /// Power-up collected.
        power_up: PowerUpId,
        /// Effect applied.
        kind: PowerUpKind,
        /// Amount applied.
        value: u32,
    },
    /// A wave was cleared.
    WaveComplete {
        /// Wave that was cleared.
        wave: u32,
    },
    /// An upgrade was applied to the weapon.
    UpgradeApplied {
        /// Modification applied.
        upgrade: Upgrade,
        /// Weapon after the modification.
        weapon: WeaponConfig,
    },
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// World position of the player's eye.
    pub position: Vec3,
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Current position.
    pub position: Vec3,
    /// Unit travel direction.
    pub direction: Vec3,
    /// Damage snapshotted from the weapon at fire time.
    pub damage: f32,
    /// Simulation time at which the projectile was created.
    pub created_at: Duration,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Current position.
    pub position: Vec3,
    /// Current health.
    pub health: f32,
    /// Health at spawn.
    pub max_health: f32,
    /// Pursuit speed in units per second.
    pub speed: f32,
    /// Damage per second while attacking.
    pub damage: f32,
    /// Phase offset of the hover oscillation.
    pub hover_phase: f32,
}

/// Immutable representation of a single crate used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrateSnapshot {
    /// Unique identifier assigned to the crate.
    pub id: CrateId,
    /// Position of the crate's centre.
    pub position: Vec3,
    /// Current health.
    pub health: f32,
    /// Health at placement.
    pub max_health: f32,
}

/// Immutable representation of a single power-up used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpSnapshot {
    /// Unique identifier assigned to the power-up.
    pub id: PowerUpId,
    /// Effect carried.
    pub kind: PowerUpKind,
    /// Resting position.
    pub position: Vec3,
    /// Amount granted.
    pub value: u32,
    /// Cosmetic vertical offset for presentation; has no gameplay effect.
    pub bob_offset: f32,
}

macro_rules! snapshot_view {
    ($(#[$meta:meta])* $view:ident, $snapshot:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $view {
            snapshots: Vec<$snapshot>,
        }

        impl $view {
            /// Creates a new view from the provided snapshots.
            #[must_use]
            pub fn from_snapshots(mut snapshots: Vec<$snapshot>) -> Self {
                snapshots.sort_by_key(|snapshot| snapshot.id);
                Self { snapshots }
            }

            /// Iterator over the captured snapshots in deterministic order.
            pub fn iter(&self) -> impl Iterator<Item = &$snapshot> {
                self.snapshots.iter()
            }

            /// Number of captured snapshots.
            #[must_use]
            pub fn len(&self) -> usize {
                self.snapshots.len()
            }

            /// Reports whether the view is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.snapshots.is_empty()
            }

            /// Consumes the view, yielding the underlying snapshots.
            #[must_use]
            pub fn into_vec(self) -> Vec<$snapshot> {
                self.snapshots
            }
        }
    };
}

snapshot_view!(
    /// Read-only snapshot describing all live projectiles.
    ProjectileView,
    ProjectileSnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all live enemies.
    EnemyView,
    EnemySnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all standing crates.
    CrateView,
    CrateSnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all uncollected power-ups.
    PowerUpView,
    PowerUpSnapshot
);

/// Distance between two points measured on the ground plane.
#[must_use]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
