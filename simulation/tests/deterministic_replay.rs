use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use arena_core::{
    CameraBasis, CrateId, EnemyId, EnemyKind, Event, GameState, MovementIntent, PowerUpId,
    PowerUpKind, ProjectileId, Upgrade, Zone,
};
use arena_simulation::{Config, FrameInput, Simulation};
use arena_world::query;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FRAMES: usize = 1_500;

#[test]
fn deterministic_replay_is_reproducible() {
    let first = replay(0x5eed, scripted_inputs(11));
    let second = replay(0x5eed, scripted_inputs(11));

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, EventRecord::EnemySpawned { .. })),
        "script never reached the first spawn"
    );
}

#[test]
fn different_seeds_diverge() {
    let first = replay(1, scripted_inputs(11));
    let second = replay(2, scripted_inputs(11));

    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[test]
fn restarted_match_replays_like_a_fresh_one() {
    let mut fresh = Simulation::new(Config::new(11));
    let _ = fresh.start_match();
    let fresh = play(&mut fresh, scripted_inputs(3), Vec::new());

    let mut restarted = Simulation::new(Config::new(11));
    let _ = restarted.start_match();
    let first_run = play(&mut restarted, scripted_inputs(3), Vec::new());
    let _ = restarted.start_match();
    let second_run = play(&mut restarted, scripted_inputs(3), Vec::new());

    assert_eq!(first_run, fresh);
    assert_eq!(second_run, fresh, "restart diverged from a fresh match");
    assert_eq!(second_run.fingerprint(), fresh.fingerprint());
}

fn replay(seed: u64, inputs: Vec<FrameInput>) -> ReplayOutcome {
    let mut simulation = Simulation::new(Config::new(seed));
    let mut log = Vec::new();
    record_events(&simulation.start_match(), &mut log);
    play(&mut simulation, inputs, log)
}

fn play(
    simulation: &mut Simulation,
    inputs: Vec<FrameInput>,
    mut log: Vec<EventRecord>,
) -> ReplayOutcome {
    for input in inputs {
        let events = simulation.step(input);
        record_events(&events, &mut log);
        if query::phase(simulation.world()) == GameState::UpgradeMenu {
            record_events(&simulation.select_upgrade(Upgrade::FireRate), &mut log);
        }
    }

    let world = simulation.world();
    let stats = query::stats(world);
    ReplayOutcome {
        phase: query::phase(world),
        health_bits: stats.health().to_bits(),
        ammo: stats.ammo(),
        score: stats.score(),
        wave: stats.wave(),
        player: bits(query::player(world).position),
        enemies: query::enemy_view(world)
            .iter()
            .map(|enemy| (enemy.id, bits(enemy.position)))
            .collect(),
        events: log,
    }
}

fn record_events(events: &[Event], log: &mut Vec<EventRecord>) {
    log.extend(events.iter().map(EventRecord::from));
}

fn scripted_inputs(seed: u64) -> Vec<FrameInput> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut yaw = 0.0_f32;
    (0..FRAMES)
        .map(|_| {
            yaw += rng.gen_range(-0.05..0.05);
            FrameInput {
                intent: MovementIntent {
                    forward: rng.gen_bool(0.6),
                    backward: rng.gen_bool(0.1),
                    left: rng.gen_bool(0.2),
                    right: rng.gen_bool(0.2),
                    shoot: rng.gen_bool(0.5),
                },
                camera: CameraBasis::from_yaw_pitch(yaw, 0.0),
                dt: Duration::from_millis(16),
            }
        })
        .collect()
}

fn bits(position: Vec3) -> [u32; 3] {
    [
        position.x.to_bits(),
        position.y.to_bits(),
        position.z.to_bits(),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    phase: GameState,
    health_bits: u32,
    ammo: u32,
    score: u32,
    wave: u32,
    player: [u32; 3],
    enemies: Vec<(EnemyId, [u32; 3])>,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    MatchStarted,
    TimeAdvanced {
        dt_micros: u128,
    },
    PhaseChanged {
        phase: GameState,
    },
    WaveStarted {
        wave: u32,
    },
    ZoneEntered {
        zone: Zone,
    },
    Footstep,
    PlayerMoved {
        position: [u32; 3],
    },
    ShotFired {
        pitch: u32,
        projectiles: u32,
    },
    ProjectileSpawned {
        projectile: ProjectileId,
        position: [u32; 3],
        direction: [u32; 3],
    },
    ProjectileExpired {
        projectile: ProjectileId,
    },
    PlayerDamaged {
        amount: u32,
        health: u32,
        audible: bool,
    },
    HealthCritical,
    EnemySpawned {
        enemy: EnemyId,
        kind: EnemyKind,
        position: [u32; 3],
    },
    EnemyDamaged {
        enemy: EnemyId,
        health: u32,
    },
    EnemyDestroyed {
        enemy: EnemyId,
        kind: EnemyKind,
        points: u32,
    },
    CrateDamaged {
        crate_id: CrateId,
        health: u32,
    },
    CrateDestroyed {
        crate_id: CrateId,
    },
    PowerUpSpawned {
        power_up: PowerUpId,
        kind: PowerUpKind,
        position: [u32; 3],
    },
    PowerUpCollected {
        power_up: PowerUpId,
        value: u32,
    },
    WaveComplete {
        wave: u32,
    },
    UpgradeApplied {
        upgrade: Upgrade,
    },
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::MatchStarted => Self::MatchStarted,
            Event::TimeAdvanced { dt } => Self::TimeAdvanced {
                dt_micros: dt.as_micros(),
            },
            Event::PhaseChanged { phase } => Self::PhaseChanged { phase: *phase },
            Event::WaveStarted { wave } => Self::WaveStarted { wave: *wave },
            Event::ZoneEntered { zone } => Self::ZoneEntered { zone: *zone },
            Event::Footstep => Self::Footstep,
            Event::PlayerMoved { position } => Self::PlayerMoved {
                position: bits(*position),
            },
            Event::ShotFired { pitch, projectiles } => Self::ShotFired {
                pitch: pitch.to_bits(),
                projectiles: *projectiles,
            },
            Event::ProjectileSpawned {
                projectile,
                position,
                direction,
            } => Self::ProjectileSpawned {
                projectile: *projectile,
                position: bits(*position),
                direction: bits(*direction),
            },
            Event::ProjectileExpired { projectile } => Self::ProjectileExpired {
                projectile: *projectile,
            },
            Event::PlayerDamaged {
                amount,
                health,
                audible,
            } => Self::PlayerDamaged {
                amount: amount.to_bits(),
                health: health.to_bits(),
                audible: *audible,
            },
            Event::HealthCritical => Self::HealthCritical,
            Event::EnemySpawned {
                enemy,
                kind,
                position,
            } => Self::EnemySpawned {
                enemy: *enemy,
                kind: *kind,
                position: bits(*position),
            },
            Event::EnemyDamaged { enemy, health } => Self::EnemyDamaged {
                enemy: *enemy,
                health: health.to_bits(),
            },
            Event::EnemyDestroyed {
                enemy,
                kind,
                points,
                ..
            } => Self::EnemyDestroyed {
                enemy: *enemy,
                kind: *kind,
                points: *points,
            },
            Event::CrateDamaged { crate_id, health } => Self::CrateDamaged {
                crate_id: *crate_id,
                health: health.to_bits(),
            },
            Event::CrateDestroyed { crate_id, .. } => Self::CrateDestroyed {
                crate_id: *crate_id,
            },
            Event::PowerUpSpawned {
                power_up,
                kind,
                position,
            } => Self::PowerUpSpawned {
                power_up: *power_up,
                kind: *kind,
                position: bits(*position),
            },
            Event::PowerUpCollected {
                power_up, value, ..
            } => Self::PowerUpCollected {
                power_up: *power_up,
                value: *value,
            },
            Event::WaveComplete { wave } => Self::WaveComplete { wave: *wave },
            Event::UpgradeApplied { upgrade, .. } => Self::UpgradeApplied { upgrade: *upgrade },
        }
    }
}
