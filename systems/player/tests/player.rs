use std::time::Duration;

use arena_core::{
    CameraBasis, Command, CrateId, CrateSnapshot, CrateView, Event, GameState, MovementIntent,
    PlayerSnapshot, StaticMap, Upgrade, WeaponConfig, PLAYER_CRATE_CLEARANCE,
};
use arena_system_player::{Config, PlayerController, PlayerInput};
use glam::Vec3;

const FRAME: Duration = Duration::from_millis(100);

fn step(
    controller: &mut PlayerController,
    intent: MovementIntent,
    position: Vec3,
    crates: &CrateView,
    ammo: u32,
    weapon: WeaponConfig,
) -> Vec<Command> {
    let mut out = Vec::new();
    controller.handle(
        GameState::Playing,
        PlayerInput::new(intent, CameraBasis::default()),
        FRAME,
        PlayerSnapshot { position },
        &StaticMap::arena(),
        crates,
        ammo,
        weapon,
        &mut out,
    );
    out
}

fn shoot() -> MovementIntent {
    MovementIntent {
        shoot: true,
        ..MovementIntent::default()
    }
}

#[test]
fn diagonal_move_against_wall_slides_along_x() {
    let mut controller = PlayerController::new(Config::new(7));
    let map = StaticMap::arena();
    let position = Vec3::new(-18.0, 1.0, -17.9);
    let intent = MovementIntent {
        forward: true,
        right: true,
        ..MovementIntent::default()
    };

    let out = step(
        &mut controller,
        intent,
        position,
        &CrateView::default(),
        0,
        WeaponConfig::STARTING,
    );

    let [Command::MovePlayer { destination, .. }] = out.as_slice() else {
        panic!("expected a single move, got {out:?}");
    };
    assert!(destination.x > position.x);
    assert_eq!(destination.z, position.z);
    assert!(!map.is_wall_at(*destination));
}

#[test]
fn movement_never_enters_walls() {
    let mut controller = PlayerController::new(Config::new(7));
    let map = StaticMap::arena();
    let mut position = Vec3::new(-18.0, 1.0, -16.0);
    let intent = MovementIntent {
        forward: true,
        left: true,
        ..MovementIntent::default()
    };

    for _ in 0..50 {
        for command in step(
            &mut controller,
            intent,
            position,
            &CrateView::default(),
            0,
            WeaponConfig::STARTING,
        ) {
            if let Command::MovePlayer { destination, .. } = command {
                position = destination;
            }
        }
        assert!(!map.is_wall_at(position), "entered wall at {position:?}");
    }
}

#[test]
fn crates_block_movement_within_clearance() {
    let mut controller = PlayerController::new(Config::new(7));
    let position = Vec3::new(-18.0, 1.0, -16.0);
    let crates = CrateView::from_snapshots(vec![CrateSnapshot {
        id: CrateId::new(0),
        position: Vec3::new(-18.0 + PLAYER_CRATE_CLEARANCE + 0.2, 1.0, -16.0),
        health: 30.0,
        max_health: 30.0,
    }]);
    let intent = MovementIntent {
        right: true,
        ..MovementIntent::default()
    };

    let out = step(
        &mut controller,
        intent,
        position,
        &crates,
        0,
        WeaponConfig::STARTING,
    );

    assert_eq!(
        out,
        vec![Command::MovePlayer {
            destination: position,
            footstep: true,
        }]
    );
}

#[test]
fn walking_into_a_corner_still_makes_footsteps() {
    let mut controller = PlayerController::new(Config::new(7));
    let corner = Vec3::new(-19.9, 1.0, -17.9);
    let intent = MovementIntent {
        forward: true,
        left: true,
        ..MovementIntent::default()
    };
    let mut footsteps = Vec::new();

    for _ in 0..5 {
        for command in step(
            &mut controller,
            intent,
            corner,
            &CrateView::default(),
            0,
            WeaponConfig::STARTING,
        ) {
            let Command::MovePlayer {
                destination,
                footstep,
            } = command
            else {
                panic!("unexpected command {command:?}");
            };
            assert_eq!(destination, corner);
            footsteps.push(footstep);
        }
    }

    assert_eq!(footsteps, vec![true, true]);
}

#[test]
fn empty_magazine_never_fires() {
    let mut controller = PlayerController::new(Config::new(7));

    let out = step(
        &mut controller,
        shoot(),
        Vec3::new(-18.0, 1.0, -16.0),
        &CrateView::default(),
        0,
        WeaponConfig::STARTING,
    );

    assert!(out.is_empty());
}

#[test]
fn single_projectile_follows_camera_forward() {
    let mut controller = PlayerController::new(Config::new(7));

    let out = step(
        &mut controller,
        shoot(),
        Vec3::new(-18.0, 1.0, -16.0),
        &CrateView::default(),
        10,
        WeaponConfig::STARTING,
    );

    let [Command::FireWeapon {
        origin,
        directions,
        pitch,
    }] = out.as_slice()
    else {
        panic!("expected a single shot, got {out:?}");
    };
    assert_eq!(directions, &vec![CameraBasis::default().forward]);
    assert!((800.0..1_000.0).contains(pitch));
    assert!((origin.z - (-16.5)).abs() < 1e-5);
    assert!((origin.x - (-17.8)).abs() < 1e-5);
    assert!((origin.y - 0.8).abs() < 1e-5);
}

#[test]
fn fire_rate_is_limited_by_interval() {
    let mut controller = PlayerController::new(Config::new(7));
    let position = Vec3::new(-18.0, 1.0, -16.0);
    let mut shots = 0;

    for _ in 0..10 {
        shots += step(
            &mut controller,
            shoot(),
            position,
            &CrateView::default(),
            100,
            WeaponConfig::STARTING,
        )
        .len();
    }

    assert_eq!(shots, 5, "one shot every 200 ms over one second");
}

#[test]
fn multi_shot_spreads_within_cone() {
    let mut controller = PlayerController::new(Config::new(7));
    let weapon = WeaponConfig::STARTING
        .upgraded(Upgrade::MultiShot)
        .upgraded(Upgrade::MultiShot);

    let out = step(
        &mut controller,
        shoot(),
        Vec3::new(-18.0, 1.0, -16.0),
        &CrateView::default(),
        10,
        weapon,
    );

    let [Command::FireWeapon { directions, .. }] = out.as_slice() else {
        panic!("expected a single shot, got {out:?}");
    };
    assert_eq!(directions.len(), 3);
    let forward = CameraBasis::default().forward;
    for direction in directions {
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.dot(forward) > 0.95);
    }
}

#[test]
fn footstep_flag_follows_cadence() {
    let mut controller = PlayerController::new(Config::new(7));
    let intent = MovementIntent {
        backward: true,
        ..MovementIntent::default()
    };
    let mut position = Vec3::new(-18.0, 1.0, -16.0);
    let mut footsteps = Vec::new();

    for _ in 0..8 {
        for command in step(
            &mut controller,
            intent,
            position,
            &CrateView::default(),
            0,
            WeaponConfig::STARTING,
        ) {
            if let Command::MovePlayer {
                destination,
                footstep,
            } = command
            {
                position = destination;
                footsteps.push(footstep);
            }
        }
    }

    assert_eq!(
        footsteps,
        vec![true, false, false, false, true, false, false, false]
    );
}

#[test]
fn restart_resets_fire_timer() {
    let mut controller = PlayerController::new(Config::new(7));
    let position = Vec3::new(-18.0, 1.0, -16.0);
    let first = step(
        &mut controller,
        shoot(),
        position,
        &CrateView::default(),
        10,
        WeaponConfig::STARTING,
    );
    assert_eq!(first.len(), 1);

    controller.observe(&[Event::MatchStarted]);
    let second = step(
        &mut controller,
        shoot(),
        position,
        &CrateView::default(),
        10,
        WeaponConfig::STARTING,
    );

    assert_eq!(second.len(), 1);
}

#[test]
fn restart_replays_spread_rolls() {
    let mut controller = PlayerController::new(Config::new(7));
    let weapon = WeaponConfig::STARTING.upgraded(Upgrade::MultiShot);
    let position = Vec3::new(-18.0, 1.0, -16.0);
    let first = step(
        &mut controller,
        shoot(),
        position,
        &CrateView::default(),
        10,
        weapon,
    );

    controller.observe(&[Event::MatchStarted]);
    let second = step(
        &mut controller,
        shoot(),
        position,
        &CrateView::default(),
        10,
        weapon,
    );

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn idle_outside_playing() {
    let mut controller = PlayerController::new(Config::new(7));
    let mut out = Vec::new();

    controller.handle(
        GameState::UpgradeMenu,
        PlayerInput::new(shoot(), CameraBasis::default()),
        FRAME,
        PlayerSnapshot {
            position: Vec3::new(-18.0, 1.0, -16.0),
        },
        &StaticMap::arena(),
        &CrateView::default(),
        10,
        WeaponConfig::STARTING,
        &mut out,
    );

    assert!(out.is_empty());
}
