//! End-of-run report printed by the CLI.

use std::{fmt, time::Duration};

use arena_core::{Event, GameState, Zone};
use arena_world::{query, World};
use serde::Serialize;

/// Running counts gathered from the event stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    kills: u32,
    shots: u32,
    crates_destroyed: u32,
    power_ups_collected: u32,
}

impl Tally {
    /// Folds a batch of events into the counts.
    pub(crate) fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyDestroyed { .. } => self.kills += 1,
                Event::ShotFired { .. } => self.shots += 1,
                Event::CrateDestroyed { .. } => self.crates_destroyed += 1,
                Event::PowerUpCollected { .. } => self.power_ups_collected += 1,
                _ => {}
            }
        }
    }
}

/// Weapon state at the end of the run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct WeaponSummary {
    damage: f32,
    fire_interval_ms: u64,
    projectile_count: u32,
    spread: f32,
}

/// Final state of a headless match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct MatchSummary {
    phase: GameState,
    zone: Zone,
    wave: u32,
    health: f32,
    ammo: u32,
    score: u32,
    weapon: WeaponSummary,
    kills: u32,
    shots: u32,
    crates_destroyed: u32,
    power_ups_collected: u32,
    frames: u64,
    elapsed_ms: u64,
}

impl MatchSummary {
    /// Captures the world's final state alongside the event tally.
    pub(crate) fn capture(world: &World, frames: u64, tally: Tally) -> Self {
        let stats = query::stats(world);
        let weapon = query::weapon(world);
        Self {
            phase: query::phase(world),
            zone: query::zone(world),
            wave: stats.wave(),
            health: stats.health(),
            ammo: stats.ammo(),
            score: stats.score(),
            weapon: WeaponSummary {
                damage: weapon.damage(),
                fire_interval_ms: millis(weapon.fire_interval()),
                projectile_count: weapon.projectile_count(),
                spread: weapon.spread(),
            },
            kills: tally.kills,
            shots: tally.shots,
            crates_destroyed: tally.crates_destroyed,
            power_ups_collected: tally.power_ups_collected,
            frames,
            elapsed_ms: millis(query::clock(world)),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:?} in {} (wave {}) after {} frames",
            self.phase,
            self.zone.title(),
            self.wave,
            self.frames
        )?;
        writeln!(
            f,
            "health {:.0}  ammo {}  score {}",
            self.health, self.ammo, self.score
        )?;
        writeln!(
            f,
            "weapon: {:.0} damage, {} ms, {} projectile(s), spread {:.2}",
            self.weapon.damage,
            self.weapon.fire_interval_ms,
            self.weapon.projectile_count,
            self.weapon.spread
        )?;
        write!(
            f,
            "kills {}  shots {}  crates {}  pickups {}",
            self.kills, self.shots, self.crates_destroyed, self.power_ups_collected
        )
    }
}
