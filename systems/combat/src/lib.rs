#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves projectile proximity against crates and enemies.

use std::collections::BTreeSet;

use arena_core::{
    Command, CrateView, EnemyView, GameState, ProjectileId, ProjectileView, CRATE_HIT_RADIUS,
};

/// Combat system that queues hit commands for projectiles within range of a target.
///
/// A projectile produces at most one hit per frame, even when it overlaps
/// several targets. Call [`Combat::begin_frame`] before the first handler of a frame.
#[derive(Debug, Default)]
pub struct Combat {
    consumed: BTreeSet<ProjectileId>,
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the projectiles consumed during the previous frame.
    pub fn begin_frame(&mut self) {
        self.consumed.clear();
    }

    /// Emits `Command::HitCrate` entries for projectiles touching a crate.
    pub fn handle_crates(
        &mut self,
        phase: GameState,
        projectiles: &ProjectileView,
        crates: &CrateView,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing || projectiles.is_empty() || crates.is_empty() {
            return;
        }

        self.scratch.clear();
        for crate_snapshot in crates.iter() {
            for projectile in projectiles.iter() {
                if self.consumed.contains(&projectile.id) {
                    continue;
                }
                if projectile.position.distance(crate_snapshot.position) < CRATE_HIT_RADIUS {
                    let _ = self.consumed.insert(projectile.id);
                    self.scratch.push(Command::HitCrate {
                        crate_id: crate_snapshot.id,
                        projectile: projectile.id,
                    });
                }
            }
        }
        self.flush(out);
    }

    /// Emits `Command::HitEnemy` entries followed by a casualty sweep.
    pub fn handle_enemies(
        &mut self,
        phase: GameState,
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if phase != GameState::Playing {
            return;
        }

        self.scratch.clear();
        for enemy in enemies.iter() {
            let hit_radius = enemy.kind.profile().hit_radius;
            for projectile in projectiles.iter() {
                if self.consumed.contains(&projectile.id) {
                    continue;
                }
                if projectile.position.distance(enemy.position) < hit_radius {
                    let _ = self.consumed.insert(projectile.id);
                    self.scratch.push(Command::HitEnemy {
                        enemy: enemy.id,
                        projectile: projectile.id,
                    });
                }
            }
        }
        self.scratch.push(Command::CollectCasualties);
        self.flush(out);
    }

    fn flush(&mut self, out: &mut Vec<Command>) {
        if self.scratch.is_empty() {
            return;
        }
        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
