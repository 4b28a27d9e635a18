//! Headless session settings loaded from TOML.

use std::{fs, path::Path};

use anyhow::{ensure, Context, Result};
use arena_core::{Upgrade, DEFAULT_TILE_SIZE};
use arena_world::{Config, StaticMap, DEFAULT_CRATE_COUNT};
use serde::Deserialize;

/// Settings for one headless run. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Master seed for the world and every system.
    pub(crate) seed: u64,
    /// Upper bound on simulated frames.
    pub(crate) frames: u64,
    /// Simulated milliseconds per frame.
    pub(crate) frame_ms: u64,
    /// Crates scattered at match start.
    pub(crate) crates: u32,
    /// Optional replacement arena made of `#` and `.` rows.
    pub(crate) map: Option<Vec<String>>,
    /// Edge length of a map tile in world units.
    pub(crate) tile_size: f32,
    /// Upgrades chosen in order whenever the upgrade menu opens.
    pub(crate) upgrades: Vec<Upgrade>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frames: 18_000,
            frame_ms: 16,
            crates: DEFAULT_CRATE_COUNT,
            map: None,
            tile_size: DEFAULT_TILE_SIZE,
            upgrades: vec![Upgrade::Damage, Upgrade::FireRate, Upgrade::MultiShot],
        }
    }
}

impl SessionConfig {
    /// Reads and parses a TOML session file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("failed to parse session config {}", path.display()))
    }

    /// Parses session settings from TOML text.
    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overrides file settings with values given on the command line.
    pub(crate) fn override_with(&mut self, seed: Option<u64>, frames: Option<u64>) {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        if let Some(frames) = frames {
            self.frames = frames;
        }
    }

    /// Builds the world configuration described by the session.
    pub(crate) fn world_config(&self) -> Result<Config> {
        ensure!(self.frame_ms > 0, "frame_ms must be at least 1");

        let mut config = Config::new(self.seed).with_crate_count(self.crates);
        if let Some(rows) = &self.map {
            let map = StaticMap::parse(rows, self.tile_size).context("invalid map layout")?;
            config = config.with_map(map);
        }
        Ok(config)
    }
}
