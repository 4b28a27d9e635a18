//! Derivation of independent random streams from a single match seed.

use sha2::{Digest, Sha256};

pub(crate) const PLAYER_STREAM: &str = "player";
pub(crate) const SPAWNING_STREAM: &str = "spawning";
pub(crate) const ENEMY_AI_STREAM: &str = "enemy_ai";

/// Hashes `base` together with `label` into a seed for a dedicated stream.
#[must_use]
pub fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
