//! Match phase transition rules.

use arena_core::{Command, GameState, FINAL_WAVE};

/// Reports whether `command` may execute while the match is in `phase`.
///
/// Commands refused here are dropped without state change or events.
pub(crate) fn accepts(phase: GameState, command: &Command) -> bool {
    match command {
        Command::StartMatch => true,
        Command::SelectUpgrade { .. } => phase == GameState::UpgradeMenu,
        _ => phase == GameState::Playing,
    }
}

/// Phase entered once `wave` is cleared.
pub(crate) fn phase_after_wave(wave: u32) -> GameState {
    if wave >= FINAL_WAVE {
        GameState::Victory
    } else {
        GameState::UpgradeMenu
    }
}
