//! Game-end detection and the terminal announcement.

use tracing::info;

use crate::rules::{EndReason, RulesBoard};

/// Display-only announcement raised once when a game reaches a terminal
/// position. It sticks until the next session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    Checkmate,
    Draw,
    GameOver,
}

impl Announcement {
    pub fn message(self) -> &'static str {
        match self {
            Announcement::Checkmate => "Checkmate!",
            Announcement::Draw => "Draw!",
            Announcement::GameOver => "Game Over!",
        }
    }
}

/// Inspect terminal status after a move application. Returns the
/// announcement to raise if the game just ended, `None` otherwise.
/// Invoked exactly once per applied move.
pub fn check_game_end(rules: &RulesBoard) -> Option<Announcement> {
    let announcement = match rules.end_reason()? {
        EndReason::Checkmate => Announcement::Checkmate,
        EndReason::Draw => Announcement::Draw,
        EndReason::Other => Announcement::GameOver,
    };
    info!("[GAME] ========== {} ==========", announcement.message());
    Some(announcement)
}
