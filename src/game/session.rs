//! Top-level session orchestration.
//!
//! [`GameSession`] owns everything with state: the rules board, the board
//! orientation, the current selection, the session mode and the generation
//! counter that invalidates in-flight agent requests. All mutation funnels
//! through the methods here, so observers only ever see positions whose
//! history, highlights and terminal status agree with each other.

use shakmaty::Square;
use tracing::{debug, info, warn};

use crate::game::end::{check_game_end, Announcement};
use crate::game::orientation::Orientation;
use crate::game::selection::Selection;
use crate::game::turn::{turn_owner, TurnOwner};
use crate::rules::{RulesBoard, RulesError};

/// Whether the session still accepts moves. Terminal sessions ignore
/// clicks until a session command starts a fresh game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Active,
    Terminal,
}

/// What a click ended up doing. Informational; callers re-render either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Filtered before reaching the state machine: empty square, not the
    /// human's turn, game over, or a piece with no legal moves.
    Ignored,
    /// A square was selected (possibly replacing a previous selection).
    Selected(Square),
    /// The selection was cleared without producing a move.
    Cleared,
    /// A destination was confirmed and the move applied.
    Moved { from: Square, to: Square },
}

/// Snapshot handed to the agent driver: the position encoding to send and
/// the generation it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRequest {
    pub generation: u64,
    pub board: String,
}

/// What became of an agent reply offered back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentReplyOutcome {
    Applied,
    /// A session command ran after the request was issued; the reply is
    /// from a previous life of the board and is dropped untouched.
    Stale,
}

#[derive(Debug)]
pub struct GameSession {
    rules: RulesBoard,
    orientation: Orientation,
    mode: SessionMode,
    selection: Selection,
    announcement: Option<Announcement>,
    generation: u64,
    agent_request_pending: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Fresh session from the standard starting position, human at the
    /// bottom playing white.
    pub fn new() -> Self {
        Self::with_board(RulesBoard::new(), Orientation::default())
    }

    /// Session over an arbitrary board. Used by tests and diagnostics.
    pub fn with_board(rules: RulesBoard, orientation: Orientation) -> Self {
        Self {
            rules,
            orientation,
            mode: SessionMode::default(),
            selection: Selection::default(),
            announcement: None,
            generation: 0,
            agent_request_pending: false,
        }
    }

    pub fn rules(&self) -> &RulesBoard {
        &self.rules
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn announcement(&self) -> Option<Announcement> {
        self.announcement
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Who acts next, derived from orientation and the side to move.
    pub fn turn_owner(&self) -> TurnOwner {
        turn_owner(self.orientation, self.rules.side_to_move())
    }

    /// Handle a click on `square`: select, re-select, deselect or confirm
    /// a move, per the current selection state. Clicks while the game is
    /// over or while the agent is on move are no-ops.
    pub fn handle_click(&mut self, square: Square) -> ClickOutcome {
        if self.mode == SessionMode::Terminal || self.turn_owner() != TurnOwner::Human {
            return ClickOutcome::Ignored;
        }

        if let Some(from) = self.selection.selected() {
            if from == square {
                self.selection.clear();
                debug!("[INPUT] selection cleared on {square}");
                return ClickOutcome::Cleared;
            }
            if self.selection.contains_target(square) {
                self.selection.clear();
                return self.confirm_move(from, square);
            }
            // Any other click drops the selection; the same click may
            // immediately select a new source below.
            self.selection.clear();
            debug!("[INPUT] selection cleared on {square}");
            return self.try_select(square).unwrap_or(ClickOutcome::Cleared);
        }

        self.try_select(square).unwrap_or(ClickOutcome::Ignored)
    }

    /// Hand out the next agent request if the agent is on move, the session
    /// is active and no request is already outstanding. At most one request
    /// is ever in flight; an abandoned one stays counted as outstanding
    /// until a session command resets the session.
    pub fn take_agent_request(&mut self) -> Option<AgentRequest> {
        if self.mode != SessionMode::Active
            || self.turn_owner() != TurnOwner::Agent
            || self.agent_request_pending
        {
            return None;
        }
        self.agent_request_pending = true;
        debug!("[NET] issuing agent request (generation {})", self.generation);
        Some(AgentRequest {
            generation: self.generation,
            board: self.rules.fen(),
        })
    }

    /// Offer an agent reply back to the session. Replies tagged with a
    /// generation other than the current one are stale and dropped without
    /// touching the board. An unusable move leaves all state unchanged and
    /// the turn with the agent.
    pub fn apply_agent_move(
        &mut self,
        generation: u64,
        mv: &str,
    ) -> Result<AgentReplyOutcome, RulesError> {
        if generation != self.generation {
            debug!(
                "[NET] dropping stale agent reply {mv:?} (generation {generation} != {})",
                self.generation
            );
            return Ok(AgentReplyOutcome::Stale);
        }
        self.rules.apply_coordinate_move(mv)?;
        self.agent_request_pending = false;
        info!("[GAME] agent move {mv}");
        self.after_move();
        Ok(AgentReplyOutcome::Applied)
    }

    /// Record that the outstanding request failed. No state changes; the
    /// turn stays with the agent and no new request is issued until a
    /// session command resets the session.
    pub fn agent_request_failed(&mut self, generation: u64) {
        if generation == self.generation {
            warn!("[NET] agent request abandoned; session waiting on a session command");
        }
    }

    /// Flip the board and start over. The agent moves first if the flip
    /// put it on move.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.flipped();
        self.restart();
    }

    /// Fresh game with the agent playing white, so it moves first.
    pub fn new_game(&mut self) {
        self.orientation = Orientation::BlackBottom;
        self.restart();
    }

    /// Fresh game keeping the current orientation.
    pub fn reset(&mut self) {
        self.restart();
    }

    fn try_select(&mut self, square: Square) -> Option<ClickOutcome> {
        let piece = self.rules.piece_at(square)?;
        if piece.color != self.orientation.human_color() {
            return None;
        }
        let targets = self.rules.destinations(square);
        if targets.is_empty() {
            return None;
        }
        debug!("[INPUT] selected {square} with {} targets", targets.len());
        self.selection.select(square, targets);
        Some(ClickOutcome::Selected(square))
    }

    fn confirm_move(&mut self, from: Square, to: Square) -> ClickOutcome {
        match self.rules.apply_move(from, to) {
            Ok(()) => {
                info!("[GAME] human move {from}{to}");
                self.after_move();
                ClickOutcome::Moved { from, to }
            }
            Err(err) => {
                // The destination set came from the authority itself, so a
                // rejection means the selection desynced from the board.
                warn!("[GAME] move rejected: {err}");
                ClickOutcome::Cleared
            }
        }
    }

    /// Post-move bookkeeping shared by the human and agent paths: the
    /// terminal check runs exactly once per applied move.
    fn after_move(&mut self) {
        if let Some(announcement) = check_game_end(&self.rules) {
            self.announcement = Some(announcement);
            self.mode = SessionMode::Terminal;
        }
    }

    fn restart(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.agent_request_pending = false;
        self.rules.reset();
        self.selection.clear();
        self.announcement = None;
        self.mode = SessionMode::Active;
        info!(
            "[GAME] session restarted (generation {}, human plays {:?})",
            self.generation,
            self.orientation.human_color()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::turn::TurnOwner;

    #[test]
    fn clicking_empty_square_is_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.handle_click(Square::E5), ClickOutcome::Ignored);
        assert!(!session.selection().is_selected());
    }

    #[test]
    fn clicking_opponent_piece_is_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.handle_click(Square::E7), ClickOutcome::Ignored);
    }

    #[test]
    fn clicking_piece_with_no_moves_is_ignored() {
        let mut session = GameSession::new();
        assert_eq!(session.handle_click(Square::A1), ClickOutcome::Ignored);
    }

    #[test]
    fn clicking_selected_square_deselects() {
        let mut session = GameSession::new();
        session.handle_click(Square::E2);
        assert!(session.selection().is_selected());
        assert_eq!(session.handle_click(Square::E2), ClickOutcome::Cleared);
        assert!(!session.selection().is_selected());
    }

    #[test]
    fn selection_replacement_in_one_click() {
        let mut session = GameSession::new();
        session.handle_click(Square::E2);
        assert_eq!(
            session.handle_click(Square::G1),
            ClickOutcome::Selected(Square::G1)
        );
        assert_eq!(session.selection().selected(), Some(Square::G1));
        assert!(session.selection().contains_target(Square::F3));
    }

    #[test]
    fn clicks_are_noops_while_agent_is_on_move() {
        let mut session = GameSession::new();
        session.handle_click(Square::E2);
        session.handle_click(Square::E4);
        assert_eq!(session.turn_owner(), TurnOwner::Agent);
        assert_eq!(session.handle_click(Square::E7), ClickOutcome::Ignored);
        assert!(!session.selection().is_selected());
    }

    #[test]
    fn generation_advances_on_every_command() {
        let mut session = GameSession::new();
        let g0 = session.generation();
        session.reset();
        session.new_game();
        session.toggle_orientation();
        assert_eq!(session.generation(), g0 + 3);
    }
}
