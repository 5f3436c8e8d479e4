//! Boundary to the chess rules authority.
//!
//! All position state lives behind [`RulesBoard`]; the rest of the crate
//! never inspects a board directly. `shakmaty` owns legality, termination
//! and notation. This wrapper only exposes the questions the session
//! needs answered: piece-at, legal destinations, move application,
//! side to move, terminal status and the FEN encoding the remote agent
//! consumes.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Position, Role, Square};
use thiserror::Error;

/// A move-application request the authority rejected.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("unparseable coordinate move {0:?}")]
    BadCoordinates(String),
    #[error("invalid FEN: {0}")]
    BadFen(String),
}

/// A legal destination for a selected square, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub to: Square,
    /// Whether reaching `to` promotes the moving pawn. Promotions always
    /// resolve to a queen.
    pub promotes: bool,
}

/// Why a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Checkmate,
    Draw,
    Other,
}

/// The position plus the move log, behind the capability set the UI uses.
#[derive(Debug, Clone)]
pub struct RulesBoard {
    pos: Chess,
    history: Vec<String>,
}

impl Default for RulesBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesBoard {
    /// Standard starting position, empty move log.
    pub fn new() -> Self {
        Self {
            pos: Chess::default(),
            history: Vec::new(),
        }
    }

    /// Rebuild from a FEN string. The session itself always starts from the
    /// standard position; this exists for diagnostics and tests.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let setup: Fen = fen.parse().map_err(|e: shakmaty::fen::ParseFenError| {
            RulesError::BadFen(e.to_string())
        })?;
        let pos = setup
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::BadFen(e.to_string()))?;
        Ok(Self {
            pos,
            history: Vec::new(),
        })
    }

    /// Back to the standard starting position, move log cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.turn()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pos.board().piece_at(square)
    }

    /// Legal destinations for the piece on `from`, deduplicated so a
    /// promoting pawn yields one entry per target square.
    pub fn destinations(&self, from: Square) -> Vec<Destination> {
        let mut out: Vec<Destination> = Vec::new();
        for m in self.pos.legal_moves() {
            if m.from() != Some(from) {
                continue;
            }
            let to = display_to(&m);
            if !out.iter().any(|d| d.to == to) {
                out.push(Destination {
                    to,
                    promotes: m.is_promotion(),
                });
            }
        }
        out
    }

    /// Apply the move from `from` to `to` (display coordinates), resolving
    /// promotions to queen. Callers are expected to pass a destination the
    /// authority itself reported as legal.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<(), RulesError> {
        let m = self
            .find_legal(from, to)
            .ok_or(RulesError::IllegalMove { from, to })?;
        self.push(m);
        Ok(())
    }

    /// Apply a move given in 4-character coordinate form, e.g. `"e2e4"`.
    /// The wire format carries no promotion piece; queen is assumed.
    pub fn apply_coordinate_move(&mut self, mv: &str) -> Result<(), RulesError> {
        let (from, to) =
            parse_coordinates(mv).ok_or_else(|| RulesError::BadCoordinates(mv.to_string()))?;
        self.apply_move(from, to)
    }

    pub fn is_over(&self) -> bool {
        self.pos.is_game_over()
    }

    /// Terminal reason, if the game has ended. Stalemate and insufficient
    /// material both read as a draw to the player.
    pub fn end_reason(&self) -> Option<EndReason> {
        if !self.pos.is_game_over() {
            return None;
        }
        Some(if self.pos.is_checkmate() {
            EndReason::Checkmate
        } else if self.pos.is_stalemate() || self.pos.is_insufficient_material() {
            EndReason::Draw
        } else {
            EndReason::Other
        })
    }

    /// Applied moves in standard algebraic notation, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Full position encoding (FEN), the form the remote agent consumes.
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    fn find_legal(&self, from: Square, to: Square) -> Option<Move> {
        let mut fallback = None;
        for m in self.pos.legal_moves() {
            if m.from() != Some(from) || display_to(&m) != to {
                continue;
            }
            if !m.is_promotion() || m.promotion() == Some(Role::Queen) {
                return Some(m);
            }
            fallback = Some(m);
        }
        fallback
    }

    fn push(&mut self, m: Move) {
        let san = SanPlus::from_move(self.pos.clone(), &m);
        self.history.push(san.to_string());
        self.pos.play_unchecked(&m);
    }
}

/// Destination square in the coordinates a player clicks. shakmaty encodes
/// castling as king-takes-rook internally; the UCI form restores the
/// conventional two-files king hop.
fn display_to(m: &Move) -> Square {
    match m {
        Move::Castle { .. } => {
            let uci = m.to_uci(CastlingMode::Standard).to_string();
            uci.get(2..4).and_then(|s| s.parse().ok()).unwrap_or(m.to())
        }
        _ => m.to(),
    }
}

fn parse_coordinates(mv: &str) -> Option<(Square, Square)> {
    let from = mv.get(0..2)?.parse().ok()?;
    let to = mv.get(2..4)?.parse().ok()?;
    Some((from, to))
}
