//! Piece selection state.
//!
//! At most one square is ever selected. Its legal destinations are captured
//! from the rules authority at selection time and double as the highlight
//! set for the view layer, so clearing the selection clears every
//! highlight in the same step.

use shakmaty::Square;

use crate::rules::Destination;

/// The in-progress move the human is constructing: a source square plus
/// the destinations the rules authority reported for it.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<Square>,
    targets: Vec<Destination>,
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn targets(&self) -> &[Destination] {
        &self.targets
    }

    pub fn contains_target(&self, square: Square) -> bool {
        self.targets.iter().any(|d| d.to == square)
    }

    /// Replace the selection wholesale. The previous selection (and its
    /// highlights) are dropped before the new ones take effect.
    pub fn select(&mut self, square: Square, targets: Vec<Destination>) {
        self.selected = Some(square);
        self.targets = targets;
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.targets.clear();
    }
}
