//! Board orientation.
//!
//! Orientation decides which color sits at the bottom of the rendered
//! board, and therefore which color the human plays; the remote agent
//! always plays the top color. It never affects game logic.

use shakmaty::Color;

/// Which color sits at the bottom of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    /// The color the human plays under this orientation.
    pub fn human_color(self) -> Color {
        match self {
            Orientation::WhiteBottom => Color::White,
            Orientation::BlackBottom => Color::Black,
        }
    }

    /// The color the remote agent plays.
    pub fn agent_color(self) -> Color {
        self.human_color().other()
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::WhiteBottom => Orientation::BlackBottom,
            Orientation::BlackBottom => Orientation::WhiteBottom,
        }
    }
}
