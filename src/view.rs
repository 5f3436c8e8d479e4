//! Pure render model for the board and move history.
//!
//! [`BoardView`] is the full description of one frame: 64 cells in display
//! order, each with its square, checkerboard shade, optional piece glyph
//! and highlight state. Nothing here mutates the session.

use shakmaty::{Color, File, Piece, Rank, Role, Square};

use crate::game::orientation::Orientation;
use crate::game::session::GameSession;

/// Checkerboard shade of a cell. Derived from the square itself, so it is
/// stable under orientation flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

/// Highlight layered on a cell by the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// The selected source square.
    Selected,
    /// A legal destination of the selected piece.
    Target,
}

/// One rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub square: Square,
    pub shade: Shade,
    pub glyph: Option<char>,
    pub highlight: Highlight,
}

/// The rendered board: 64 cells, top-left first, eight per row.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub cells: Vec<CellView>,
}

impl BoardView {
    pub fn render(session: &GameSession) -> Self {
        let selection = session.selection();
        let cells = display_squares(session.orientation())
            .into_iter()
            .map(|square| {
                let highlight = if selection.selected() == Some(square) {
                    Highlight::Selected
                } else if selection.contains_target(square) {
                    Highlight::Target
                } else {
                    Highlight::None
                };
                CellView {
                    square,
                    shade: shade(square),
                    glyph: session.rules().piece_at(square).map(piece_glyph),
                    highlight,
                }
            })
            .collect();
        Self { cells }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(8)
    }

    /// Plain-text rendering used by the terminal shell. Selected squares
    /// are bracketed, empty destination squares marked with `x`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut files = String::from(" ");
        for row in self.rows() {
            if let Some(cell) = row.first() {
                out.push(char::from(b'1' + u32::from(cell.square.rank()) as u8));
            }
            for cell in row {
                let glyph = match (cell.glyph, cell.highlight) {
                    (Some(g), _) => g,
                    (None, Highlight::Target) => 'x',
                    (None, _) => '·',
                };
                match cell.highlight {
                    Highlight::Selected => {
                        out.push('[');
                        out.push(glyph);
                        out.push(']');
                    }
                    _ => {
                        out.push(' ');
                        out.push(glyph);
                        out.push(' ');
                    }
                }
            }
            out.push('\n');
        }
        for cell in self.cells.iter().take(8) {
            files.push(' ');
            files.push(cell.square.file().char());
            files.push(' ');
        }
        out.push_str(files.trim_end());
        out.push('\n');
        out
    }
}

/// Squares in display order for `orientation`: top-left first, row by row,
/// with the human's first rank along the bottom edge.
pub fn display_squares(orientation: Orientation) -> Vec<Square> {
    let mut squares = Vec::with_capacity(64);
    for row in 0..8u32 {
        for col in 0..8u32 {
            let (file, rank) = match orientation {
                Orientation::WhiteBottom => (col, 7 - row),
                Orientation::BlackBottom => (7 - col, row),
            };
            squares.push(Square::from_coords(File::new(file), Rank::new(rank)));
        }
    }
    squares
}

/// Standard Unicode chess glyph for a piece.
pub fn piece_glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Color::White, Role::King) => '♔',
        (Color::White, Role::Queen) => '♕',
        (Color::White, Role::Rook) => '♖',
        (Color::White, Role::Bishop) => '♗',
        (Color::White, Role::Knight) => '♘',
        (Color::White, Role::Pawn) => '♙',
        (Color::Black, Role::King) => '♚',
        (Color::Black, Role::Queen) => '♛',
        (Color::Black, Role::Rook) => '♜',
        (Color::Black, Role::Bishop) => '♝',
        (Color::Black, Role::Knight) => '♞',
        (Color::Black, Role::Pawn) => '♟',
    }
}

fn shade(square: Square) -> Shade {
    if (u32::from(square.file()) + u32::from(square.rank())) % 2 == 1 {
        Shade::Light
    } else {
        Shade::Dark
    }
}

/// Pair half-moves into numbered full-move lines, e.g. `"1. e4 e5"`. A
/// trailing white half-move stands alone.
pub fn history_lines(history: &[String]) -> Vec<String> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let white = pair.first().map(String::as_str).unwrap_or("");
            let black = pair.get(1).map(String::as_str).unwrap_or("");
            format!("{}. {white} {black}", i + 1).trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::orientation::Orientation;
    use crate::game::session::GameSession;

    #[test]
    fn white_bottom_starts_at_a8() {
        let squares = display_squares(Orientation::WhiteBottom);
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[7], Square::H8);
        assert_eq!(squares[63], Square::H1);
    }

    #[test]
    fn black_bottom_starts_at_h1() {
        let squares = display_squares(Orientation::BlackBottom);
        assert_eq!(squares[0], Square::H1);
        assert_eq!(squares[7], Square::A1);
        assert_eq!(squares[63], Square::A8);
    }

    #[test]
    fn shades_alternate_and_a1_is_dark() {
        assert_eq!(shade(Square::A1), Shade::Dark);
        assert_eq!(shade(Square::B1), Shade::Light);
        assert_eq!(shade(Square::A8), Shade::Light);
        assert_eq!(shade(Square::H1), Shade::Light);
        assert_eq!(shade(Square::H8), Shade::Dark);
    }

    #[test]
    fn render_places_glyphs_and_highlights() {
        let mut session = GameSession::new();
        session.handle_click(Square::E2);
        let view = BoardView::render(&session);
        assert_eq!(view.cells.len(), 64);

        let cell_at = |sq: Square| *view.cells.iter().find(|c| c.square == sq).unwrap();
        assert_eq!(cell_at(Square::E2).highlight, Highlight::Selected);
        assert_eq!(cell_at(Square::E2).glyph, Some('♙'));
        assert_eq!(cell_at(Square::E3).highlight, Highlight::Target);
        assert_eq!(cell_at(Square::E4).highlight, Highlight::Target);
        assert_eq!(cell_at(Square::E5).highlight, Highlight::None);
        assert_eq!(cell_at(Square::E8).glyph, Some('♚'));
        assert_eq!(cell_at(Square::D4).glyph, None);
    }

    #[test]
    fn clearing_selection_clears_all_highlights() {
        let mut session = GameSession::new();
        session.handle_click(Square::E2);
        session.handle_click(Square::E5); // not a destination
        let view = BoardView::render(&session);
        assert!(view
            .cells
            .iter()
            .all(|c| c.highlight == Highlight::None));
    }

    #[test]
    fn history_pairs_into_numbered_lines() {
        let history: Vec<String> = ["e4", "e5", "Nf3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(history_lines(&history), ["1. e4 e5", "2. Nf3"]);
        assert!(history_lines(&[]).is_empty());
    }

    #[test]
    fn text_rendering_has_eight_board_rows() {
        let session = GameSession::new();
        let text = BoardView::render(&session).to_text();
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().next().unwrap().starts_with('8'));
        assert!(text.lines().last().unwrap().contains('a'));
    }
}
