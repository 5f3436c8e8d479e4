//! Turn ownership.

use shakmaty::Color;

use crate::game::orientation::Orientation;

/// Who acts next. Derived, never stored: recomputed from the orientation
/// and the side to move after every applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOwner {
    Human,
    Agent,
}

/// Pure turn decision: the human owns the turn exactly when the side to
/// move is the color they are playing.
pub fn turn_owner(orientation: Orientation, side_to_move: Color) -> TurnOwner {
    if side_to_move == orientation.human_color() {
        TurnOwner::Human
    } else {
        TurnOwner::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_moves_when_side_matches_orientation() {
        assert_eq!(
            turn_owner(Orientation::WhiteBottom, Color::White),
            TurnOwner::Human
        );
        assert_eq!(
            turn_owner(Orientation::BlackBottom, Color::Black),
            TurnOwner::Human
        );
    }

    #[test]
    fn agent_moves_otherwise() {
        assert_eq!(
            turn_owner(Orientation::WhiteBottom, Color::Black),
            TurnOwner::Agent
        );
        assert_eq!(
            turn_owner(Orientation::BlackBottom, Color::White),
            TurnOwner::Agent
        );
    }

    #[test]
    fn exactly_one_owner_per_position() {
        for orientation in [Orientation::WhiteBottom, Orientation::BlackBottom] {
            for side in [Color::White, Color::Black] {
                let owner = turn_owner(orientation, side);
                assert!(owner == TurnOwner::Human || owner == TurnOwner::Agent);
            }
        }
    }
}
