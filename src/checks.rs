use crate::attacks::AttackMap;
use crate::geometry::squares_between;
use crate::square::Square;
use crate::square_set::{SquareSet, EMPTY};

/// Whether the side to move stands in check, and if so what ends it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckState {
    /// Is the mover's king attacked at all?
    pub in_check: bool,
    /// By two or more pieces at once?  Then only the king may move.
    pub double_check: bool,
    /// The squares a non-king piece may land on to end a single check:
    /// capture the checker, or stand on its line to the king.  Meaningless
    /// unless `in_check && !double_check`.
    pub blocking_squares: SquareSet,
}

impl CheckState {
    /// The quiet life: no check at all.
    pub fn none() -> CheckState {
        CheckState {
            in_check: false,
            double_check: false,
            blocking_squares: EMPTY,
        }
    }

    /// Classify the check against `king` from the enemy's attack map.
    pub fn resolve(map: &AttackMap, king: Square) -> CheckState {
        let checkers: Vec<Square> = map.attackers_of(king).collect();
        match checkers.len() {
            0 => CheckState::none(),
            1 => {
                // A pawn or knight checker has no line to block; capturing
                // it is the only non-king answer.  squares_between returns
                // the empty set for those, since they never sit on a shared
                // line with the king.
                let checker = checkers[0];
                let mut blocking = squares_between(checker, king);
                blocking.insert(checker);
                CheckState {
                    in_check: true,
                    double_check: false,
                    blocking_squares: blocking,
                }
            }
            _ => CheckState {
                in_check: true,
                double_check: true,
                blocking_squares: EMPTY,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PositionBuilder;
    use crate::castle_rights::CastleRights;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::position::Position;
    use std::convert::TryFrom;

    fn check_state(pieces: &[(Square, Piece, Color)]) -> CheckState {
        let pos = Position::try_from(&PositionBuilder::setup(
            pieces,
            Color::White,
            CastleRights::NoRights,
            CastleRights::NoRights,
            None,
        ))
        .unwrap();
        let map = AttackMap::build(&pos, Color::Black);
        CheckState::resolve(&map, pos.king_square(Color::White))
    }

    #[test]
    fn no_attacker_means_no_check() {
        let state = check_state(&[
            (Square::E1, Piece::King, Color::White),
            (Square::A8, Piece::King, Color::Black),
            (Square::B8, Piece::Rook, Color::Black),
        ]);
        assert!(!state.in_check);
        assert!(!state.double_check);
    }

    #[test]
    fn slider_check_can_be_blocked_anywhere_on_the_line() {
        let state = check_state(&[
            (Square::E1, Piece::King, Color::White),
            (Square::E8, Piece::Rook, Color::Black),
            (Square::A8, Piece::King, Color::Black),
        ]);
        assert!(state.in_check);
        assert!(!state.double_check);
        // e2 through e7, plus the rook itself
        assert_eq!(state.blocking_squares.count(), 7);
        assert!(state.blocking_squares.contains(Square::E8));
        assert!(state.blocking_squares.contains(Square::E5));
        assert!(!state.blocking_squares.contains(Square::E1));
    }

    #[test]
    fn knight_check_only_answers_to_capture() {
        let state = check_state(&[
            (Square::E1, Piece::King, Color::White),
            (Square::F3, Piece::Knight, Color::Black),
            (Square::A8, Piece::King, Color::Black),
        ]);
        assert!(state.in_check);
        assert_eq!(state.blocking_squares.count(), 1);
        assert!(state.blocking_squares.contains(Square::F3));
    }

    #[test]
    fn two_attackers_make_a_double_check() {
        let state = check_state(&[
            (Square::E1, Piece::King, Color::White),
            (Square::E8, Piece::Rook, Color::Black),
            (Square::F3, Piece::Knight, Color::Black),
            (Square::A8, Piece::King, Color::Black),
        ]);
        assert!(state.in_check);
        assert!(state.double_check);
        assert!(state.blocking_squares.is_empty());
    }
}
