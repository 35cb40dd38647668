use crate::color::Color;
use crate::geometry::KING_DIRECTIONS;
use crate::position::Position;
use crate::square::Square;
use crate::square_set::{SquareSet, EMPTY};

/// A piece frozen onto the line between its king and an enemy slider.  The
/// path runs from one step off the king up to and including the attacker, so
/// a pinned piece may still slide along the line or capture its pinner.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PinRecord {
    /// The square of the pinned piece.
    pub pinned: Square,
    /// Every square the pinned piece may still stand on.
    pub path_to_king: SquareSet,
}

/// Find every piece of `color` pinned to its own king.  Records from the
/// previous ply are garbage the moment anything moves; callers recompute,
/// never patch.
pub fn find_pins(position: &Position, color: Color) -> Vec<PinRecord> {
    let king = position.king_square(color);
    let mut pins = Vec::new();

    for dir in KING_DIRECTIONS.iter() {
        let mut candidate: Option<Square> = None;
        let mut path = EMPTY;
        let mut cur = king.translate(dir.df, dir.dr);
        while let Some(sq) = cur {
            path.insert(sq);
            match position.piece_on(sq) {
                None => {}
                Some((_, c)) if c == color => {
                    if candidate.is_some() {
                        // two friendly pieces shield the king; no pin here
                        break;
                    }
                    candidate = Some(sq);
                }
                Some((piece, _)) => {
                    let lasers = if dir.is_orthogonal() {
                        piece.slides_orthogonally()
                    } else {
                        piece.slides_diagonally()
                    };
                    if let (Some(pinned), true) = (candidate, lasers) {
                        pins.push(PinRecord {
                            pinned,
                            path_to_king: path,
                        });
                    }
                    break;
                }
            }
            cur = sq.translate(dir.df, dir.dr);
        }
    }
    pins
}

/// The path constraining `square`, if some pin holds it.
pub fn pin_path(pins: &[PinRecord], square: Square) -> Option<SquareSet> {
    pins.iter()
        .find(|pin| pin.pinned == square)
        .map(|pin| pin.path_to_king)
}
