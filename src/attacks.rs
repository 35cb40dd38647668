use crate::color::Color;
use crate::geometry::{Direction, BISHOP_DIRECTIONS, KING_DIRECTIONS, KNIGHT_JUMPS, ROOK_DIRECTIONS};
use crate::piece::Piece;
use crate::position::{Cell, Position};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use crate::square_set::{SquareSet, EMPTY};

/// One attacker-to-target edge out of the attack map.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AttackEdge {
    pub attacker: Square,
    pub target: Square,
}

/// Every square one side attacks, plus the flat list of attacker-to-target
/// edges behind it.  Rebuilt from scratch every ply.
///
/// Attack geometry differs from move geometry in three ways:
/// pawns cover their two forward diagonals whether or not anything stands
/// there, sliders cover every square up to *and including* the first piece
/// in the way, and the king covers its eight neighbours with no castling and
/// no looking at what the enemy king covers (a fixed pattern, so the two
/// kings' maps never recurse into each other).
///
/// Slider rays also pass straight through the defending king: a king
/// standing on a checking ray must not shade the square behind himself, or
/// stepping back along the ray would look safe while leaving him in check.
/// The defender's own attacked status is unaffected, since no piece blocks
/// the ray to its own square.
#[derive(Clone, Debug)]
pub struct AttackMap {
    attacked: SquareSet,
    edges: Vec<AttackEdge>,
}

impl AttackMap {
    /// Build the map of everything `by`-colored pieces attack on this board.
    pub fn build(position: &Position, by: Color) -> AttackMap {
        let mut map = AttackMap {
            attacked: EMPTY,
            edges: Vec::with_capacity(64),
        };

        // the king whose safety this map is consulted for
        let defender_king = ALL_SQUARES
            .iter()
            .find(|&&sq| position.piece_on(sq) == Some((Piece::King, !by)))
            .copied();

        for &source in ALL_SQUARES.iter() {
            let (piece, color) = match position.piece_on(source) {
                Some(cell) => cell,
                None => continue,
            };
            if color != by {
                continue;
            }
            match piece {
                Piece::Pawn => {
                    for &df in [-1i8, 1].iter() {
                        if let Some(target) = source.translate(df, by.forward()) {
                            map.mark(source, target);
                        }
                    }
                }
                Piece::Knight => map.mark_steps(source, &KNIGHT_JUMPS),
                Piece::King => map.mark_steps(source, &KING_DIRECTIONS),
                Piece::Rook => map.slide(position, source, &ROOK_DIRECTIONS, defender_king),
                Piece::Bishop => map.slide(position, source, &BISHOP_DIRECTIONS, defender_king),
                Piece::Queen => map.slide(position, source, &KING_DIRECTIONS, defender_king),
            }
        }
        map
    }

    fn mark(&mut self, attacker: Square, target: Square) {
        self.attacked.insert(target);
        self.edges.push(AttackEdge { attacker, target });
    }

    fn mark_steps(&mut self, source: Square, steps: &[Direction]) {
        for step in steps.iter() {
            if let Some(target) = source.translate(step.df, step.dr) {
                self.mark(source, target);
            }
        }
    }

    fn slide(
        &mut self,
        position: &Position,
        source: Square,
        directions: &[Direction],
        defender_king: Option<Square>,
    ) {
        for dir in directions.iter() {
            let mut cur = source.translate(dir.df, dir.dr);
            while let Some(target) = cur {
                self.mark(source, target);
                if position.piece_on(target).is_some() && Some(target) != defender_king {
                    break;
                }
                cur = target.translate(dir.df, dir.dr);
            }
        }
    }

    /// Is this square attacked?
    #[inline]
    pub fn is_attacked(&self, square: Square) -> bool {
        self.attacked.contains(square)
    }

    /// The full attacked set.
    #[inline]
    pub fn attacked(&self) -> SquareSet {
        self.attacked
    }

    /// Every attacker-to-target edge.
    #[inline]
    pub fn edges(&self) -> &[AttackEdge] {
        &self.edges
    }

    /// Every square attacking `target`.
    pub fn attackers_of<'a>(&'a self, target: Square) -> impl Iterator<Item = Square> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.target == target)
            .map(|edge| edge.attacker)
    }
}

/// Decide whether `target` is attacked by any `by`-colored piece on `cells`,
/// without building a whole map: cast rays out from the target and look at
/// what they hit.  This is the form the en-passant simulation and position
/// validation want, since both ask about boards that are not the live
/// `Position`.
pub fn square_attacked(cells: &[Cell; NUM_SQUARES], target: Square, by: Color) -> bool {
    // a pawn attacks the target from one rank back toward its own side
    for &df in [-1i8, 1].iter() {
        if let Some(sq) = target.translate(df, -by.forward()) {
            if cells[sq.to_index()] == Some((Piece::Pawn, by)) {
                return true;
            }
        }
    }

    for jump in KNIGHT_JUMPS.iter() {
        if let Some(sq) = target.translate(jump.df, jump.dr) {
            if cells[sq.to_index()] == Some((Piece::Knight, by)) {
                return true;
            }
        }
    }

    for dir in KING_DIRECTIONS.iter() {
        let mut steps = 0;
        let mut cur = target.translate(dir.df, dir.dr);
        while let Some(sq) = cur {
            steps += 1;
            match cells[sq.to_index()] {
                None => cur = sq.translate(dir.df, dir.dr),
                Some((piece, color)) => {
                    if color == by {
                        let reaches = if dir.is_orthogonal() {
                            piece.slides_orthogonally()
                        } else {
                            piece.slides_diagonally()
                        };
                        if reaches || (steps == 1 && piece == Piece::King) {
                            return true;
                        }
                    }
                    break;
                }
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn initial_position_white_attacks() {
        let pos = Position::initial();
        let map = AttackMap::build(&pos, Color::White);
        // the third rank is fully covered by pawns and knights
        assert!(map.is_attacked(Square::A3));
        assert!(map.is_attacked(Square::E3));
        assert!(map.is_attacked(Square::H3));
        // nothing reaches past it yet
        assert!(!map.is_attacked(Square::E4));
        assert!(!map.is_attacked(Square::E5));
    }

    #[test]
    fn sliders_cover_through_the_first_blocker_only() {
        let pos = Position::initial();
        let map = AttackMap::build(&pos, Color::White);
        // the a1 rook covers its own pawn's square, but nothing beyond
        assert!(map.is_attacked(Square::A2));
        assert!(map
            .attackers_of(Square::A2)
            .any(|attacker| attacker == Square::A1));
        assert_eq!(map.attackers_of(Square::A4).count(), 0);
    }

    #[test]
    fn pawns_attack_diagonals_regardless_of_occupancy() {
        let pos = Position::initial();
        let map = AttackMap::build(&pos, Color::Black);
        assert!(map.is_attacked(Square::A6));
        assert!(map.is_attacked(Square::B6));
        assert!(!map.is_attacked(Square::B5));
    }

    #[test]
    fn square_attacked_sees_each_piece_kind() {
        let mut cells: [Cell; NUM_SQUARES] = [None; NUM_SQUARES];
        cells[Square::A1.to_index()] = Some((Piece::Rook, Color::White));
        cells[Square::C3.to_index()] = Some((Piece::Knight, Color::White));
        cells[Square::G2.to_index()] = Some((Piece::King, Color::White));
        cells[Square::F6.to_index()] = Some((Piece::Pawn, Color::White));

        assert!(square_attacked(&cells, Square::A8, Color::White)); // rook file
        assert!(square_attacked(&cells, Square::D5, Color::White)); // knight jump
        assert!(square_attacked(&cells, Square::H1, Color::White)); // king step
        assert!(square_attacked(&cells, Square::E7, Color::White)); // pawn diagonal
        assert!(!square_attacked(&cells, Square::F7, Color::White)); // pawns push there, never attack
        assert!(!square_attacked(&cells, Square::H8, Color::White));
    }

    #[test]
    fn square_attacked_respects_blockers() {
        let mut cells: [Cell; NUM_SQUARES] = [None; NUM_SQUARES];
        cells[Square::A1.to_index()] = Some((Piece::Rook, Color::White));
        cells[Square::A4.to_index()] = Some((Piece::Pawn, Color::Black));
        assert!(square_attacked(&cells, Square::A4, Color::White));
        assert!(!square_attacked(&cells, Square::A5, Color::White));
    }
}
