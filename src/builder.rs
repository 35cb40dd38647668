use crate::attacks;
use crate::castle_rights::CastleRights;
use crate::color::{Color, NUM_COLORS};
use crate::error::Error;
use crate::file::File;
use crate::piece::Piece;
use crate::position::{Cell, Position};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

/// A chess position that has *not* been checked for sanity.
///
/// The engine proper only accepts positions a game could actually reach, so
/// building one square by square goes through this type first.  Drop pieces
/// anywhere, pick the side to move, claim castle rights and an en-passant
/// file, then convert: the conversion verifies the king invariants and trims
/// any castle right the occupancy cannot back up.
///
/// ```
/// use dropchess::{Color, Error, Game, Piece, Position, PositionBuilder, Square, CastleRights};
/// use std::convert::TryInto;
///
/// # fn main() -> Result<(), Error> {
/// let position: Position = PositionBuilder::setup(
///     &[
///         (Square::A1, Piece::King, Color::White),
///         (Square::H8, Piece::King, Color::Black),
///     ],
///     Color::White,
///     CastleRights::NoRights,
///     CastleRights::NoRights,
///     None,
/// )
/// .try_into()?;
///
/// let game = Game::new_with_position(position);
/// assert_eq!(game.legal_moves(Square::A1).len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone)]
pub struct PositionBuilder {
    pieces: [Cell; NUM_SQUARES],
    side_to_move: Color,
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: Option<File>,
}

impl PositionBuilder {
    /// An empty board: no pieces, no rights, no en-passant file, White to
    /// move.
    pub fn new() -> PositionBuilder {
        PositionBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights; NUM_COLORS],
            en_passant: None,
        }
    }

    /// Set up a board with everything pre-loaded.
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, Piece, Color)>,
        side_to_move: Color,
        white_castle_rights: CastleRights,
        black_castle_rights: CastleRights,
        en_passant: Option<File>,
    ) -> PositionBuilder {
        let mut result = PositionBuilder {
            pieces: [None; NUM_SQUARES],
            side_to_move,
            castle_rights: [white_castle_rights, black_castle_rights],
            en_passant,
        };

        for &(square, piece, color) in pieces.into_iter() {
            result.pieces[square.to_index()] = Some((piece, color));
        }

        result
    }

    /// Place a piece.  Usable directly or in a builder chain.
    pub fn piece(&mut self, square: Square, piece: Piece, color: Color) -> &mut Self {
        self[square] = Some((piece, color));
        self
    }

    /// Pick the side to move.
    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    /// Claim castle rights for one side.  The conversion still trims claims
    /// the occupancy cannot back up.
    pub fn castle_rights(&mut self, color: Color, rights: CastleRights) -> &mut Self {
        self.castle_rights[color.to_index()] = rights;
        self
    }

    /// Declare the file of a double push that supposedly just happened.
    pub fn en_passant(&mut self, file: Option<File>) -> &mut Self {
        self.en_passant = file;
        self
    }

    /// Get the current player.
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }
}

impl Index<Square> for PositionBuilder {
    type Output = Cell;

    fn index(&self, square: Square) -> &Self::Output {
        &self.pieces[square.to_index()]
    }
}

impl IndexMut<Square> for PositionBuilder {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self.pieces[square.to_index()]
    }
}

impl Default for PositionBuilder {
    fn default() -> PositionBuilder {
        PositionBuilder::new()
    }
}

impl TryFrom<&PositionBuilder> for Position {
    type Error = Error;

    fn try_from(builder: &PositionBuilder) -> Result<Position, Error> {
        let mut kings: [Option<Square>; NUM_COLORS] = [None; NUM_COLORS];
        for &sq in ALL_SQUARES.iter() {
            if let Some((Piece::King, color)) = builder.pieces[sq.to_index()] {
                if kings[color.to_index()].is_some() {
                    return Err(Error::TooManyKings { color });
                }
                kings[color.to_index()] = Some(sq);
            }
        }

        let white_king = kings[Color::White.to_index()].ok_or(Error::MissingKing {
            color: Color::White,
        })?;
        let black_king = kings[Color::Black.to_index()].ok_or(Error::MissingKing {
            color: Color::Black,
        })?;

        // the mover must not already be able to take the enemy king
        let defender = !builder.side_to_move;
        let defender_king = kings[defender.to_index()].unwrap();
        if attacks::square_attacked(&builder.pieces, defender_king, builder.side_to_move) {
            return Err(Error::KingCapturable { color: defender });
        }

        let mut position = Position::from_parts(
            builder.pieces,
            builder.castle_rights,
            builder.en_passant,
            builder.side_to_move,
            [white_king, black_king],
        );
        position.refresh_castle_rights();
        Ok(position)
    }
}

impl TryFrom<PositionBuilder> for Position {
    type Error = Error;

    fn try_from(builder: PositionBuilder) -> Result<Position, Error> {
        Position::try_from(&builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_kings_are_required() {
        let builder = PositionBuilder::setup(
            &[(Square::E1, Piece::King, Color::White)],
            Color::White,
            CastleRights::NoRights,
            CastleRights::NoRights,
            None,
        );
        assert!(Position::try_from(&builder).is_err());
    }

    #[test]
    fn one_king_each_is_enough() {
        let mut builder = PositionBuilder::new();
        builder
            .piece(Square::E1, Piece::King, Color::White)
            .piece(Square::E8, Piece::King, Color::Black);
        assert!(Position::try_from(&builder).is_ok());
    }

    #[test]
    fn two_kings_of_one_color_are_rejected() {
        let builder = PositionBuilder::setup(
            &[
                (Square::E1, Piece::King, Color::White),
                (Square::A1, Piece::King, Color::White),
                (Square::E8, Piece::King, Color::Black),
            ],
            Color::White,
            CastleRights::NoRights,
            CastleRights::NoRights,
            None,
        );
        assert!(Position::try_from(&builder).is_err());
    }

    #[test]
    fn the_mover_may_not_have_the_enemy_king_en_prise() {
        let builder = PositionBuilder::setup(
            &[
                (Square::E1, Piece::King, Color::White),
                (Square::E8, Piece::King, Color::Black),
                (Square::E4, Piece::Rook, Color::White),
            ],
            Color::White,
            CastleRights::NoRights,
            CastleRights::NoRights,
            None,
        );
        assert!(Position::try_from(&builder).is_err());

        // the same position is fine with Black to move: Black is merely in check
        let builder = PositionBuilder::setup(
            &[
                (Square::E1, Piece::King, Color::White),
                (Square::E8, Piece::King, Color::Black),
                (Square::E4, Piece::Rook, Color::White),
            ],
            Color::Black,
            CastleRights::NoRights,
            CastleRights::NoRights,
            None,
        );
        assert!(Position::try_from(&builder).is_ok());
    }

    #[test]
    fn claimed_rights_get_trimmed_to_the_occupancy() {
        let builder = PositionBuilder::setup(
            &[
                (Square::E1, Piece::King, Color::White),
                (Square::H1, Piece::Rook, Color::White),
                (Square::E8, Piece::King, Color::Black),
            ],
            Color::White,
            CastleRights::Both,
            CastleRights::Both,
            None,
        );
        let position = Position::try_from(&builder).unwrap();
        // no a1 rook, so the queenside claim evaporates
        assert_eq!(
            position.castle_rights(Color::White),
            CastleRights::KingSide
        );
        assert_eq!(
            position.castle_rights(Color::Black),
            CastleRights::NoRights
        );
    }
}
