use std::fmt;

/// Represent a kind of chessman.  A board cell pairs one of these with a
/// `Color`; "empty" is the absence of the pair, never a magic value.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECES: [Piece; NUM_PIECES] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// How many ways can a pawn promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// The pieces a pawn may turn into.
pub const PROMOTION_PIECES: [Piece; NUM_PROMOTION_PIECES] = [
    Piece::Queen,
    Piece::Knight,
    Piece::Rook,
    Piece::Bishop,
];

impl Piece {
    /// Convert the `Piece` to a `usize` for table lookups.
    #[inline]
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Does this piece slide along ranks and files?  Queens do too.
    #[inline]
    pub fn slides_orthogonally(&self) -> bool {
        match *self {
            Piece::Rook | Piece::Queen => true,
            _ => false,
        }
    }

    /// Does this piece slide along diagonals?  Queens do too.
    #[inline]
    pub fn slides_diagonally(&self) -> bool {
        match *self {
            Piece::Bishop | Piece::Queen => true,
            _ => false,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Piece::Pawn => "p",
                Piece::Knight => "n",
                Piece::Bishop => "b",
                Piece::Rook => "r",
                Piece::Queen => "q",
                Piece::King => "k",
            }
        )
    }
}
