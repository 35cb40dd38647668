use crate::color::Color;
use failure::Fail;

/// Sometimes a hand-built position doesn't hold water.
#[derive(Debug, Fail)]
pub enum Error {
    /// Every legal position has exactly one king per side; this one has none
    /// for the given color.
    #[fail(display = "no {:?} king on the board", color)]
    MissingKing { color: Color },

    /// More than one king of the same color.
    #[fail(display = "more than one {:?} king on the board", color)]
    TooManyKings { color: Color },

    /// The side to move could capture the opposing king, which no sequence
    /// of legal moves can reach.
    #[fail(display = "the {:?} king can be captured by the side to move", color)]
    KingCapturable { color: Color },
}
