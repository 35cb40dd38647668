//! The move-legality engine behind a drag-and-drop chess board.
//!
//! The driver commits moves square by square as pieces are dropped; the
//! engine advances the turn, rebuilds its attack map, check state, pins and
//! legal-move table from scratch, and answers "where may this piece go?"
//! per square.  Checkmate and stalemate fall out of an empty table.

pub mod attacks;
pub mod builder;
pub mod castle_rights;
pub mod checks;
pub mod chess_move;
pub mod color;
pub mod error;
pub mod file;
pub mod game;
pub mod geometry;
pub mod movegen;
pub mod piece;
pub mod pins;
pub mod position;
pub mod rank;
pub mod square;
pub mod square_set;

pub use crate::attacks::{square_attacked, AttackEdge, AttackMap};
pub use crate::builder::PositionBuilder;
pub use crate::castle_rights::{CastleRights, ALL_CASTLE_RIGHTS, NUM_CASTLE_RIGHTS};
pub use crate::checks::CheckState;
pub use crate::chess_move::{Move, MoveKind};
pub use crate::color::{Color, ALL_COLORS, NUM_COLORS};
pub use crate::error::Error;
pub use crate::file::{File, ALL_FILES, NUM_FILES};
pub use crate::game::{Game, GameStatus, LegalMoves};
pub use crate::geometry::{
    squares_between, step_between, Direction, BISHOP_DIRECTIONS, KING_DIRECTIONS, KNIGHT_JUMPS,
    ROOK_DIRECTIONS,
};
pub use crate::movegen::{pseudo_legal_moves, MoveList, MAX_MOVES_PER_PIECE};
pub use crate::piece::{
    Piece, ALL_PIECES, NUM_PIECES, NUM_PROMOTION_PIECES, PROMOTION_PIECES,
};
pub use crate::pins::{find_pins, pin_path, PinRecord};
pub use crate::position::{Cell, Position};
pub use crate::rank::{Rank, ALL_RANKS, NUM_RANKS};
pub use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
pub use crate::square_set::{SquareSet, EMPTY};
