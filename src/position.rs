use crate::castle_rights::CastleRights;
use crate::color::{Color, ALL_COLORS, NUM_COLORS};
use crate::file::{File, ALL_FILES};
use crate::piece::Piece;
use crate::rank::Rank;
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::fmt;

/// One board cell: a piece of some color, or nothing at all.
pub type Cell = Option<(Piece, Color)>;

/// The canonical mutable state of the game: the 64 cells, castle rights,
/// the en-passant file, whose turn it is, and the cached king squares.
///
/// A `Position` is dumb on purpose.  The mutators below apply exactly what
/// they are told, and it is the turn orchestrator (`Game`) that strings them
/// into legal chess.  Nothing in here asks whether a move is allowed.
#[derive(Copy, Clone, PartialEq)]
pub struct Position {
    cells: [Cell; NUM_SQUARES],
    castle_rights: [CastleRights; NUM_COLORS],
    en_passant: Option<File>,
    side_to_move: Color,
    king_square: [Square; NUM_COLORS],
    last_move: Option<(Square, Square)>,
}

impl Position {
    /// The standard starting position, White to move.
    pub fn initial() -> Position {
        const BACKRANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut cells: [Cell; NUM_SQUARES] = [None; NUM_SQUARES];
        for (i, &file) in ALL_FILES.iter().enumerate() {
            cells[Square::make_square(Rank::First, file).to_index()] =
                Some((BACKRANK[i], Color::White));
            cells[Square::make_square(Rank::Second, file).to_index()] =
                Some((Piece::Pawn, Color::White));
            cells[Square::make_square(Rank::Seventh, file).to_index()] =
                Some((Piece::Pawn, Color::Black));
            cells[Square::make_square(Rank::Eighth, file).to_index()] =
                Some((BACKRANK[i], Color::Black));
        }

        Position {
            cells,
            castle_rights: [CastleRights::Both; NUM_COLORS],
            en_passant: None,
            side_to_move: Color::White,
            king_square: [Square::E1, Square::E8],
            last_move: None,
        }
    }

    /// Assemble a position from parts the builder has already validated.
    pub(crate) fn from_parts(
        cells: [Cell; NUM_SQUARES],
        castle_rights: [CastleRights; NUM_COLORS],
        en_passant: Option<File>,
        side_to_move: Color,
        king_square: [Square; NUM_COLORS],
    ) -> Position {
        Position {
            cells,
            castle_rights,
            en_passant,
            side_to_move,
            king_square,
            last_move: None,
        }
    }

    /// All 64 cells, for code that wants to scan or scratch-copy the board.
    #[inline]
    pub fn cells(&self) -> &[Cell; NUM_SQUARES] {
        &self.cells
    }

    /// What is on a particular `Square`?  Is there even anything?
    #[inline]
    pub fn piece_on(&self, square: Square) -> Cell {
        self.cells[square.to_index()]
    }

    /// The color of whatever stands on a square, if anything does.
    #[inline]
    pub fn color_on(&self, square: Square) -> Option<Color> {
        self.cells[square.to_index()].map(|(_, color)| color)
    }

    /// Whose turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Grab the `CastleRights` for a particular side.
    #[inline]
    pub fn castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    /// The file a pawn may currently be captured en passant on, if any.
    /// Valid for exactly the ply after a double push.
    #[inline]
    pub fn en_passant_file(&self) -> Option<File> {
        self.en_passant
    }

    /// Where is this side's king?  Kept current by the turn orchestrator.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.to_index()]
    }

    /// The last committed relocation, newest only.
    #[inline]
    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    /// Relocate whatever stands on `from` to `to`, and remember it as the
    /// last move.  Capture removal is the driver's job, beforehand.
    pub fn commit_move(&mut self, from: Square, to: Square) {
        debug_assert!(
            self.cells[from.to_index()].is_some(),
            "commit_move from an empty square: {}",
            from
        );
        self.cells[to.to_index()] = self.cells[from.to_index()].take();
        self.last_move = Some((from, to));
    }

    /// Clear a square.  Used for captures, including the pawn an en-passant
    /// capture removes from a square nobody landed on.
    pub fn remove_piece(&mut self, square: Square) {
        self.cells[square.to_index()] = None;
    }

    /// Replace the pawn that just ran from `vacated` with the piece the
    /// driver chose, placed on `square`.
    pub fn promote(&mut self, square: Square, piece: Piece, vacated: Square) {
        let (_, color) = self.cells[vacated.to_index()]
            .take()
            .expect("promote with nothing on the vacated square");
        self.cells[square.to_index()] = Some((piece, color));
        self.last_move = Some((vacated, square));
    }

    /// Set or clear the en-passant file.  The orchestrator owns the
    /// one-ply-only lifetime.
    pub(crate) fn set_en_passant(&mut self, file: Option<File>) {
        self.en_passant = file;
    }

    /// Hand the move to the other side.
    pub(crate) fn flip_side_to_move(&mut self) {
        self.side_to_move = !self.side_to_move;
    }

    /// Drop every castle right whose king or rook is no longer sitting on
    /// its home square.  Rights only ever shrink, so a rook that wanders
    /// home again does not win its wing back.
    pub fn refresh_castle_rights(&mut self) {
        for &color in ALL_COLORS.iter() {
            let backrank = color.to_my_backrank();
            let king_home = self.piece_on(Square::make_square(backrank, File::E))
                == Some((Piece::King, color));
            let mut rights = self.castle_rights(color);
            if rights.has_kingside()
                && !(king_home
                    && self.piece_on(Square::make_square(backrank, File::H))
                        == Some((Piece::Rook, color)))
            {
                rights = rights.remove(CastleRights::KingSide);
            }
            if rights.has_queenside()
                && !(king_home
                    && self.piece_on(Square::make_square(backrank, File::A))
                        == Some((Piece::Rook, color)))
            {
                rights = rights.remove(CastleRights::QueenSide);
            }
            self.castle_rights[color.to_index()] = rights;
        }
    }

    /// Rescan the board for both kings and refresh the caches.
    pub fn relocate_kings(&mut self) {
        for &sq in ALL_SQUARES.iter() {
            if let Some((Piece::King, color)) = self.piece_on(sq) {
                self.king_square[color.to_index()] = sq;
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s: String = "".to_owned();
        for rank in (0..8).rev() {
            s.push_str(&(rank + 1).to_string());
            s.push_str(" ");
            for file in 0..8 {
                let sq = Square::make_square(Rank::from_index(rank), File::from_index(file));
                match self.piece_on(sq) {
                    None => s.push_str(" . "),
                    Some((piece, color)) => {
                        s.push_str(" ");
                        if color == Color::White {
                            s.push_str(&piece.to_string().to_uppercase());
                        } else {
                            s.push_str(&piece.to_string());
                        }
                        s.push_str(" ");
                    }
                }
            }
            s.push_str("\n");
        }
        s.push_str("   a  b  c  d  e  f  g  h\n");
        s.push_str(if self.side_to_move() == Color::White {
            "White to move\n"
        } else {
            "Black to move\n"
        });
        write!(f, "{}", s)
    }
}
