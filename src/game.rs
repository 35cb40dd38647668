use crate::attacks::AttackMap;
use crate::checks::CheckState;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::file::File;
use crate::movegen::{self, MoveList};
use crate::piece::{Piece, PROMOTION_PIECES};
use crate::pins::{self, PinRecord};
use crate::position::Position;
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};
use std::array;

/// Is the game still on, or has the side to move run out of moves?
/// Running out is a state to report, never an error.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// The per-ply table of legal moves, indexed by origin square.  Rebuilt
/// wholesale on every turn advance; results queried from it must not be
/// carried across one.
#[derive(Clone)]
pub struct LegalMoves {
    by_square: [MoveList; NUM_SQUARES],
}

impl LegalMoves {
    fn new() -> LegalMoves {
        LegalMoves {
            by_square: array::from_fn(|_| MoveList::new()),
        }
    }

    /// The legal moves from one square.  Empty when the square is empty,
    /// enemy-owned, or the piece there has nowhere to go.
    #[inline]
    pub fn moves_from(&self, square: Square) -> &[Move] {
        &self.by_square[square.to_index()]
    }

    /// Does the side to move have no move at all?
    pub fn is_empty(&self) -> bool {
        self.by_square.iter().all(|list| list.is_empty())
    }

    /// How many legal moves in total?
    pub fn count(&self) -> usize {
        self.by_square.iter().map(|list| list.len()).sum()
    }

    /// Every move in the table, origin squares in board order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = Move> + 'a {
        self.by_square.iter().flat_map(|list| list.iter().copied())
    }
}

/// The turn orchestrator: owns the `Position` between plies, runs the
/// turn-advance protocol after every committed move, and answers legality
/// queries out of the freshly built table.
///
/// A driver can speak to it at two levels.  The square-by-square surface
/// (`commit_move`, `remove_piece`, `promote`, `set_en_passant_file`, then
/// `next_turn`) matches what a drag-and-drop GUI does as sprites move.
/// `make_move` performs that whole sequence for one table move, which is
/// also what `perft` and the tests drive.
///
/// ```
/// use dropchess::{Game, GameStatus, Square};
///
/// let game = Game::new();
///
/// // twenty openings, two of them from the king's pawn
/// assert_eq!(game.legal_move_table().count(), 20);
/// assert_eq!(game.legal_moves(Square::E2).len(), 2);
///
/// // asking about an empty or enemy square is not an error, just empty
/// assert!(game.legal_moves(Square::E4).is_empty());
/// assert!(game.legal_moves(Square::E7).is_empty());
///
/// assert_eq!(game.status(), GameStatus::Ongoing);
/// ```
#[derive(Clone)]
pub struct Game {
    position: Position,
    attack_map: AttackMap,
    check: CheckState,
    pins: Vec<PinRecord>,
    moves: LegalMoves,
    status: GameStatus,
    pending_en_passant: Option<File>,
}

impl Game {
    /// A fresh game from the standard starting position.
    pub fn new() -> Game {
        Game::new_with_position(Position::initial())
    }

    /// Start from any validated position, fully analyzed and ready to query.
    pub fn new_with_position(mut position: Position) -> Game {
        position.relocate_kings();
        let mover = position.side_to_move();
        let attack_map = AttackMap::build(&position, !mover);
        let check = CheckState::resolve(&attack_map, position.king_square(mover));
        let pins = pins::find_pins(&position, mover);
        let mut game = Game {
            position,
            attack_map,
            check,
            pins,
            moves: LegalMoves::new(),
            status: GameStatus::Ongoing,
            pending_en_passant: None,
        };
        game.rebuild_legal_moves();
        game
    }

    /// The position as it stands.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Whose turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// The legal moves from one square in the current table.
    #[inline]
    pub fn legal_moves(&self, square: Square) -> &[Move] {
        self.moves.moves_from(square)
    }

    /// The whole current table.
    #[inline]
    pub fn legal_move_table(&self) -> &LegalMoves {
        &self.moves
    }

    /// Ongoing, checkmate or stalemate, as of the last turn advance.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        self.check.in_check
    }

    /// The full check classification for the side to move.
    #[inline]
    pub fn check_state(&self) -> &CheckState {
        &self.check
    }

    /// The pins currently binding the side to move.
    #[inline]
    pub fn pins(&self) -> &[PinRecord] {
        &self.pins
    }

    /// Everything the enemy attacks right now.
    #[inline]
    pub fn attack_map(&self) -> &AttackMap {
        &self.attack_map
    }

    /// Relocate a piece, exactly as dropped.  Part of the square-by-square
    /// driver surface; call `next_turn` once the whole move is in place.
    pub fn commit_move(&mut self, from: Square, to: Square) {
        self.position.commit_move(from, to);
    }

    /// Clear one square: ordinary captures before the capturer lands, and
    /// the en-passant victim nobody landed on.
    pub fn remove_piece(&mut self, square: Square) {
        self.position.remove_piece(square);
    }

    /// Swap the pawn that ran from `vacated` for the piece the player chose.
    pub fn promote(&mut self, square: Square, piece: Piece, vacated: Square) {
        self.position.promote(square, piece, vacated);
    }

    /// Called by the driver right after committing a double push.  The file
    /// holds for exactly the following ply, then expires on its own.
    pub fn set_en_passant_file(&mut self, file: File) {
        self.pending_en_passant = Some(file);
    }

    /// Advance to the next ply.  Every committed move must be followed by
    /// this, and the steps run in a fixed order: castle rights from the
    /// occupancy, the side flip, the en-passant window, the king caches, the
    /// enemy attack map, the check state, the pins, and the fresh legal-move
    /// table.  Skipping or reordering any of it leaves stale legality data
    /// behind.
    pub fn next_turn(&mut self) {
        self.position.refresh_castle_rights();
        self.position.flip_side_to_move();
        self.position.set_en_passant(self.pending_en_passant.take());
        self.position.relocate_kings();

        let mover = self.position.side_to_move();
        self.attack_map = AttackMap::build(&self.position, !mover);
        self.check = CheckState::resolve(&self.attack_map, self.position.king_square(mover));
        self.pins = pins::find_pins(&self.position, mover);
        self.rebuild_legal_moves();
    }

    /// Apply one move out of the current table, end to end: the bookkeeping
    /// its kind demands, then the turn advance.  `promotion` names the
    /// replacement piece and is only read for `MoveKind::Promotion`.
    pub fn make_move(&mut self, mv: Move, promotion: Option<Piece>) {
        debug_assert!(
            self.legal_moves(mv.get_source()).contains(&mv),
            "make_move with a move that is not in the table: {}",
            mv
        );

        let source = mv.get_source();
        let dest = mv.get_dest();
        let backrank = self.position.side_to_move().to_my_backrank();

        match mv.get_kind() {
            MoveKind::Quiet => {
                self.position.commit_move(source, dest);
            }
            MoveKind::Capture => {
                self.position.remove_piece(dest);
                self.position.commit_move(source, dest);
            }
            MoveKind::DoublePush => {
                self.position.commit_move(source, dest);
                self.set_en_passant_file(dest.get_file());
            }
            MoveKind::CastleKingSide => {
                // the rook hops first, then the king lands
                self.position.commit_move(
                    Square::make_square(backrank, File::H),
                    Square::make_square(backrank, File::F),
                );
                self.position.commit_move(source, dest);
            }
            MoveKind::CastleQueenSide => {
                self.position.commit_move(
                    Square::make_square(backrank, File::A),
                    Square::make_square(backrank, File::D),
                );
                self.position.commit_move(source, dest);
            }
            MoveKind::EnPassant => {
                self.position
                    .remove_piece(movegen::victim_square(source, dest));
                self.position.commit_move(source, dest);
            }
            MoveKind::Promotion => {
                let piece = promotion.expect("a promotion move needs the replacement piece");
                if self.position.piece_on(dest).is_some() {
                    self.position.remove_piece(dest);
                }
                self.position.promote(dest, piece, source);
            }
        }

        self.next_turn();
    }

    /// Rebuild the per-square table from the caches computed this ply: every
    /// piece's pseudo-legal moves, cut down by its pin path, by the check
    /// blocking set, and for the king by the enemy attack map.
    fn rebuild_legal_moves(&mut self) {
        let mover = self.position.side_to_move();
        let mut table = LegalMoves::new();

        for &source in ALL_SQUARES.iter() {
            let (piece, color) = match self.position.piece_on(source) {
                Some(cell) => cell,
                None => continue,
            };
            if color != mover {
                continue;
            }

            let mut moves = movegen::pseudo_legal_moves(&self.position, source, piece, mover);

            if piece == Piece::King {
                self.filter_king_moves(&mut moves);
            } else {
                if let Some(path) = pins::pin_path(&self.pins, source) {
                    moves.retain(|m| path.contains(m.get_dest()));
                }
                if self.check.double_check {
                    // only the king answers a double check
                    moves.clear();
                } else if self.check.in_check {
                    let blocking = self.check.blocking_squares;
                    moves.retain(|m| match m.get_kind() {
                        // capturing the checking pawn in passing lands
                        // *behind* it, so the victim square counts too
                        MoveKind::EnPassant => {
                            blocking.contains(m.get_dest())
                                || blocking
                                    .contains(movegen::victim_square(m.get_source(), m.get_dest()))
                        }
                        _ => blocking.contains(m.get_dest()),
                    });
                }
            }

            table.by_square[source.to_index()] = moves;
        }

        self.status = if table.is_empty() {
            if self.check.in_check {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else {
            GameStatus::Ongoing
        };
        self.moves = table;
    }

    /// Kings may not step onto an attacked square, and a castle dies if the
    /// king starts in check or crosses an attacked square.  The queenside
    /// b-square only needed to be empty, never safe.
    fn filter_king_moves(&self, moves: &mut MoveList) {
        let in_check = self.check.in_check;
        let backrank = self.position.side_to_move().to_my_backrank();
        let map = &self.attack_map;

        moves.retain(|m| match m.get_kind() {
            MoveKind::CastleKingSide => {
                !in_check
                    && !map.is_attacked(Square::make_square(backrank, File::F))
                    && !map.is_attacked(Square::make_square(backrank, File::G))
            }
            MoveKind::CastleQueenSide => {
                !in_check
                    && !map.is_attacked(Square::make_square(backrank, File::D))
                    && !map.is_attacked(Square::make_square(backrank, File::C))
            }
            _ => !map.is_attacked(m.get_dest()),
        });
    }

    /// Count the legal-move tree to the given depth.  Promotion table
    /// entries expand over the four replacement pieces, so the totals line
    /// up with the usual perft tables.
    pub fn perft(&self, depth: u64) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut nodes = 0;
        for mv in self.moves.iter() {
            match mv.get_kind() {
                MoveKind::Promotion => {
                    for &piece in PROMOTION_PIECES.iter() {
                        if depth == 1 {
                            nodes += 1;
                        } else {
                            let mut next = self.clone();
                            next.make_move(mv, Some(piece));
                            nodes += next.perft(depth - 1);
                        }
                    }
                }
                _ => {
                    if depth == 1 {
                        nodes += 1;
                    } else {
                        let mut next = self.clone();
                        next.make_move(mv, None);
                        nodes += next.perft(depth - 1);
                    }
                }
            }
        }
        nodes
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
