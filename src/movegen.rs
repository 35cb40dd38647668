use crate::attacks;
use crate::chess_move::{Move, MoveKind};
use crate::color::Color;
use crate::file::File;
use crate::geometry::{Direction, BISHOP_DIRECTIONS, KING_DIRECTIONS, KNIGHT_JUMPS, ROOK_DIRECTIONS};
use crate::piece::Piece;
use crate::position::Position;
use crate::square::Square;
use arrayvec::ArrayVec;

/// The most moves one piece can ever have from one square.  A centralized
/// queen on an open board manages 27.
pub const MAX_MOVES_PER_PIECE: usize = 28;

/// One origin square's worth of moves.
pub type MoveList = ArrayVec<Move, MAX_MOVES_PER_PIECE>;

/// Every geometrically possible move for the piece standing on `source`,
/// with king safety ignored.  Castle candidates are included whenever the
/// rights are held and the squares between king and rook are empty; whether
/// the king is allowed to make the trip is the caller's filtering problem.
/// The one exception is en passant, which arrives here already vetted
/// against uncovering its own king, because no later filter can see that.
pub fn pseudo_legal_moves(
    position: &Position,
    source: Square,
    piece: Piece,
    color: Color,
) -> MoveList {
    let mut moves = MoveList::new();
    match piece {
        Piece::Rook => sliding_moves(position, source, color, &ROOK_DIRECTIONS, &mut moves),
        Piece::Bishop => sliding_moves(position, source, color, &BISHOP_DIRECTIONS, &mut moves),
        Piece::Queen => sliding_moves(position, source, color, &KING_DIRECTIONS, &mut moves),
        Piece::Knight => step_moves(position, source, color, &KNIGHT_JUMPS, &mut moves),
        Piece::Pawn => pawn_moves(position, source, color, &mut moves),
        Piece::King => king_moves(position, source, color, &mut moves),
    }
    moves
}

/// Walk each direction one square at a time: empty squares are quiet moves,
/// the first enemy piece is a capture and the end of the ray, a friendly
/// piece just ends the ray.
fn sliding_moves(
    position: &Position,
    source: Square,
    color: Color,
    directions: &[Direction],
    moves: &mut MoveList,
) {
    for dir in directions.iter() {
        let mut cur = source.translate(dir.df, dir.dr);
        while let Some(dest) = cur {
            match position.color_on(dest) {
                None => {
                    moves.push(Move::new(source, dest, MoveKind::Quiet));
                    cur = dest.translate(dir.df, dir.dr);
                }
                Some(c) if c != color => {
                    moves.push(Move::new(source, dest, MoveKind::Capture));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}

/// Knights and the king's plain steps: one hop, quiet or capture.
fn step_moves(
    position: &Position,
    source: Square,
    color: Color,
    steps: &[Direction],
    moves: &mut MoveList,
) {
    for step in steps.iter() {
        if let Some(dest) = source.translate(step.df, step.dr) {
            match position.color_on(dest) {
                None => moves.push(Move::new(source, dest, MoveKind::Quiet)),
                Some(c) if c != color => moves.push(Move::new(source, dest, MoveKind::Capture)),
                Some(_) => {}
            }
        }
    }
}

fn pawn_moves(position: &Position, source: Square, color: Color, moves: &mut MoveList) {
    let promotion_rank = color.to_their_backrank();

    if let Some(one) = source.forward(color) {
        if position.piece_on(one).is_none() {
            if one.get_rank() == promotion_rank {
                moves.push(Move::new(source, one, MoveKind::Promotion));
            } else {
                moves.push(Move::new(source, one, MoveKind::Quiet));
            }
            // the double push, from the starting rank only, never a promotion
            if source.get_rank() == color.to_second_rank() {
                if let Some(two) = one.forward(color) {
                    if position.piece_on(two).is_none() {
                        moves.push(Move::new(source, two, MoveKind::DoublePush));
                    }
                }
            }
        }
    }

    for &df in [-1i8, 1].iter() {
        if let Some(dest) = source.translate(df, color.forward()) {
            match position.color_on(dest) {
                Some(c) if c != color => {
                    let kind = if dest.get_rank() == promotion_rank {
                        MoveKind::Promotion
                    } else {
                        MoveKind::Capture
                    };
                    moves.push(Move::new(source, dest, kind));
                }
                _ => {}
            }

            // en passant: the file must be open this ply, we must stand on
            // the rank the enemy's double push arrived at, and the capture
            // must not uncover our own king
            if position.en_passant_file() == Some(dest.get_file())
                && source.get_rank() == (!color).to_fourth_rank()
                && position.piece_on(dest).is_none()
                && victim_pawn_present(position, source, dest, color)
                && en_passant_is_safe(position, source, dest, color)
            {
                moves.push(Move::new(source, dest, MoveKind::EnPassant));
            }
        }
    }
}

/// The pawn an en-passant capture removes: same rank as the capturer, same
/// file as the destination.
pub(crate) fn victim_square(source: Square, dest: Square) -> Square {
    Square::make_square(source.get_rank(), dest.get_file())
}

fn victim_pawn_present(position: &Position, source: Square, dest: Square, color: Color) -> bool {
    position.piece_on(victim_square(source, dest)) == Some((Piece::Pawn, !color))
}

/// An en-passant capture takes two pawns off one rank and puts one pawn on
/// another, which can open a line no pin record covers.  The classic case is
/// king and both pawns on one rank with a rook waiting behind them.  Play it
/// out on a scratch copy and ask whether our king is attacked; the real
/// position is never touched.
fn en_passant_is_safe(position: &Position, source: Square, dest: Square, color: Color) -> bool {
    let mut scratch = *position.cells();
    scratch[dest.to_index()] = scratch[source.to_index()].take();
    scratch[victim_square(source, dest).to_index()] = None;
    !attacks::square_attacked(&scratch, position.king_square(color), !color)
}

/// The king's plain steps, plus a castle candidate per wing where the rights
/// survive and the squares between king and rook are all empty.  Nothing
/// here asks whether any of those squares are attacked.
fn king_moves(position: &Position, source: Square, color: Color, moves: &mut MoveList) {
    step_moves(position, source, color, &KING_DIRECTIONS, moves);

    let backrank = color.to_my_backrank();
    let rights = position.castle_rights(color);
    let empty =
        |file: File| position.piece_on(Square::make_square(backrank, file)).is_none();

    if rights.has_kingside() && empty(File::F) && empty(File::G) {
        moves.push(Move::new(
            source,
            Square::make_square(backrank, File::G),
            MoveKind::CastleKingSide,
        ));
    }
    if rights.has_queenside() && empty(File::D) && empty(File::C) && empty(File::B) {
        moves.push(Move::new(
            source,
            Square::make_square(backrank, File::C),
            MoveKind::CastleQueenSide,
        ));
    }
}
