//! Node-count checks against the published perft tables.  Each position is
//! built square by square; mirrored twins double as a color-symmetry check.

use dropchess::{
    CastleRights, Color, File, Game, Piece, Position, PositionBuilder, Square,
};
use std::convert::TryFrom;

fn game(
    pieces: &[(Square, Piece, Color)],
    side_to_move: Color,
    white_rights: CastleRights,
    black_rights: CastleRights,
    en_passant: Option<File>,
) -> Game {
    let position = Position::try_from(&PositionBuilder::setup(
        pieces,
        side_to_move,
        white_rights,
        black_rights,
        en_passant,
    ))
    .expect("test position should be valid");
    Game::new_with_position(position)
}

#[test]
fn initial_position_depth_1() {
    assert_eq!(Game::new().perft(1), 20);
}

#[test]
fn initial_position_depth_2() {
    assert_eq!(Game::new().perft(2), 400);
}

#[test]
fn initial_position_depth_3() {
    assert_eq!(Game::new().perft(3), 8902);
}

#[test]
fn initial_position_depth_4() {
    assert_eq!(Game::new().perft(4), 197281);
}

#[test]
fn en_passant_pin_pair() {
    // the en-passant capture would clear the bishop's diagonal to the king;
    // counts only match if the engine refuses it
    let white_view = game(
        &[
            (Square::B3, Piece::King, Color::White),
            (Square::C5, Piece::Pawn, Color::White),
            (Square::D5, Piece::Pawn, Color::Black),
            (Square::F7, Piece::Bishop, Color::Black),
            (Square::G7, Piece::King, Color::Black),
        ],
        Color::White,
        CastleRights::NoRights,
        CastleRights::NoRights,
        Some(File::D),
    );
    let black_view = game(
        &[
            (Square::B6, Piece::King, Color::Black),
            (Square::C4, Piece::Pawn, Color::Black),
            (Square::D4, Piece::Pawn, Color::White),
            (Square::F2, Piece::Bishop, Color::White),
            (Square::G2, Piece::King, Color::White),
        ],
        Color::Black,
        CastleRights::NoRights,
        CastleRights::NoRights,
        Some(File::D),
    );

    let white_nodes = white_view.perft(6);
    let black_nodes = black_view.perft(6);
    assert_eq!(white_nodes, black_nodes);
    assert_eq!(white_nodes, 824064);
}

#[test]
fn en_passant_discovered_check_pair() {
    let black_view = game(
        &[
            (Square::B6, Piece::King, Color::Black),
            (Square::C5, Piece::Bishop, Color::Black),
            (Square::C4, Piece::Pawn, Color::Black),
            (Square::D4, Piece::Pawn, Color::White),
            (Square::F2, Piece::King, Color::White),
        ],
        Color::Black,
        CastleRights::NoRights,
        CastleRights::NoRights,
        Some(File::D),
    );
    let white_view = game(
        &[
            (Square::B3, Piece::King, Color::White),
            (Square::C4, Piece::Bishop, Color::White),
            (Square::C5, Piece::Pawn, Color::White),
            (Square::D5, Piece::Pawn, Color::Black),
            (Square::F7, Piece::King, Color::Black),
        ],
        Color::White,
        CastleRights::NoRights,
        CastleRights::NoRights,
        Some(File::D),
    );

    let black_nodes = black_view.perft(6);
    let white_nodes = white_view.perft(6);
    assert_eq!(black_nodes, white_nodes);
    assert_eq!(black_nodes, 1440467);
}

#[test]
fn kingside_castle_pair() {
    let white_view = game(
        &[
            (Square::E1, Piece::King, Color::White),
            (Square::H1, Piece::Rook, Color::White),
            (Square::F8, Piece::King, Color::Black),
        ],
        Color::White,
        CastleRights::KingSide,
        CastleRights::NoRights,
        None,
    );
    let black_view = game(
        &[
            (Square::E8, Piece::King, Color::Black),
            (Square::H8, Piece::Rook, Color::Black),
            (Square::F1, Piece::King, Color::White),
        ],
        Color::Black,
        CastleRights::NoRights,
        CastleRights::KingSide,
        None,
    );

    // quick sanity before the deep count: five king steps, nine rook moves,
    // and the castle itself
    assert_eq!(white_view.perft(1), 15);

    let white_nodes = white_view.perft(6);
    let black_nodes = black_view.perft(6);
    assert_eq!(white_nodes, black_nodes);
    assert_eq!(white_nodes, 661072);
}

#[test]
fn promotion_race_pair() {
    // a pawn one step from queening against a rook that can take it
    let white_view = game(
        &[
            (Square::C8, Piece::King, Color::White),
            (Square::E7, Piece::Pawn, Color::White),
            (Square::F8, Piece::Rook, Color::Black),
            (Square::D1, Piece::King, Color::Black),
        ],
        Color::White,
        CastleRights::NoRights,
        CastleRights::NoRights,
        None,
    );
    let black_view = game(
        &[
            (Square::C1, Piece::King, Color::Black),
            (Square::E2, Piece::Pawn, Color::Black),
            (Square::F1, Piece::Rook, Color::White),
            (Square::D8, Piece::King, Color::White),
        ],
        Color::Black,
        CastleRights::NoRights,
        CastleRights::NoRights,
        None,
    );

    let white_nodes = white_view.perft(6);
    let black_nodes = black_view.perft(6);
    assert_eq!(white_nodes, black_nodes);
    assert_eq!(white_nodes, 3821001);
}
