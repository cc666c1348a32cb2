// SPDX-License-Identifier: MIT OR Apache-2.0

use sente_core::{GameError, GoGame, IllegalMoveReason, Move, Rules, Stone, Vertex};

fn b(x: u8, y: u8) -> Move {
    Move::place(x, y, Stone::Black)
}

fn w(x: u8, y: u8) -> Move {
    Move::place(x, y, Stone::White)
}

fn reason(result: Result<(), GameError>) -> Option<IllegalMoveReason> {
    match result {
        Err(GameError::IllegalMove { reason, .. }) => Some(reason),
        _ => None,
    }
}

#[test]
fn ko_cannot_be_retaken_immediately() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

    // Black diamond around (1,1) on the left, white diamond around (2,1) on the right
    game.play_move_sequence(&[
        b(1, 0),
        w(2, 0),
        b(0, 1),
        w(3, 1),
        b(1, 2),
        w(2, 2),
        b(8, 8),
        w(1, 1),
    ])
    .unwrap();

    // Black takes the white stone at (1,1)
    game.play_stone(b(2, 1)).unwrap();
    assert_eq!(game.get_space(1, 1), Some(Stone::Empty));
    assert_eq!(game.captures_at(game.move_number()), &[w(1, 1)]);

    let result = game.play_stone(w(1, 1));
    assert_eq!(reason(result), Some(IllegalMoveReason::KoPoint));
    assert!(!game.is_legal(w(1, 1)));
    assert!(!game.is_gtp_legal(w(1, 1)));

    // A ko threat elsewhere lifts the ban
    game.play_stone(w(8, 0)).unwrap();
    game.play_stone(b(7, 7)).unwrap();
    game.play_stone(w(1, 1)).unwrap();
    assert_eq!(game.get_space(2, 1), Some(Stone::Empty));
    assert_eq!(game.ko_point(), Some(Vertex::new(2, 1)));
    assert_eq!(reason(game.play_stone(b(2, 1))), Some(IllegalMoveReason::KoPoint));
}

#[test]
fn pass_clears_ko() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.play_move_sequence(&[
        b(1, 0),
        w(2, 0),
        b(0, 1),
        w(3, 1),
        b(1, 2),
        w(2, 2),
        b(8, 8),
        w(1, 1),
        b(2, 1),
    ])
    .unwrap();

    assert_eq!(game.ko_point(), Some(Vertex::new(1, 1)));

    game.play_stone(Move::Pass(Stone::White)).unwrap();
    assert_eq!(game.ko_point(), None);
    game.play_stone(b(7, 7)).unwrap();
    assert!(game.is_legal(w(1, 1)));
}

#[test]
fn self_capture_is_rejected() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

    // White stones surround the empty corner point (0,0)
    game.add_stones(&[w(1, 0), w(0, 1)]).unwrap();
    game.set_active_player(Stone::Black).unwrap();

    let result = game.play_stone(b(0, 0));
    assert_eq!(reason(result), Some(IllegalMoveReason::SelfCapture));
    assert!(!game.is_legal(b(0, 0)));
    assert!(game.is_gtp_legal(w(0, 0)));
    assert_eq!(game.get_space(0, 0), Some(Stone::Empty));
}

#[test]
fn capturing_is_not_self_capture() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

    // White at (0,0) in atari; black takes its last liberty
    game.add_stones(&[w(0, 0), b(2, 0), w(1, 1), b(0, 2)]).unwrap();
    game.add_stones(&[b(0, 1)]).unwrap();
    game.set_active_player(Stone::Black).unwrap();

    assert!(game.is_legal(b(1, 0)));
    game.play_stone(b(1, 0)).unwrap();
    assert_eq!(game.get_space(0, 0), Some(Stone::Empty));
    assert_eq!(game.prisoners(Stone::White), 1);
}

#[test]
fn tromp_taylor_allows_self_capture() {
    let mut game = GoGame::new(9, Rules::TrompTaylor, None, &[]).unwrap();
    game.add_stones(&[w(1, 0), w(0, 1)]).unwrap();
    game.set_active_player(Stone::Black).unwrap();

    assert!(game.is_legal(b(0, 0)));
    game.play_stone(b(0, 0)).unwrap();

    // The stone is removed straight away and logged as a capture of its own color
    assert_eq!(game.get_space(0, 0), Some(Stone::Empty));
    assert_eq!(game.captures_at(game.move_number()), &[b(0, 0)]);
    assert_eq!(game.active_player(), Stone::White);
}

#[test]
fn setup_stones_may_not_self_capture() {
    let mut game = GoGame::new(9, Rules::TrompTaylor, None, &[]).unwrap();
    game.add_stones(&[w(1, 0), w(0, 1)]).unwrap();

    assert!(!game.is_add_legal(b(0, 0)));
    let before = game.move_number();
    assert!(game.add_stones(&[b(5, 5), b(0, 0)]).is_err());

    // Nothing from the rejected batch is kept
    assert_eq!(game.move_number(), before);
    assert_eq!(game.get_space(5, 5), Some(Stone::Empty));
}

#[test]
fn turn_order_and_occupied_points() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

    assert_eq!(reason(game.play_stone(w(4, 4))), Some(IllegalMoveReason::WrongColor));
    assert_eq!(
        reason(game.play_stone(Move::Pass(Stone::White))),
        Some(IllegalMoveReason::WrongColor)
    );
    assert!(game.is_gtp_legal(w(4, 4)));

    game.play_stone(b(4, 4)).unwrap();
    assert_eq!(reason(game.play_stone(w(4, 4))), Some(IllegalMoveReason::OccupiedPoint));
    assert_eq!(reason(game.play_stone(w(9, 4))), Some(IllegalMoveReason::OffBoard));
    assert_eq!(game.move_number(), 1);
}

#[test]
fn off_board_is_reported_before_color() {
    let game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    assert!(!game.is_legal(w(12, 0)));
    assert!(!game.is_add_legal(w(12, 0)));
    assert_eq!(game.get_space(12, 0), None);
}

#[test]
fn legal_moves_cover_the_empty_board() {
    let game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    let moves = game.legal_moves();

    assert_eq!(moves.len(), 81 + 2);
    assert!(moves.contains(&Move::Pass(Stone::Black)));
    assert!(moves.contains(&Move::Resign(Stone::Black)));
    assert!(moves.iter().all(|mv| mv.stone() == Stone::Black));
}

#[test]
fn setup_clears_ko() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.play_move_sequence(&[
        b(1, 0),
        w(2, 0),
        b(0, 1),
        w(3, 1),
        b(1, 2),
        w(2, 2),
        b(8, 8),
        w(1, 1),
        b(2, 1),
    ])
    .unwrap();
    assert_eq!(game.ko_point(), Some(Vertex::new(1, 1)));

    // Only clears a point, so white stays to move
    game.add_stones(&[Move::place(8, 8, Stone::Empty)]).unwrap();
    assert_eq!(game.active_player(), Stone::White);
    assert_eq!(game.ko_point(), None);
    assert!(game.is_legal(w(1, 1)));

    game.step_up(1).unwrap();
    assert_eq!(game.ko_point(), Some(Vertex::new(1, 1)));
}

#[test]
fn either_player_may_resign() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    assert!(game.is_legal(Move::Resign(Stone::Black)));
    assert!(game.is_legal(Move::Resign(Stone::White)));
    assert!(!game.is_legal(Move::Pass(Stone::White)));

    game.play_stone(Move::Resign(Stone::White)).unwrap();
    assert!(!game.is_legal(Move::Resign(Stone::Black)));
    assert!(!game.is_legal(Move::Resign(Stone::White)));
}
