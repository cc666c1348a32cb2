// SPDX-License-Identifier: MIT OR Apache-2.0

use sente_core::node::keys;
use sente_core::{
    GameConfig, GameError, GameNode, GoGame, Move, Rules, StateError, Stone, Tree, Vertex,
};

fn b(x: u8, y: u8) -> Move {
    Move::place(x, y, Stone::Black)
}

fn w(x: u8, y: u8) -> Move {
    Move::place(x, y, Stone::White)
}

#[test]
fn only_standard_sizes_are_supported() {
    for side in [9, 13, 19] {
        let game = GoGame::new(side, Rules::Chinese, None, &[]).unwrap();
        assert_eq!(u32::from(game.side()), side);
    }
    assert_eq!(
        GoGame::new(15, Rules::Chinese, None, &[]).err(),
        Some(GameError::UnsupportedBoardSize(15))
    );
}

#[test]
fn new_game_root_metadata() {
    let game = GoGame::new(13, Rules::Korean, None, &[]).unwrap();
    let properties = game.get_properties();

    assert_eq!(properties["FF"], vec!["4"]);
    assert_eq!(properties["GM"], vec!["1"]);
    assert_eq!(properties["SZ"], vec!["13"]);
    assert_eq!(properties["RU"], vec!["Korean"]);
    assert_eq!(properties["KM"], vec!["6.5"]);
    assert!(!properties.contains_key("HA"));
    assert_eq!(game.komi(), 6.5);
    assert_eq!(game.active_player(), Stone::Black);
}

#[test]
fn corner_capture_is_logged_at_its_ply() {
    let mut game = GoGame::new(9, Rules::Chinese, Some(5.5), &[]).unwrap();

    // White in the corner, black takes both liberties
    game.play_move_sequence(&[b(1, 0), w(0, 0), b(4, 4), w(8, 8)])
        .unwrap();
    assert_eq!(game.group_at(Vertex::new(0, 0)).map(|g| g.len()), Some(1));

    game.play_stone(b(0, 1)).unwrap();
    assert_eq!(game.get_space(0, 0), Some(Stone::Empty));
    assert_eq!(game.captures_at(5), &[w(0, 0)]);
    assert!(game.captures_at(4).is_empty());
    assert_eq!(game.prisoners(Stone::White), 1);
    assert_eq!(game.prisoners(Stone::Black), 0);
    assert!(game.group_at(Vertex::new(0, 0)).is_none());

    // The emptied point is playable again
    game.play_stone(w(5, 5)).unwrap();
    assert!(game.is_legal(b(0, 0)));
    game.play_stone(b(0, 0)).unwrap();
    assert_eq!(game.get_space(0, 0), Some(Stone::Black));
}

#[test]
fn handicap_stones_by_setup() {
    let mut game = GoGame::new(19, Rules::Japanese, None, &[]).unwrap();
    game.add_stones(&[b(3, 15), b(15, 3)]).unwrap();

    assert_eq!(game.active_player(), Stone::White);
    assert_eq!(game.get_space(3, 15), Some(Stone::Black));
    assert_eq!(game.get_space(15, 3), Some(Stone::Black));
    assert_eq!(game.move_number(), 1);
    assert!(game.get_branches().is_empty());
    assert!(game.get_move_sequence().is_empty());
}

#[test]
fn handicap_stones_at_construction() {
    let handicap = [Vertex::new(3, 15), Vertex::new(15, 3)];
    let game = GoGame::new(19, Rules::Chinese, Some(0.5), &handicap).unwrap();

    assert!(game.is_at_root());
    assert_eq!(game.active_player(), Stone::White);
    assert_eq!(game.get_space(3, 15), Some(Stone::Black));
    assert_eq!(game.tree().root().first_value(keys::HA), Some("2"));
    assert_eq!(game.tree().root().added_stones().len(), 2);

    let config = GameConfig {
        board_size: 9,
        ..GameConfig::default()
    }
    .with_standard_handicap(3)
    .unwrap();
    let game = config.build().unwrap();
    assert_eq!(game.board().count(Stone::Black), 3);
    assert_eq!(game.active_player(), Stone::White);
}

#[test]
fn setup_replaces_and_clears_stones() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.add_stones(&[b(4, 4), b(4, 5)]).unwrap();

    // Same color is a no-op, opposite color replaces, empty removes
    game.add_stones(&[b(4, 4), w(4, 5)]).unwrap();
    assert_eq!(game.get_space(4, 4), Some(Stone::Black));
    assert_eq!(game.get_space(4, 5), Some(Stone::White));
    assert_eq!(game.group_at(Vertex::new(4, 4)).map(|g| g.len()), Some(1));

    game.add_stones(&[Move::place(4, 5, Stone::Empty)]).unwrap();
    assert_eq!(game.get_space(4, 5), Some(Stone::Empty));
    assert!(game.is_add_legal(w(4, 4)));
    assert!(!game.is_add_legal(Move::Pass(Stone::Black)));
}

#[test]
fn setup_can_capture() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.add_stones(&[w(0, 0), b(1, 0)]).unwrap();
    game.add_stones(&[b(0, 1)]).unwrap();

    assert_eq!(game.get_space(0, 0), Some(Stone::Empty));
    assert_eq!(game.captures_at(2), &[w(0, 0)]);
    assert_eq!(game.active_player(), Stone::White);
}

#[test]
fn properties_are_scoped() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.play_stone(b(4, 4)).unwrap();

    game.set_property("PB", "Honinbo Shusaku").unwrap();
    game.set_property("N", "tesuji").unwrap();

    assert_eq!(game.tree().root().first_value("PB"), Some("Honinbo Shusaku"));
    assert!(!game.tree().root().has_property("N"));
    assert_eq!(game.tree().get().first_value("N"), Some("tesuji"));

    let merged = game.get_properties();
    assert_eq!(merged["PB"], vec!["Honinbo Shusaku"]);
    assert_eq!(merged["N"], vec!["tesuji"]);
    assert_eq!(merged["SZ"], vec!["9"]);
}

#[test]
fn interpreted_properties() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

    game.set_property(keys::KM, "0.5").unwrap();
    assert_eq!(game.komi(), 0.5);
    game.set_property(keys::RU, "tromp-taylor").unwrap();
    assert_eq!(game.rules(), Rules::TrompTaylor);
    game.set_property(keys::PL, "W").unwrap();
    assert_eq!(game.active_player(), Stone::White);

    game.set_komi(3.0);
    assert_eq!(game.tree().root().first_value(keys::KM), Some("3"));

    assert_eq!(
        game.set_property(keys::SZ, "13"),
        Err(GameError::InvalidState(StateError::ImmutableProperty(
            "SZ".into()
        )))
    );
    assert!(matches!(
        game.set_property("AB", "dd"),
        Err(GameError::InvalidProperty { .. })
    ));
    assert!(matches!(
        game.set_property("comment", "x"),
        Err(GameError::InvalidProperty { .. })
    ));
    assert!(matches!(
        game.set_property(keys::KM, "lots"),
        Err(GameError::InvalidProperty { .. })
    ));
    assert!(matches!(
        game.set_property(keys::PL, "E"),
        Err(GameError::InvalidProperty { .. })
    ));
}

#[test]
fn active_player_override() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    game.play_stone(b(2, 2)).unwrap();
    game.set_active_player(Stone::Black).unwrap();
    game.play_stone(b(6, 6)).unwrap();
    assert_eq!(game.active_player(), Stone::White);

    assert_eq!(
        game.set_active_player(Stone::Empty),
        Err(GameError::InvalidState(StateError::EmptyActivePlayer))
    );

    // The override is recorded and honored on replay
    game.step_up(1).unwrap();
    assert_eq!(game.active_player(), Stone::Black);
}

#[test]
fn comments_live_on_nodes() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    assert_eq!(game.get_comment(), "");
    game.set_comment("game start");
    game.play_stone(b(4, 4)).unwrap();
    assert_eq!(game.get_comment(), "");
    game.set_comment("center");
    assert_eq!(game.get_comment(), "center");

    game.step_up(1).unwrap();
    assert_eq!(game.get_comment(), "game start");
}

#[test]
fn imported_root_metadata() {
    let mut root = GameNode::new();
    root.set_property(keys::SZ, vec!["9".into()]);
    root.set_property(keys::RU, vec!["Japanese".into()]);
    root.set_property(keys::KM, vec!["".into()]);
    root.set_property(keys::HA, vec!["2".into()]);
    root.add_stone(b(2, 6));
    root.add_stone(b(6, 2));

    let game = GoGame::from_history_tree(Tree::new(root)).unwrap();
    assert_eq!(game.side(), 9);
    assert_eq!(game.rules(), Rules::Japanese);
    assert_eq!(game.komi(), 0.0);
    assert_eq!(game.active_player(), Stone::White);
    assert_eq!(game.get_space(2, 6), Some(Stone::Black));

    let mut odd = GameNode::new();
    odd.set_property(keys::SZ, vec!["11".into()]);
    assert_eq!(
        GoGame::from_history_tree(Tree::new(odd)).err(),
        Some(GameError::UnsupportedBoardSize(11))
    );

    let mut defaults = GameNode::new();
    defaults.set_property(keys::RU, vec!["AGA".into()]);
    let game = GoGame::from_history_tree(Tree::new(defaults)).unwrap();
    assert_eq!(game.side(), 19);
    assert_eq!(game.rules(), Rules::Other);
    assert_eq!(game.komi(), 7.5);
}

#[test]
fn generated_moves_go_through_validation() {
    let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
    let mut first_legal = |game: &GoGame, _: Stone| game.legal_moves()[0];

    for _ in 0..4 {
        game.gen_move(&mut first_legal).unwrap();
    }
    assert_eq!(game.move_number(), 4);
    assert_eq!(game.board().count(Stone::Black), 2);
    assert_eq!(game.board().count(Stone::White), 2);
}
