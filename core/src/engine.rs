// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move generation extension point
//!
//! The engine ships no AI. Callers that want the engine to "generate a
//! move" plug in a [`MoveGenerator`] and hand it to [`GoGame::gen_move`].

use crate::{GoGame, Move, Stone};

/// Something that can choose a move for a player
pub trait MoveGenerator {
    /// Pick the next move for `color` in the given position
    fn generate(&mut self, game: &GoGame, color: Stone) -> Move;
}

impl<F> MoveGenerator for F
where
    F: FnMut(&GoGame, Stone) -> Move,
{
    fn generate(&mut self, game: &GoGame, color: Stone) -> Move {
        self(game, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rules;

    struct PassingPlayer;

    impl MoveGenerator for PassingPlayer {
        fn generate(&mut self, _game: &GoGame, color: Stone) -> Move {
            Move::Pass(color)
        }
    }

    #[test]
    fn generator_moves_are_played() {
        let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();

        let first = game.gen_move(&mut PassingPlayer).unwrap();
        assert_eq!(first, Move::Pass(Stone::Black));
        assert_eq!(game.active_player(), Stone::White);

        let mut corner = |_: &GoGame, color: Stone| Move::place(0, 0, color);
        let second = game.gen_move(&mut corner).unwrap();
        assert_eq!(second, Move::place(0, 0, Stone::White));
        assert_eq!(game.get_space(0, 0), Some(Stone::White));
    }

    #[test]
    fn illegal_generated_moves_are_rejected() {
        let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
        let mut off_board = |_: &GoGame, color: Stone| Move::place(20, 20, color);
        assert!(game.gen_move(&mut off_board).is_err());
        assert_eq!(game.move_number(), 0);
    }
}
