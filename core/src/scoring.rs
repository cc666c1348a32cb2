// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final scoring and game results

use crate::{board::Board, group::GroupArena, liberties, GroupId, Move, Rules, Stone, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Outcome of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    pub rules: Rules,
    pub komi: f64,
    /// Empty points owned by black, minus black prisoners under territory rules
    pub black_territory: i64,
    pub white_territory: i64,
    /// Stones on the board, counted under area rules only
    pub black_stones: u32,
    pub white_stones: u32,
    /// Player who resigned, if the game ended that way
    pub resigned: Option<Stone>,
}

impl Results {
    /// Result of a game ended by resignation
    pub fn resignation(rules: Rules, komi: f64, player: Stone) -> Self {
        Self {
            rules,
            komi,
            black_territory: 0,
            white_territory: 0,
            black_stones: 0,
            white_stones: 0,
            resigned: Some(player),
        }
    }

    pub fn black_score(&self) -> f64 {
        (self.black_territory + i64::from(self.black_stones)) as f64
    }

    /// White's score including komi
    pub fn white_score(&self) -> f64 {
        (self.white_territory + i64::from(self.white_stones)) as f64 + self.komi
    }

    /// Black wins only with a strictly higher score
    pub fn winner(&self) -> Stone {
        match self.resigned {
            Some(player) => player.opponent(),
            None if self.black_score() > self.white_score() => Stone::Black,
            None => Stone::White,
        }
    }

    /// Absolute score difference
    pub fn margin(&self) -> f64 {
        (self.black_score() - self.white_score()).abs()
    }
}

impl fmt::Display for Results {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resigned {
            Some(_) => write!(f, "{}+R", self.winner().letter()),
            None => write!(f, "{}+{:.1}", self.winner().letter(), self.margin()),
        }
    }
}

/// Score the position on the board
///
/// Every empty region bordered by groups of a single color is that color's
/// territory. Area rules add the stones on the board; territory rules take
/// away each color's captured stones.
pub fn score_position(
    board: &Board,
    groups: &GroupArena,
    group_map: &HashMap<Vertex, GroupId>,
    captured: &BTreeMap<usize, Vec<Move>>,
    rules: Rules,
    komi: f64,
) -> Results {
    let mut territory_b = 0i64;
    let mut territory_w = 0i64;

    for region in liberties::get_empty_spaces(board) {
        let borders = liberties::get_adjacent_groups(&region, board, group_map);
        let mut colors = borders
            .iter()
            .filter_map(|&id| groups.get(id))
            .map(|group| group.color());

        let Some(first) = colors.next() else {
            continue;
        };
        if !colors.all(|c| c == first) {
            continue;
        }

        match first {
            Stone::Black => territory_b += region.len() as i64,
            Stone::White => territory_w += region.len() as i64,
            Stone::Empty => {}
        }
    }

    let (mut stones_b, mut stones_w) = (0u32, 0u32);
    if rules.uses_area_scoring() {
        stones_b = board.count(Stone::Black) as u32;
        stones_w = board.count(Stone::White) as u32;
    } else {
        for stone in captured.values().flatten() {
            match stone.stone() {
                Stone::Black => territory_b -= 1,
                Stone::White => territory_w -= 1,
                Stone::Empty => {}
            }
        }
    }

    Results {
        rules,
        komi,
        black_territory: territory_b,
        white_territory: territory_w,
        black_stones: stones_b,
        white_stones: stones_w,
        resigned: None,
    }
}
