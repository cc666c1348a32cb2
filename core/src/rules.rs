// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rulesets and move validation

use crate::{
    board::Board, group::{Group, GroupArena}, liberties, GroupId, IllegalMoveReason, Move, Stone,
    Vertex,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Ruleset used for suicide handling and scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rules {
    /// Area counting, 7.5 komi
    #[default]
    Chinese,
    /// Territory counting, 6.5 komi
    Japanese,
    /// Territory counting, 6.5 komi
    Korean,
    /// Area counting, self-capture allowed, 7.5 komi
    TrompTaylor,
    /// Any other ruleset named in a record; scored like Chinese
    Other,
}

impl Rules {
    /// Komi used when none is given
    pub fn default_komi(self) -> f64 {
        match self {
            Rules::Japanese | Rules::Korean => 6.5,
            Rules::Chinese | Rules::TrompTaylor | Rules::Other => 7.5,
        }
    }

    /// Whether stones on the board count toward the score
    pub fn uses_area_scoring(self) -> bool {
        !matches!(self, Rules::Japanese | Rules::Korean)
    }

    /// Whether a move may capture its own group
    pub fn allows_self_capture(self) -> bool {
        self == Rules::TrompTaylor
    }

    /// Ruleset named by a record's rules string; unknown names map to [`Rules::Other`]
    pub fn from_name(text: &str) -> Self {
        let normalized = text.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "chinese" => Rules::Chinese,
            "japanese" => Rules::Japanese,
            "korean" | "korea" => Rules::Korean,
            "tromp-taylor" | "trump-taylor" => Rules::TrompTaylor,
            _ => Rules::Other,
        }
    }
}

impl FromStr for Rules {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Rules::from_name(text))
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rules::Chinese => "Chinese",
            Rules::Japanese => "Japanese",
            Rules::Korean => "Korean",
            Rules::TrompTaylor => "Tromp-Taylor",
            Rules::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Groups bordering a point, split by color relative to the mover
#[derive(Debug, Default)]
pub(crate) struct Adjacency {
    pub ours: Vec<GroupId>,
    pub theirs: Vec<GroupId>,
}

/// Collect the distinct groups next to `vertex`
pub(crate) fn adjacent_groups(
    board: &Board,
    group_map: &HashMap<Vertex, GroupId>,
    vertex: Vertex,
    stone: Stone,
) -> Adjacency {
    let mut adjacency = Adjacency::default();

    for neighbor in board.neighbors(vertex) {
        let Some(&id) = group_map.get(&neighbor) else {
            continue;
        };
        let color = board.get(neighbor);
        let bucket = if color == stone {
            &mut adjacency.ours
        } else if color == stone.opponent() {
            &mut adjacency.theirs
        } else {
            continue;
        };
        if !bucket.contains(&id) {
            bucket.push(id);
        }
    }

    adjacency
}

/// Validates moves against one position
pub struct RuleValidator<'a> {
    /// The board being checked
    board: &'a Board,
    /// Live groups
    groups: &'a GroupArena,
    /// Occupied point to owning group
    group_map: &'a HashMap<Vertex, GroupId>,
    /// Stone whose immediate recapture is forbidden
    ko_point: Option<Move>,
    rules: Rules,
}

impl<'a> RuleValidator<'a> {
    /// Create a new rules validator
    pub fn new(
        board: &'a Board,
        groups: &'a GroupArena,
        group_map: &'a HashMap<Vertex, GroupId>,
        ko_point: Option<Move>,
        rules: Rules,
    ) -> Self {
        Self {
            board,
            groups,
            group_map,
            ko_point,
            rules,
        }
    }

    /// Check a stone placement
    ///
    /// With `to_play` set, the move must also be that color's. Failures are
    /// reported in the order off-board, occupied, wrong color, self-capture,
    /// ko.
    pub fn check_move(&self, mv: Move, to_play: Option<Stone>) -> Result<(), IllegalMoveReason> {
        let Move::Place { vertex, stone } = mv else {
            return Err(IllegalMoveReason::OffBoard);
        };

        if !self.board.contains(vertex) {
            return Err(IllegalMoveReason::OffBoard);
        }

        if !self.board.is_empty(vertex) {
            return Err(IllegalMoveReason::OccupiedPoint);
        }

        if stone.is_empty() || to_play.is_some_and(|color| color != stone) {
            return Err(IllegalMoveReason::WrongColor);
        }

        if !self.rules.allows_self_capture() && !self.is_not_self_capture(vertex, stone) {
            return Err(IllegalMoveReason::SelfCapture);
        }

        if self.ko_point == Some(mv) {
            return Err(IllegalMoveReason::KoPoint);
        }

        Ok(())
    }

    /// Check a setup stone: on the board and, unless it empties the point,
    /// not a self-capture. Turn order and ko are ignored.
    pub fn check_add(&self, mv: Move) -> Result<(), IllegalMoveReason> {
        let Move::Place { vertex, stone } = mv else {
            return Err(IllegalMoveReason::OffBoard);
        };

        if !self.board.contains(vertex) {
            return Err(IllegalMoveReason::OffBoard);
        }

        if stone.is_empty() {
            return Ok(());
        }

        if !self.is_not_self_capture(vertex, stone) {
            return Err(IllegalMoveReason::SelfCapture);
        }

        Ok(())
    }

    /// Whether a stone at an empty `vertex` keeps at least one liberty
    ///
    /// Capturing an adjacent group in atari always succeeds; otherwise the
    /// stone merged with its friendly neighbours must have a liberty other
    /// than the point itself.
    pub fn is_not_self_capture(&self, vertex: Vertex, stone: Stone) -> bool {
        let adjacency = adjacent_groups(self.board, self.group_map, vertex, stone);

        let captures = adjacency
            .theirs
            .iter()
            .filter_map(|&id| self.groups.get(id))
            .any(|group| liberties::get_liberties(group, self.board).len() == 1);
        if captures {
            return true;
        }

        let hypothetical = Group::merge(
            vertex,
            stone,
            adjacency.ours.iter().filter_map(|&id| self.groups.get(id)),
        );
        let mut liberties = liberties::get_liberties(&hypothetical, self.board);
        liberties.remove(&vertex);

        !liberties.is_empty()
    }
}
