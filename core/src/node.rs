// SPDX-License-Identifier: MIT OR Apache-2.0

//! Payload stored in each node of the game history

use crate::{Move, Stone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Record-format property keys the engine interprets itself
pub mod keys {
    /// File format version
    pub const FF: &str = "FF";
    /// Game type (1 = Go)
    pub const GM: &str = "GM";
    /// Board size
    pub const SZ: &str = "SZ";
    /// Ruleset
    pub const RU: &str = "RU";
    /// Komi
    pub const KM: &str = "KM";
    /// Number of handicap stones
    pub const HA: &str = "HA";
    /// Result of the game
    pub const RE: &str = "RE";
    /// Comment on a node
    pub const C: &str = "C";
    /// Player to move
    pub const PL: &str = "PL";
}

/// Keys stored on the root node no matter where they are set
const ROOT_KEYS: &[&str] = &[
    "AP", "CA", "FF", "GM", "ST", "SZ", "AN", "BR", "BT", "CP", "DT", "EV", "GN", "GC", "ON",
    "OT", "PB", "PC", "PW", "RE", "RO", "RU", "SO", "TM", "US", "WR", "WT", "HA", "KM", "TB",
    "TW",
];

/// Keys that describe the move or setup stones of a node
const STRUCTURAL_KEYS: &[&str] = &["B", "W", "AB", "AW", "AE"];

/// Whether the key belongs on the root node
pub fn is_root_key(key: &str) -> bool {
    ROOT_KEYS.contains(&key)
}

/// Whether the key is carried by the node's move or added stones
pub fn is_structural_key(key: &str) -> bool {
    STRUCTURAL_KEYS.contains(&key)
}

/// Property keys are one or two uppercase ASCII letters
pub fn is_valid_key(key: &str) -> bool {
    (1..=2).contains(&key.len()) && key.bytes().all(|b| b.is_ascii_uppercase())
}

/// One ply of history
///
/// Two nodes compare equal when they carry the same move; setup nodes (no
/// move) all compare equal to each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameNode {
    mv: Option<Move>,
    added: Vec<Move>,
    properties: BTreeMap<String, Vec<String>>,
}

impl PartialEq for GameNode {
    fn eq(&self, other: &Self) -> bool {
        self.mv == other.mv
    }
}

impl GameNode {
    /// A node without a move, used for the root and for setup batches
    pub fn new() -> Self {
        Self::default()
    }

    /// A node recording a move
    pub fn from_move(mv: Move) -> Self {
        Self {
            mv: Some(mv),
            ..Self::default()
        }
    }

    /// A setup node with the given stones
    pub fn setup<I: IntoIterator<Item = Move>>(stones: I) -> Self {
        let mut node = Self::new();
        for stone in stones {
            node.add_stone(stone);
        }
        node
    }

    /// The move played at this ply, if any
    pub fn get_move(&self) -> Option<Move> {
        self.mv
    }

    /// Setup stones in the order they were added
    pub fn added_stones(&self) -> &[Move] {
        &self.added
    }

    /// Record a setup stone; a later entry for the same point replaces the earlier one
    ///
    /// Pass and resign moves are ignored.
    pub fn add_stone(&mut self, stone: Move) {
        let Some(vertex) = stone.vertex() else {
            return;
        };
        self.added.retain(|m| m.vertex() != Some(vertex));
        self.added.push(stone);
    }

    /// The single color placed by this node's setup stones, if there is one
    pub fn setup_color(&self) -> Option<Stone> {
        let mut colors = self
            .added
            .iter()
            .map(Move::stone)
            .filter(|s| !s.is_empty());
        let first = colors.next()?;
        colors.all(|c| c == first).then_some(first)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn property(&self, key: &str) -> Option<&[String]> {
        self.properties.get(key).map(Vec::as_slice)
    }

    /// First value of a property
    pub fn first_value(&self, key: &str) -> Option<&str> {
        self.property(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn set_property<K: Into<String>>(&mut self, key: K, values: Vec<String>) {
        self.properties.insert(key.into(), values);
    }

    pub fn remove_property(&mut self, key: &str) -> Option<Vec<String>> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &BTreeMap<String, Vec<String>> {
        &self.properties
    }

    /// Player-to-move override recorded on this node
    pub fn player_override(&self) -> Option<Stone> {
        self.first_value(keys::PL).and_then(Stone::from_player)
    }
}
