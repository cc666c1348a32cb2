// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sente Core - Go Rules Engine
//!
//! This crate provides the rules engine behind sente:
//! - Fixed-size Go boards (9x9, 13x13, 19x19)
//! - Stone groups, liberties, captures, suicide and ko
//! - A branching history tree of positions with a movable cursor
//! - Area and territory scoring
//!
//! Record formats and text protocols live outside this crate and talk to
//! the engine through [`GoGame`].

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod group;
pub mod liberties;
pub mod node;
pub mod rules;
pub mod scoring;
pub mod tree;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use thiserror::Error;

pub use board::Board;
pub use config::GameConfig;
pub use engine::MoveGenerator;
pub use game::GoGame;
pub use group::{Group, GroupId};
pub use node::GameNode;
pub use rules::Rules;
pub use scoring::Results;
pub use tree::{NodeId, Tree, TreeError};

/// Contents of a board point
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum Stone {
    /// No stone
    #[default]
    Empty = 0,
    /// Black stone (moves first in an even game)
    Black = 1,
    /// White stone
    White = 2,
}

impl Stone {
    /// Returns the opposing color; `Empty` stays `Empty`
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            Stone::Empty => Stone::Empty,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Stone::Empty
    }

    /// Single letter used in record properties and result strings
    pub fn letter(self) -> char {
        match self {
            Stone::Black => 'B',
            Stone::White => 'W',
            Stone::Empty => 'E',
        }
    }

    /// Parse a player color ("B", "black", "W", "white"), case-insensitive
    pub fn from_player(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Stone::Black),
            "w" | "white" => Some(Stone::White),
            _ => None,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stone::Black => "black",
            Stone::White => "white",
            Stone::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Board coordinate: `x` is the column from the left, `y` the row from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vertex {
    /// Column
    pub x: u8,
    /// Row
    pub y: u8,
}

/// Column letters used by text protocols; `I` is skipped
const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRST";

impl Vertex {
    /// Create a new vertex
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if the vertex lies on a board of the given side
    pub fn is_valid(&self, side: u8) -> bool {
        self.x < side && self.y < side
    }

    /// Orthogonal neighbours that lie on a board of the given side
    pub fn neighbors(&self, side: u8) -> Vec<Vertex> {
        let mut result = Vec::with_capacity(4);
        let (x, y) = (self.x, self.y);

        if x.saturating_add(1) < side {
            result.push(Vertex::new(x + 1, y));
        }
        if x > 0 {
            result.push(Vertex::new(x - 1, y));
        }
        if y.saturating_add(1) < side {
            result.push(Vertex::new(x, y + 1));
        }
        if y > 0 {
            result.push(Vertex::new(x, y - 1));
        }

        result
    }

    /// Parse a protocol-style coordinate such as `D4` (row 1 is the bottom row)
    pub fn from_gtp(text: &str, side: u8) -> Result<Self, GameError> {
        let invalid = || GameError::InvalidCoordinate(text.to_string());
        let upper = text.trim().to_ascii_uppercase();
        let mut chars = upper.chars();

        let column = chars.next().ok_or_else(invalid)?;
        let x = COLUMN_LETTERS
            .iter()
            .position(|&c| c as char == column)
            .ok_or_else(invalid)?;
        let row: u8 = chars.as_str().parse().map_err(|_| invalid())?;

        if row == 0 || row > side || x >= side as usize {
            return Err(invalid());
        }

        Ok(Vertex::new(x as u8, side - row))
    }

    /// Format as a protocol-style coordinate for a board of the given side
    pub fn to_gtp(&self, side: u8) -> String {
        let column = COLUMN_LETTERS.get(self.x as usize).copied().unwrap_or(b'?') as char;
        format!("{}{}", column, side.saturating_sub(self.y))
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single ply, or a stone used in a setup batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    /// A stone (or, in setup batches, an emptied point) at a vertex
    Place {
        /// Target point
        vertex: Vertex,
        /// Color placed there
        stone: Stone,
    },
    /// The player passes
    Pass(Stone),
    /// The player resigns
    Resign(Stone),
}

impl Move {
    /// Shorthand for a stone at `(x, y)`
    pub fn place(x: u8, y: u8, stone: Stone) -> Self {
        Move::Place {
            vertex: Vertex::new(x, y),
            stone,
        }
    }

    /// Color of the player making the move
    pub fn stone(&self) -> Stone {
        match *self {
            Move::Place { stone, .. } | Move::Pass(stone) | Move::Resign(stone) => stone,
        }
    }

    /// Target point; `None` for pass and resign
    pub fn vertex(&self) -> Option<Vertex> {
        match *self {
            Move::Place { vertex, .. } => Some(vertex),
            _ => None,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass(_))
    }

    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign(_))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Place { vertex, stone } => write!(
                f,
                "{}[{}{}]",
                stone.letter(),
                b'a'.wrapping_add(vertex.x) as char,
                b'a'.wrapping_add(vertex.y) as char
            ),
            Move::Pass(stone) => write!(f, "{}[]", stone.letter()),
            Move::Resign(stone) => write!(f, "{}[resign]", stone.letter()),
        }
    }
}

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IllegalMoveReason {
    /// The point is outside the board
    OffBoard,
    /// The point already holds a stone
    OccupiedPoint,
    /// It is not this color's turn
    WrongColor,
    /// The move would leave its own group without liberties
    SelfCapture,
    /// The move retakes a ko immediately
    KoPoint,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMoveReason::OffBoard => "the point is not on the board",
            IllegalMoveReason::OccupiedPoint => "the point is already occupied",
            IllegalMoveReason::WrongColor => "it is not this player's turn",
            IllegalMoveReason::SelfCapture => "the move would capture its own stones",
            IllegalMoveReason::KoPoint => "the move retakes a ko",
        };
        f.write_str(text)
    }
}

/// Operations attempted in a state that does not allow them
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Scoring requires two consecutive passes
    #[error("game did not end from passing; could not score")]
    NotScorable,

    /// A result is already recorded
    #[error("the game is already over")]
    AlreadyOver,

    /// Results were requested before the game ended
    #[error("the game is still in progress")]
    GameInProgress,

    /// The property may not be edited after construction
    #[error("property {0} cannot be edited")]
    ImmutableProperty(String),

    /// The cursor is at the root
    #[error("cannot step up past the root")]
    CannotStepUp,

    /// The cursor is at a leaf
    #[error("cannot step down from a leaf")]
    NoChildren,

    /// No child matches the requested step
    #[error("no such child node")]
    NoSuchChild,

    /// The player to move must be black or white
    #[error("the active player cannot be empty")]
    EmptyActivePlayer,
}

impl From<TreeError> for StateError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::CannotStepUp => StateError::CannotStepUp,
            TreeError::NoChildren => StateError::NoChildren,
            TreeError::NoSuchChild => StateError::NoSuchChild,
        }
    }
}

/// Errors that can occur while driving a game
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The move breaks a rule
    #[error("illegal move {mv}: {reason}")]
    IllegalMove {
        /// The rejected move
        mv: Move,
        /// Most specific rule that rejected it
        reason: IllegalMoveReason,
    },

    /// The game is not in a state that allows the operation
    #[error(transparent)]
    InvalidState(#[from] StateError),

    /// Only 9x9, 13x13 and 19x19 boards are supported
    #[error("invalid board size {0}: only 9x9, 13x13 and 19x19 are supported")]
    UnsupportedBoardSize(u32),

    /// A metadata key or value could not be interpreted
    #[error("invalid property {key}: {reason}")]
    InvalidProperty {
        /// Property key
        key: String,
        /// What was wrong with it
        reason: String,
    },

    /// A text coordinate could not be parsed
    #[error("invalid coordinate \"{0}\"")]
    InvalidCoordinate(String),

    /// Standard handicap placement supports 1 to 9 stones
    #[error("invalid handicap of {0} stones (must be between 1 and 9)")]
    InvalidHandicap(u32),
}

impl GameError {
    pub(crate) fn illegal(mv: Move, reason: IllegalMoveReason) -> Self {
        GameError::IllegalMove { mv, reason }
    }
}

impl From<TreeError> for GameError {
    fn from(err: TreeError) -> Self {
        GameError::InvalidState(err.into())
    }
}
