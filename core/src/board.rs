// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{GameError, Move, Stone, Vertex};

/// Board sides the engine supports
pub const SUPPORTED_SIDES: [u8; 3] = [9, 13, 19];

/// Represents the Go board with stones and empty positions
///
/// The side is fixed when the board is created. Point accessors index the
/// grid directly, so callers check [`Board::on_board`] before reading or
/// writing a vertex that came from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Length of one side (9, 13 or 19)
    side: u8,
    /// Points in row-major order
    cells: Vec<Stone>,
}

impl Board {
    /// Create a new empty board with the specified side
    pub fn new(side: u32) -> Result<Self, GameError> {
        let side = u8::try_from(side)
            .ok()
            .filter(|s| SUPPORTED_SIDES.contains(s))
            .ok_or(GameError::UnsupportedBoardSize(side))?;

        let cells = (side as usize) * (side as usize);
        Ok(Self {
            side,
            cells: vec![Stone::Empty; cells],
        })
    }

    /// Get the side of the board
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Whether the move targets a point on this board; pass and resign never do
    pub fn on_board(&self, mv: &Move) -> bool {
        mv.vertex().is_some_and(|v| self.contains(v))
    }

    /// Whether the vertex lies on this board
    pub fn contains(&self, vertex: Vertex) -> bool {
        vertex.is_valid(self.side)
    }

    /// Whether the point holds no stone
    pub fn is_empty(&self, vertex: Vertex) -> bool {
        self.cells[self.index(vertex)] == Stone::Empty
    }

    /// Write a stone to a point without any rule checks
    pub fn play_stone(&mut self, vertex: Vertex, stone: Stone) {
        let idx = self.index(vertex);
        self.cells[idx] = stone;
    }

    /// Clear a point
    pub fn capture_stone(&mut self, vertex: Vertex) {
        let idx = self.index(vertex);
        self.cells[idx] = Stone::Empty;
    }

    /// Get the stone at `(x, y)`
    pub fn get_stone(&self, x: u8, y: u8) -> Stone {
        self.get(Vertex::new(x, y))
    }

    /// Get the stone at a vertex
    pub fn get(&self, vertex: Vertex) -> Stone {
        self.cells[self.index(vertex)]
    }

    /// The point at `(x, y)` as a move, colored by whatever occupies it
    pub fn get_space(&self, x: u8, y: u8) -> Move {
        Move::place(x, y, self.get_stone(x, y))
    }

    /// On-board neighbours of a vertex
    pub fn neighbors(&self, vertex: Vertex) -> Vec<Vertex> {
        vertex.neighbors(self.side)
    }

    /// Every point in row-major order with its contents
    pub fn points(&self) -> impl Iterator<Item = (Vertex, Stone)> + '_ {
        let side = self.side as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &stone)| (Vertex::new((i % side) as u8, (i / side) as u8), stone))
    }

    /// Count the stones of one color
    pub fn count(&self, stone: Stone) -> usize {
        self.cells.iter().filter(|&&s| s == stone).count()
    }

    /// Remove every stone
    pub fn clear(&mut self) {
        self.cells.fill(Stone::Empty);
    }

    /// Convert a vertex to a cell index
    fn index(&self, vertex: Vertex) -> usize {
        debug_assert!(self.contains(vertex), "vertex {} is off the board", vertex);
        (vertex.y as usize) * (self.side as usize) + (vertex.x as usize)
    }
}
