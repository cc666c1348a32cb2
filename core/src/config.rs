// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game setup read from JSON

use crate::{GameError, GoGame, Rules, Vertex};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for starting a new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side (9, 13 or 19)
    pub board_size: u32,
    pub rules: Rules,
    /// Komi; the ruleset's default when absent
    pub komi: Option<f64>,
    /// Black stones placed before the first move
    pub handicap: Vec<Vertex>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 19,
            rules: Rules::Chinese,
            komi: None,
            handicap: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON text; missing fields take their defaults
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse game config")
    }

    /// Read a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_json_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Replace the handicap with the standard placement for `stones` stones
    pub fn with_standard_handicap(mut self, stones: u32) -> Result<Self, GameError> {
        let side = u8::try_from(self.board_size)
            .map_err(|_| GameError::UnsupportedBoardSize(self.board_size))?;
        self.handicap = standard_handicap(side, stones)?;
        Ok(self)
    }

    /// Start a game with these settings
    pub fn build(&self) -> Result<GoGame, GameError> {
        GoGame::new(self.board_size, self.rules, self.komi, &self.handicap)
    }
}

/// Standard handicap points for 1 to 9 stones
///
/// Corner stones sit on the third line on 9x9 and the fourth line on larger
/// boards. Odd counts from five up add the center point.
pub fn standard_handicap(side: u8, stones: u32) -> Result<Vec<Vertex>, GameError> {
    if !(1..=9).contains(&stones) {
        return Err(GameError::InvalidHandicap(stones));
    }
    if !crate::board::SUPPORTED_SIDES.contains(&side) {
        return Err(GameError::UnsupportedBoardSize(u32::from(side)));
    }

    let edge = if side == 9 { 2 } else { 3 };
    let far = side - 1 - edge;
    let mid = side / 2;

    let corners = [
        Vertex::new(far, edge),
        Vertex::new(edge, far),
        Vertex::new(far, far),
        Vertex::new(edge, edge),
    ];
    let center = Vertex::new(mid, mid);
    let sides = [Vertex::new(edge, mid), Vertex::new(far, mid)];
    let tops = [Vertex::new(mid, edge), Vertex::new(mid, far)];

    let mut points: Vec<Vertex> = corners.iter().copied().take(stones.min(4) as usize).collect();
    if stones >= 6 {
        points.extend(sides);
    }
    if stones >= 8 {
        points.extend(tops);
    }
    if stones >= 5 && stones % 2 == 1 {
        points.push(center);
    }

    Ok(points)
}
