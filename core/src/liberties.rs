// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liberty and territory algorithms
//!
//! Pure functions over a [`Board`] and the position-to-group map. Flood
//! fills use an explicit stack and a visited set, so they touch each point
//! at most once.

use crate::{board::Board, group::Group, GroupId, Vertex};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Empty points adjacent to any stone of the group
pub fn get_liberties(group: &Group, board: &Board) -> BTreeSet<Vertex> {
    let mut liberties = BTreeSet::new();

    for stone in group.stones() {
        for neighbor in board.neighbors(stone) {
            if board.is_empty(neighbor) {
                liberties.insert(neighbor);
            }
        }
    }

    liberties
}

/// All points connected to `start` through points of the same contents
///
/// From a stone this is its chain; from an empty point it is the empty
/// region containing it.
pub fn get_connected_points(start: Vertex, board: &Board) -> BTreeSet<Vertex> {
    let target = board.get(start);
    let mut visited = BTreeSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }

        for neighbor in board.neighbors(current) {
            if board.get(neighbor) == target && !visited.contains(&neighbor) {
                stack.push(neighbor);
            }
        }
    }

    visited
}

/// Partition every empty point into maximal connected regions
pub fn get_empty_spaces(board: &Board) -> Vec<BTreeSet<Vertex>> {
    let mut regions = Vec::new();
    let mut seen = HashSet::new();

    for (vertex, stone) in board.points() {
        if stone.is_empty() && !seen.contains(&vertex) {
            let region = get_connected_points(vertex, board);
            seen.extend(region.iter().copied());
            regions.push(region);
        }
    }

    regions
}

/// Groups that border a region
pub fn get_adjacent_groups(
    region: &BTreeSet<Vertex>,
    board: &Board,
    group_map: &HashMap<Vertex, GroupId>,
) -> BTreeSet<GroupId> {
    let mut groups = BTreeSet::new();

    for &point in region {
        for neighbor in board.neighbors(point) {
            if let Some(&id) = group_map.get(&neighbor) {
                groups.insert(id);
            }
        }
    }

    groups
}
