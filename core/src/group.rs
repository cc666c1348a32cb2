// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stone groups and the arena that owns them
//!
//! A [`Group`] is immutable once built. Joining groups always allocates a new
//! group in the [`GroupArena`]; the handles of the fused groups are released
//! and never handed out again with the same generation.

use crate::{Move, Stone, Vertex};
use std::collections::BTreeSet;

/// A maximal connected set of same-colored stones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    stones: BTreeSet<Vertex>,
    color: Stone,
}

impl Group {
    /// A group holding a single stone
    pub fn new(vertex: Vertex, color: Stone) -> Self {
        Self {
            stones: BTreeSet::from([vertex]),
            color,
        }
    }

    /// A group made of `vertex` plus every stone of `groups`
    ///
    /// # Panics
    ///
    /// Panics if any group's color differs from `color`.
    pub fn merge<'a, I>(vertex: Vertex, color: Stone, groups: I) -> Self
    where
        I: IntoIterator<Item = &'a Group>,
    {
        let mut stones = BTreeSet::from([vertex]);
        for group in groups {
            assert_eq!(group.color, color, "cannot merge groups of different colors");
            stones.extend(group.stones.iter().copied());
        }
        Self { stones, color }
    }

    /// A group from an already connected component
    pub(crate) fn from_component(stones: BTreeSet<Vertex>, color: Stone) -> Self {
        Self { stones, color }
    }

    pub fn contains(&self, vertex: Vertex) -> bool {
        self.stones.contains(&vertex)
    }

    pub fn color(&self) -> Stone {
        self.color
    }

    /// Points occupied by the group
    pub fn stones(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.stones.iter().copied()
    }

    /// Stones of the group as moves of its color
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.stones.iter().map(move |&vertex| Move::Place {
            vertex,
            stone: self.color,
        })
    }

    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// Handle to a group stored in a [`GroupArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    group: Option<Group>,
}

/// Generation-stamped storage for groups
///
/// A released slot is reused with a bumped generation, so a stale
/// [`GroupId`] never resolves to the group that replaced it.
#[derive(Debug, Clone, Default)]
pub struct GroupArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl GroupArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a group and return its handle
    pub fn insert(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.group = Some(group);
                GroupId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    group: Some(group),
                });
                GroupId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Look up a live group
    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.group.as_ref())
    }

    /// Release a group, invalidating its handle
    pub fn remove(&mut self, id: GroupId) -> Option<Group> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let group = slot.group.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(group)
    }

    /// Live groups with their handles
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.group.as_ref().map(|group| {
                (
                    GroupId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    group,
                )
            })
        })
    }

    /// Number of live groups
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
