// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered tree with a single movable cursor
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Nodes are
//! never removed, so ids stay valid for the lifetime of the tree. Children of
//! a node are unique under the payload's `PartialEq`: inserting an equal
//! payload steps into the existing child instead of adding a new one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by cursor movement
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The cursor is at the root
    #[error("cannot step up past the root node")]
    CannotStepUp,
    /// The cursor has no children
    #[error("cannot step down: the node has no children")]
    NoChildren,
    /// No child of the cursor matches
    #[error("could not step to the requested child")]
    NoSuchChild,
}

/// Index of a node in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TreeNode<T> {
    payload: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

const ROOT: NodeId = NodeId(0);

/// Rooted tree of payloads with a cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree<T> {
    nodes: Vec<TreeNode<T>>,
    cursor: NodeId,
    depth: usize,
}

impl<T: Default> Default for Tree<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Tree<T> {
    /// A tree holding only a root
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![TreeNode {
                payload: root,
                parent: None,
                children: Vec::new(),
            }],
            cursor: ROOT,
            depth: 0,
        }
    }

    /// Step to the parent of the cursor
    pub fn step_up(&mut self) -> Result<(), TreeError> {
        let parent = self.nodes[self.cursor.0]
            .parent
            .ok_or(TreeError::CannotStepUp)?;
        self.cursor = parent;
        self.depth -= 1;
        Ok(())
    }

    /// Step into the first child of the cursor
    pub fn step_down(&mut self) -> Result<(), TreeError> {
        let first = *self.nodes[self.cursor.0]
            .children
            .first()
            .ok_or(TreeError::NoChildren)?;
        self.cursor = first;
        self.depth += 1;
        Ok(())
    }

    /// Step into a specific child of the cursor by id
    pub fn step_to_id(&mut self, id: NodeId) -> Result<(), TreeError> {
        if !self.nodes[self.cursor.0].children.contains(&id) {
            return Err(TreeError::NoSuchChild);
        }
        self.cursor = id;
        self.depth += 1;
        Ok(())
    }

    /// Move the cursor back to the root
    pub fn advance_to_root(&mut self) {
        self.cursor = ROOT;
        self.depth = 0;
    }

    /// Payload at the cursor
    pub fn get(&self) -> &T {
        &self.nodes[self.cursor.0].payload
    }

    /// Mutable payload at the cursor
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.nodes[self.cursor.0].payload
    }

    pub fn root(&self) -> &T {
        &self.nodes[ROOT.0].payload
    }

    pub fn root_mut(&mut self) -> &mut T {
        &mut self.nodes[ROOT.0].payload
    }

    /// Payload of any node
    pub fn node(&self, id: NodeId) -> &T {
        &self.nodes[id.0].payload
    }

    /// Number of edges from the root to the cursor
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of nodes below the root
    pub fn size(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn is_at_root(&self) -> bool {
        self.cursor == ROOT
    }

    pub fn is_at_leaf(&self) -> bool {
        self.nodes[self.cursor.0].children.is_empty()
    }

    /// Ids from just below the root down to the cursor
    pub fn path(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.depth);
        let mut current = self.cursor;

        while let Some(parent) = self.nodes[current.0].parent {
            ids.push(current);
            current = parent;
        }

        ids.reverse();
        ids
    }

    /// Payloads from just below the root down to the cursor
    pub fn sequence(&self) -> Vec<&T> {
        self.path().into_iter().map(|id| self.node(id)).collect()
    }

    /// Children of the cursor in insertion order
    pub fn children(&self) -> Vec<&T> {
        self.children_of(self.cursor)
            .iter()
            .map(|&id| self.node(id))
            .collect()
    }

    /// Child ids of any node in insertion order
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The chain of first children starting below the root
    pub fn default_path(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut current = ROOT;

        while let Some(&first) = self.nodes[current.0].children.first() {
            ids.push(first);
            current = first;
        }

        ids
    }

    /// Every root-to-leaf path, depth first in insertion order
    pub fn leaf_paths(&self) -> Vec<Vec<NodeId>> {
        let mut paths = Vec::new();
        let mut stack: Vec<(NodeId, Vec<NodeId>)> = vec![(ROOT, Vec::new())];

        while let Some((id, path)) = stack.pop() {
            let children = &self.nodes[id.0].children;
            if children.is_empty() {
                paths.push(path);
                continue;
            }
            for &child in children.iter().rev() {
                let mut next = path.clone();
                next.push(child);
                stack.push((child, next));
            }
        }

        paths
    }

    fn push_child(&mut self, payload: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            payload,
            parent: Some(self.cursor),
            children: Vec::new(),
        });
        self.nodes[self.cursor.0].children.push(id);
        id
    }
}

impl<T: PartialEq> Tree<T> {
    /// Insert below the cursor and step into the node; an equal child is reused
    pub fn insert(&mut self, payload: T) {
        let id = match self.find_child(&payload) {
            Some(existing) => existing,
            None => self.push_child(payload),
        };
        self.cursor = id;
        self.depth += 1;
    }

    /// Insert below the cursor without moving it; an equal child is kept as is
    pub fn insert_no_step(&mut self, payload: T) {
        if self.find_child(&payload).is_none() {
            self.push_child(payload);
        }
    }

    /// Step into the child equal to `payload`
    pub fn step_to(&mut self, payload: &T) -> Result<(), TreeError> {
        let id = self.find_child(payload).ok_or(TreeError::NoSuchChild)?;
        self.cursor = id;
        self.depth += 1;
        Ok(())
    }

    /// Whether the cursor has a child equal to `payload`
    pub fn has_child(&self, payload: &T) -> bool {
        self.find_child(payload).is_some()
    }

    fn find_child(&self, payload: &T) -> Option<NodeId> {
        self.nodes[self.cursor.0]
            .children
            .iter()
            .copied()
            .find(|&id| self.nodes[id.0].payload == *payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_steps_and_counts() {
        let mut tree = Tree::new(0);
        tree.insert(1);
        tree.insert(2);

        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.size(), 2);
        assert_eq!(*tree.get(), 2);
        assert_eq!(tree.sequence(), vec![&1, &2]);
        assert!(tree.is_at_leaf());
        assert!(!tree.is_at_root());
    }

    #[test]
    fn duplicate_insert_reuses_child() {
        let mut tree = Tree::new(0);
        tree.insert(1);
        tree.step_up().unwrap();
        tree.insert(1);

        assert_eq!(tree.size(), 1);
        assert_eq!(tree.depth(), 1);

        tree.step_up().unwrap();
        tree.insert_no_step(1);
        tree.insert_no_step(3);
        assert_eq!(tree.size(), 2);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.children(), vec![&1, &3]);
    }

    #[test]
    fn cursor_errors() {
        let mut tree = Tree::new(0);
        assert_eq!(tree.step_up(), Err(TreeError::CannotStepUp));
        assert_eq!(tree.step_down(), Err(TreeError::NoChildren));
        assert_eq!(tree.step_to(&7), Err(TreeError::NoSuchChild));

        tree.insert_no_step(7);
        tree.step_to(&7).unwrap();
        assert_eq!(*tree.get(), 7);
    }

    #[test]
    fn navigation_round_trip() {
        let mut tree = Tree::new(0);
        tree.insert(1);
        tree.insert(2);
        tree.step_up().unwrap();
        tree.insert(3);

        tree.advance_to_root();
        assert_eq!(tree.depth(), 0);
        tree.step_down().unwrap();
        tree.step_down().unwrap();
        assert_eq!(*tree.get(), 2);

        assert_eq!(tree.default_path().len(), 2);
        let leaves: Vec<Vec<i32>> = tree
            .leaf_paths()
            .iter()
            .map(|p| p.iter().map(|&id| *tree.node(id)).collect())
            .collect();
        assert_eq!(leaves, vec![vec![1, 2], vec![1, 3]]);
    }

    #[test]
    fn payload_edits_stick() {
        let mut tree = Tree::new(String::from("root"));
        tree.insert(String::from("a"));
        tree.get_mut().push('!');
        tree.root_mut().push('?');

        assert_eq!(tree.get(), "a!");
        assert_eq!(tree.root(), "root?");
        assert_eq!(tree.path().len(), tree.depth());
    }
}
