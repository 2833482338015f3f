use std::fmt;

use generational_arena::Index;

/// Stable handle to a node stored in the tree's arena.
pub type NodeId = Index;

/// Which child slot of a node is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Tree vertex in the arena-based AVL structure.
///
/// `left` and `right` are the owning edges; `parent` is a back reference used
/// only for walking upwards.
#[derive(Debug, Clone)]
pub struct Node {
    /// Key of this node, never changed after creation
    pub(super) key: String,
    /// Cached subtree height, a leaf has height 0
    pub(super) height: i32,
    /// Index of parent node in the arena, None for the root
    pub(super) parent: Option<NodeId>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
}

impl Node {
    pub(super) fn leaf(key: String, parent: Option<NodeId>) -> Self {
        Self {
            key,
            height: 0,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(super) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
