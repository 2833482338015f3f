//! Height-balanced (AVL) binary search tree over string keys.
//!
//! Nodes live in a generational arena and refer to each other by [`NodeId`].
//! Child links are the owning edges, the parent link is only used to walk
//! back up after an insertion. Nodes are never removed, so every id handed
//! out stays valid for the lifetime of the tree.

use std::cmp::Ordering;

use generational_arena::Arena;
use tracing::{debug, error, instrument, trace};

use crate::domain::iter::{EdgeIter, InOrderIter};
use crate::domain::node::{Node, NodeId, Side};

/// Height of an absent subtree.
pub const EMPTY_HEIGHT: i32 = -1;

/// Ordered set of unique string keys, rebalanced after every insert.
#[derive(Debug, Clone)]
pub struct BalancedTree {
    /// Arena storage for all tree nodes
    arena: Arena<Node>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
}

impl Default for BalancedTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BalancedTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts `key` and restores the AVL balance on the way back up.
    ///
    /// A key that is already present is ignored: the tree keeps its shape and
    /// no error is reported.
    #[instrument(level = "trace", skip(self, key))]
    pub fn insert(&mut self, key: impl Into<String>) {
        let key = key.into();

        let Some(mut current) = self.root else {
            trace!(key = %key, "inserting root");
            self.root = Some(self.arena.insert(Node::leaf(key, None)));
            return;
        };

        loop {
            let node = &self.arena[current];
            let side = match key.as_str().cmp(node.key.as_str()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    debug!(key = %key, "key already present, ignoring");
                    return;
                }
            };

            match node.child(side) {
                Some(child) => current = child,
                None => {
                    trace!(key = %key, parent = %node.key, %side, "attaching leaf");
                    let leaf = self.arena.insert(Node::leaf(key.clone(), None));
                    self.set_child(current, side, Some(leaf));
                    self.rebalance(&key, leaf);
                    return;
                }
            }
        }
    }

    /// Height of the left subtree minus height of the right subtree.
    ///
    /// Absent subtrees count as height -1, so a leaf has factor 0.
    ///
    /// # Panics
    /// If `id` was not handed out by this tree.
    pub fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.arena[id];
        self.subtree_height(node.left) - self.subtree_height(node.right)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, -1 when empty.
    pub fn height(&self) -> i32 {
        self.subtree_height(self.root)
    }

    pub fn find(&self, key: &str) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.arena[id];
            current = match key.cmp(node.key.as_str()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(_, node)| node.key.clone()).collect()
    }

    /// In-order traversal.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Parent to child key pairs: left subtree edges, the edge to the left
    /// child, right subtree edges, the edge to the right child.
    pub fn edges(&self) -> EdgeIter<'_> {
        EdgeIter::new(self)
    }

    fn subtree_height(&self, id: Option<NodeId>) -> i32 {
        id.map_or(EMPTY_HEIGHT, |id| self.arena[id].height)
    }

    /// Recomputes cached heights from `id` up to the root.
    fn update_height(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self.arena[id];
            let height = 1 + self
                .subtree_height(node.left)
                .max(self.subtree_height(node.right));

            let node = &mut self.arena[id];
            node.height = height;
            current = node.parent;
        }
    }

    /// Walks from the root towards `key` and returns the last node on that
    /// path whose balance factor is outside [-1, 1].
    ///
    /// The walk overwrites its candidate at every unbalanced node, so the
    /// result is the unbalanced node closest to `key`, not the one closest to
    /// the root. The node holding `key` itself is not inspected.
    fn find_unbalanced_node(&self, key: &str) -> Option<NodeId> {
        let mut last_unbalanced = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = &self.arena[id];
            let side = match node.key.as_str().cmp(key) {
                Ordering::Equal => break,
                Ordering::Less => Side::Right,
                Ordering::Greater => Side::Left,
            };

            if !(-1..=1).contains(&self.balance_factor(id)) {
                last_unbalanced = Some(id);
            }
            current = node.child(side);
        }

        last_unbalanced
    }

    /// Restores the AVL property after `key` was attached as leaf `id`.
    ///
    /// At most one single or double rotation happens per insertion.
    fn rebalance(&mut self, key: &str, id: NodeId) {
        self.update_height(id);

        let Some(unbalanced) = self.find_unbalanced_node(key) else {
            return;
        };

        match self.balance_factor(unbalanced) {
            -2 => {
                if let Some(right) = self.arena[unbalanced].right {
                    if self.balance_factor(right) == 1 {
                        trace!(node = %self.arena[unbalanced].key, "right-left case");
                        self.rotate_right(right);
                    }
                }
                self.rotate_left(unbalanced);
            }
            2 => {
                if let Some(left) = self.arena[unbalanced].left {
                    if self.balance_factor(left) == -1 {
                        trace!(node = %self.arena[unbalanced].key, "left-right case");
                        self.rotate_left(left);
                    }
                }
                self.rotate_right(unbalanced);
            }
            factor => {
                error!(
                    node = %self.arena[unbalanced].key,
                    factor, "unexpected balance factor after insert"
                );
                debug_assert!(false, "unexpected balance factor {factor}");
            }
        }
    }

    fn rotate_left(&mut self, id: NodeId) {
        self.rotate(id, Side::Left);
    }

    fn rotate_right(&mut self, id: NodeId) {
        self.rotate(id, Side::Right);
    }

    /// Rotates the subtree at `id` towards `direction`.
    ///
    /// The child on the opposite side (the pivot) takes the place of `id`,
    /// `id` becomes the pivot's child on `direction`, and the pivot's former
    /// inner child moves over to `id`.
    fn rotate(&mut self, id: NodeId, direction: Side) {
        let Some(pivot) = self.arena[id].child(direction.opposite()) else {
            debug_assert!(false, "rotation {direction} without a pivot child");
            return;
        };
        trace!(
            node = %self.arena[id].key,
            pivot = %self.arena[pivot].key,
            %direction,
            "rotate"
        );
        let inner = self.arena[pivot].child(direction);

        match self.arena[id].parent {
            Some(parent) => self.replace_child(parent, id, Some(pivot)),
            None => {
                self.root = Some(pivot);
                self.arena[pivot].parent = None;
            }
        }

        self.set_child(pivot, direction, Some(id));
        self.set_child(id, direction.opposite(), inner);
    }

    /// Points `parent`'s `side` slot at `child`, fixes the back reference and
    /// recomputes heights from `parent` upwards.
    ///
    /// Every structural change goes through here.
    fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        *self.arena[parent].child_mut(side) = child;
        if let Some(child) = child {
            self.arena[child].parent = Some(parent);
        }
        self.update_height(parent);
    }

    /// Redirects whichever slot of `parent` holds `old` to `new`.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: Option<NodeId>) {
        let node = &self.arena[parent];
        let side = if node.left == Some(old) {
            Side::Left
        } else if node.right == Some(old) {
            Side::Right
        } else {
            debug!(parent = %node.key, "replace_child: not a child of parent");
            return;
        };
        self.set_child(parent, side, new);
    }
}

impl<S: Into<String>> Extend<S> for BalancedTree {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for BalancedTree {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
