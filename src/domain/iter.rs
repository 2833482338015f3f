use crate::domain::node::{Node, NodeId};
use crate::domain::tree::BalancedTree;

/// In-order traversal with an explicit stack.
pub struct InOrderIter<'a> {
    tree: &'a BalancedTree,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a> InOrderIter<'a> {
    pub(super) fn new(tree: &'a BalancedTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = tree.node(id).and_then(Node::left);
        }

        let id = self.stack.pop()?;
        let node = tree.node(id)?;
        self.current = node.right();
        Some((id, node))
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Enter,
    LeftDone,
    RightDone,
}

/// Parent to child edges in graph-rendering order.
///
/// For every node: the edges of its left subtree, the edge to its left child,
/// the edges of its right subtree, then the edge to its right child.
pub struct EdgeIter<'a> {
    tree: &'a BalancedTree,
    stack: Vec<(NodeId, Stage)>,
}

impl<'a> EdgeIter<'a> {
    pub(super) fn new(tree: &'a BalancedTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, Stage::Enter));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for EdgeIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((id, stage)) = self.stack.pop() {
            let Some(node) = tree.node(id) else {
                continue;
            };
            match stage {
                Stage::Enter => {
                    self.stack.push((id, Stage::LeftDone));
                    if let Some(left) = node.left() {
                        self.stack.push((left, Stage::Enter));
                    }
                }
                Stage::LeftDone => {
                    self.stack.push((id, Stage::RightDone));
                    if let Some(right) = node.right() {
                        self.stack.push((right, Stage::Enter));
                    }
                    if let Some(left) = node.left().and_then(|left| tree.node(left)) {
                        return Some((node.key(), left.key()));
                    }
                }
                Stage::RightDone => {
                    if let Some(right) = node.right().and_then(|right| tree.node(right)) {
                        return Some((node.key(), right.key()));
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_tree_when_iterating_then_nothing_is_yielded() {
        let tree = BalancedTree::new();
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.edges().count(), 0);
    }

    #[test]
    fn given_two_levels_when_listing_edges_then_subtrees_come_before_own_edge() {
        let tree: BalancedTree = ["4", "2", "6", "1", "3", "5", "7"].into_iter().collect();

        let edges: Vec<_> = tree.edges().collect();

        assert_eq!(
            edges,
            vec![
                ("2", "1"),
                ("2", "3"),
                ("4", "2"),
                ("6", "5"),
                ("6", "7"),
                ("4", "6"),
            ]
        );
    }

    #[test]
    fn given_unsorted_input_when_iterating_then_keys_ascend() {
        let tree: BalancedTree = ["pear", "apple", "fig", "kiwi", "banana"].into_iter().collect();
        let keys: Vec<_> = tree.iter().map(|(_, node)| node.key()).collect();
        assert_eq!(keys, vec!["apple", "banana", "fig", "kiwi", "pear"]);
    }
}
