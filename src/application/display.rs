use termtree::Tree;
use tracing::instrument;

use crate::domain::{BalancedTree, NodeId};

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for BalancedTree {
    /// Labels each node with its cached height and balance factor, children
    /// listed left before right.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn label(tree: &BalancedTree, idx: NodeId) -> String {
            match tree.node(idx) {
                Some(node) => format!(
                    "{} (h={}, bf={})",
                    node.key(),
                    node.height(),
                    tree.balance_factor(idx)
                ),
                None => String::new(),
            }
        }

        fn build_tree(tree: &BalancedTree, idx: NodeId, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.node(idx) {
                for child_idx in [node.left(), node.right()].into_iter().flatten() {
                    let mut child_tree = Tree::new(label(tree, child_idx));
                    build_tree(tree, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(label(self, root_idx));
            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}
