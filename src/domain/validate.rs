//! Structural invariant checks for [`BalancedTree`].

use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::node::Node;
use crate::domain::tree::{BalancedTree, EMPTY_HEIGHT};

impl BalancedTree {
    /// Checks parent links, cached heights, AVL balance and key order.
    ///
    /// Returns the first violation found, walking the keys in order.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(root) = self.root().and_then(|id| self.node(id)) {
            if root.parent().is_some() {
                return Err(DomainError::ParentMismatch {
                    key: root.key().to_string(),
                });
            }
        }

        let mut previous: Option<&Node> = None;
        for (id, node) in self.iter() {
            for child in [node.left(), node.right()].into_iter().flatten() {
                let linked = self.node(child).and_then(Node::parent);
                if linked != Some(id) {
                    return Err(DomainError::ParentMismatch {
                        key: self.node(child).map_or_else(String::new, |c| c.key().to_string()),
                    });
                }
            }

            let height_of = |child: Option<_>| {
                child
                    .and_then(|c| self.node(c))
                    .map_or(EMPTY_HEIGHT, Node::height)
            };
            let actual = 1 + height_of(node.left()).max(height_of(node.right()));
            if node.height() != actual {
                return Err(DomainError::HeightMismatch {
                    key: node.key().to_string(),
                    cached: node.height(),
                    actual,
                });
            }

            let factor = self.balance_factor(id);
            if !(-1..=1).contains(&factor) {
                return Err(DomainError::Unbalanced {
                    key: node.key().to_string(),
                    factor,
                });
            }

            if let Some(prev) = previous {
                if prev.key() >= node.key() {
                    return Err(DomainError::OrderViolation {
                        key: node.key().to_string(),
                        neighbour: prev.key().to_string(),
                    });
                }
            }
            previous = Some(node);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_inserted_keys_when_validating_then_ok() {
        let tree: BalancedTree = ["5", "3", "8", "1", "4", "7", "9", "2", "6"]
            .into_iter()
            .collect();
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn given_empty_tree_when_validating_then_ok() {
        assert_eq!(BalancedTree::new().validate(), Ok(()));
    }
}
