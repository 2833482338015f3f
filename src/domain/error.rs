//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Structural invariant violations found by [`BalancedTree::validate`].
///
/// Insertion itself never fails; these only surface when a tree is checked.
///
/// [`BalancedTree::validate`]: crate::domain::BalancedTree::validate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("key order violated: {key:?} is out of order next to {neighbour:?}")]
    OrderViolation { key: String, neighbour: String },

    #[error("node {key:?} is unbalanced (balance factor {factor})")]
    Unbalanced { key: String, factor: i32 },

    #[error("node {key:?} caches height {cached}, actual height is {actual}")]
    HeightMismatch {
        key: String,
        cached: i32,
        actual: i32,
    },

    #[error("parent link of node {key:?} is inconsistent")]
    ParentMismatch { key: String },
}
