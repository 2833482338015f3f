//! Domain layer: the balanced tree and its invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod iter;
pub mod node;
pub mod tree;
mod validate;

pub use error::DomainError;
pub use iter::{EdgeIter, InOrderIter};
pub use node::{Node, NodeId, Side};
pub use tree::{BalancedTree, EMPTY_HEIGHT};
