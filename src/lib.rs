//! Height-balanced (AVL) binary search tree over unique string keys.
//!
//! The [`domain`] layer holds the tree itself. Around it sit the reporting
//! collaborators (balance factor line, graphviz output) in [`application`],
//! the I/O boundary in [`infrastructure`], layered [`config`] and the [`cli`].
//!
//! ```
//! use avltree::BalancedTree;
//!
//! let tree: BalancedTree = ["C", "B", "A"].into_iter().collect();
//! let root = tree.root().and_then(|id| tree.node(id)).unwrap();
//! assert_eq!(root.key(), "B");
//! assert_eq!(tree.keys(), vec!["A", "B", "C"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{BalancedTree, Node, NodeId, Side};
