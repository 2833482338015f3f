//! Randomised insertion sequences

use std::collections::BTreeSet;

use proptest::prelude::*;

use avltree::domain::{BalancedTree, EMPTY_HEIGHT};

fn keys_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,6}", 0..300)
}

/// Upper bound on the height of an AVL tree with `n` nodes.
fn avl_height_bound(n: usize) -> f64 {
    1.44 * ((n + 2) as f64).log2() - 0.328
}

proptest! {
    #[test]
    fn inorder_keys_are_sorted_and_unique(keys in keys_strategy()) {
        let tree: BalancedTree = keys.iter().map(String::as_str).collect();

        let expected: Vec<String> = keys.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(tree.keys(), expected.clone());
        prop_assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn invariants_hold_after_every_insert(keys in keys_strategy()) {
        let mut tree = BalancedTree::new();
        for k in &keys {
            tree.insert(k.as_str());
            prop_assert_eq!(tree.validate(), Ok(()));
        }
    }

    #[test]
    fn heights_match_children(keys in keys_strategy()) {
        let tree: BalancedTree = keys.iter().map(String::as_str).collect();

        for (id, node) in tree.iter() {
            let child = |c: Option<_>| c.and_then(|c| tree.node(c)).map_or(EMPTY_HEIGHT, |n| n.height());
            prop_assert_eq!(node.height(), 1 + child(node.left()).max(child(node.right())));
            prop_assert!((-1..=1).contains(&tree.balance_factor(id)));
        }
    }

    #[test]
    fn height_within_avl_bound(keys in keys_strategy()) {
        let tree: BalancedTree = keys.iter().map(String::as_str).collect();
        prop_assert!(f64::from(tree.height()) <= avl_height_bound(tree.len()));
    }

    #[test]
    fn reinserting_present_keys_changes_nothing(keys in keys_strategy(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..20)) {
        prop_assume!(!keys.is_empty());
        let mut tree: BalancedTree = keys.iter().map(String::as_str).collect();
        let before: Vec<(String, String)> = tree.edges().map(|(p, c)| (p.to_string(), c.to_string())).collect();

        for pick in picks {
            tree.insert(pick.get(&keys).as_str());
        }

        let after: Vec<(String, String)> = tree.edges().map(|(p, c)| (p.to_string(), c.to_string())).collect();
        prop_assert_eq!(before, after);
        prop_assert!(tree.validate().is_ok());
    }
}
