//! Insertion and rebalancing behaviour of BalancedTree

use rstest::rstest;

use avltree::domain::{BalancedTree, NodeId};

fn key(tree: &BalancedTree, id: Option<NodeId>) -> Option<&str> {
    id.and_then(|id| tree.node(id)).map(|node| node.key())
}

/// (key, height) of the root and its two children.
fn top_three(tree: &BalancedTree) -> [(Option<&str>, i32); 3] {
    let root = tree.node(tree.root().unwrap()).unwrap();
    let height = |id: Option<NodeId>| id.and_then(|id| tree.node(id)).map_or(-1, |n| n.height());
    [
        (Some(root.key()), root.height()),
        (key(tree, root.left()), height(root.left())),
        (key(tree, root.right()), height(root.right())),
    ]
}

// ============================================================
// Rotation cases
// ============================================================

#[rstest]
#[case::left_left(["C", "B", "A"])]
#[case::right_right(["A", "B", "C"])]
#[case::left_right(["C", "A", "B"])]
#[case::right_left(["A", "C", "B"])]
fn given_three_keys_when_inserted_then_rotates_to_b_root(#[case] keys: [&str; 3]) {
    let tree: BalancedTree = keys.into_iter().collect();

    assert_eq!(
        top_three(&tree),
        [(Some("B"), 1), (Some("A"), 0), (Some("C"), 0)]
    );
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn given_nine_keys_when_inserted_stepwise_then_balanced_after_every_insert() {
    let keys = ["5", "3", "8", "1", "4", "7", "9", "2", "6"];
    let mut tree = BalancedTree::new();

    for (i, k) in keys.iter().enumerate() {
        tree.insert(*k);
        for (id, node) in tree.iter() {
            let factor = tree.balance_factor(id);
            assert!(
                (-1..=1).contains(&factor),
                "after insert #{} node {} has balance factor {}",
                i + 1,
                node.key(),
                factor
            );
        }
    }

    assert_eq!(tree.keys(), vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    assert_eq!(tree.validate(), Ok(()));
}

#[test]
fn given_ascending_keys_when_inserted_then_height_stays_logarithmic() {
    let keys: Vec<String> = (0..1000).map(|i| format!("{:04}", i)).collect();
    let tree: BalancedTree = keys.iter().map(String::as_str).collect();

    assert_eq!(tree.len(), 1000);
    // A perfectly balanced tree of 1000 nodes has height 9; AVL stays within 1.44 log2(n)
    assert!(tree.height() <= 14, "height {}", tree.height());
    assert_eq!(tree.validate(), Ok(()));
    assert_eq!(tree.keys(), keys);
}

#[test]
fn given_rotation_below_root_when_inserted_then_subtree_is_relinked() {
    // After 9 and 99 both 5 and 8 are right-heavy; the rotation happens at 8
    let tree: BalancedTree = ["5", "3", "8", "9", "99"].into_iter().collect();

    let root = tree.node(tree.root().unwrap()).unwrap();
    assert_eq!(root.key(), "5");
    let right = root.right().unwrap();
    assert_eq!(key(&tree, Some(right)), Some("9"));
    assert_eq!(tree.node(right).unwrap().parent(), tree.root());
    assert_eq!(key(&tree, tree.node(right).unwrap().left()), Some("8"));
    assert_eq!(key(&tree, tree.node(right).unwrap().right()), Some("99"));
    assert_eq!(tree.validate(), Ok(()));
}

// ============================================================
// Duplicates and lookups
// ============================================================

#[test]
fn given_existing_key_when_inserted_again_then_shape_is_unchanged() {
    let mut tree: BalancedTree = ["m", "c", "x", "a", "e"].into_iter().collect();
    let edges_before: Vec<(String, String)> = tree
        .edges()
        .map(|(p, c)| (p.to_string(), c.to_string()))
        .collect();
    let heights_before: Vec<i32> = tree.iter().map(|(_, n)| n.height()).collect();

    for k in ["m", "a", "e", "x"] {
        tree.insert(k);
    }

    let edges_after: Vec<(String, String)> = tree
        .edges()
        .map(|(p, c)| (p.to_string(), c.to_string()))
        .collect();
    let heights_after: Vec<i32> = tree.iter().map(|(_, n)| n.height()).collect();
    assert_eq!(tree.len(), 5);
    assert_eq!(edges_before, edges_after);
    assert_eq!(heights_before, heights_after);
}

#[test]
fn given_tree_when_searching_then_finds_only_inserted_keys() {
    let tree: BalancedTree = ["delta", "alpha", "charlie", "bravo"].into_iter().collect();

    assert!(tree.contains("alpha"));
    assert!(tree.contains("charlie"));
    assert!(!tree.contains("echo"));
    assert!(!tree.contains(""));
    let id = tree.find("bravo").unwrap();
    assert_eq!(tree.node(id).unwrap().key(), "bravo");
}

#[test]
fn given_strings_when_compared_then_order_is_lexicographic_not_numeric() {
    let tree: BalancedTree = ["10", "9", "100", "1"].into_iter().collect();
    assert_eq!(tree.keys(), vec!["1", "10", "100", "9"]);
}

#[test]
fn given_empty_tree_when_queried_then_reports_empty() {
    let tree = BalancedTree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), -1);
    assert_eq!(tree.root(), None);
    assert!(tree.keys().is_empty());
}

#[test]
fn given_tree_when_extended_then_behaves_like_repeated_insert() {
    let mut extended = BalancedTree::new();
    extended.extend(vec!["q".to_string(), "w".to_string(), "e".to_string()]);

    let mut inserted = BalancedTree::new();
    for k in ["q", "w", "e"] {
        inserted.insert(k);
    }

    assert_eq!(extended.keys(), inserted.keys());
    assert_eq!(
        extended.edges().collect::<Vec<_>>(),
        inserted.edges().collect::<Vec<_>>()
    );
}
