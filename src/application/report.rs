//! Text reports over a finished tree: the balance factor line and DOT source.

use itertools::Itertools;

use crate::domain::BalancedTree;

/// In-order `key(balance factor)` entries joined by `separator`, ending in a newline.
pub fn balance_factor_line(tree: &BalancedTree, separator: &str) -> String {
    let mut line = tree
        .iter()
        .map(|(id, node)| format!("{}({})", node.key(), tree.balance_factor(id)))
        .join(separator);
    line.push('\n');
    line
}

/// Graphviz source with one `parent -> child` statement per edge.
///
/// A tree with a single node has no edges, so the node is declared on its own.
pub fn dot_source(tree: &BalancedTree, graph_name: &str) -> String {
    let mut out = format!("digraph {} {{\n", quote(graph_name));

    let mut edges = tree.edges().peekable();
    if edges.peek().is_none() {
        if let Some(root) = tree.root().and_then(|id| tree.node(id)) {
            out.push_str(&format!("{};\n", quote(root.key())));
        }
    }
    for (parent, child) in edges {
        out.push_str(&format!("{} -> {};\n", quote(parent), quote(child)));
    }

    out.push('}');
    out.push('\n');
    out
}

/// Quotes a DOT identifier, escaping backslashes and double quotes.
fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
