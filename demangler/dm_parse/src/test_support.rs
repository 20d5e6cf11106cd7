//! Helpers shared by the grammar tests.

#![allow(clippy::expect_used, reason = "Tests can panic")]

use dm_tree::{NodeId, NodeKind, SymbolTree};

use crate::{demangle_symbol, demangle_type, Demangler, Options};

pub(crate) fn demangler(input: &str) -> Demangler<'_> {
    Demangler::new(input.as_bytes(), Options::default())
}

/// A symbol that must decode.
pub(crate) fn tree(symbol: &str) -> SymbolTree {
    demangle_symbol(symbol).expect("symbol should decode")
}

pub(crate) fn dump(symbol: &str) -> String {
    tree(symbol).to_string()
}

/// Dump of a bare type that must decode.
pub(crate) fn dump_type(mangled: &str) -> String {
    demangle_type(mangled).expect("type should decode").to_string()
}

/// Kinds of the `Global` node's direct children.
pub(crate) fn top_kinds(symbol: &str) -> Vec<NodeKind> {
    let tree = tree(symbol);
    tree.children(tree.root())
        .iter()
        .map(|&child| tree.kind(child))
        .collect()
}

/// Run a single production over `input` and dump the subtree it built.
pub(crate) fn production(
    input: &str,
    parse: impl FnOnce(&mut Demangler<'_>) -> Option<NodeId>,
) -> Option<String> {
    let mut demangler = demangler(input);
    let root = parse(&mut demangler)?;
    Some(demangler.finish(root).to_string())
}

/// Expected dump from one line per node.
pub(crate) fn lines(expected: &[&str]) -> String {
    let mut dump = expected.join("\n");
    dump.push('\n');
    dump
}
