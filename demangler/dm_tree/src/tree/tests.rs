use pretty_assertions::assert_eq;

use super::SymbolTree;
use crate::{NodeArena, NodeId, NodeKind};

/// `Global → TypeMangling → Type → BuiltinTypeName(name)`
fn builtin_tree(name: &str) -> SymbolTree {
    let mut arena = NodeArena::new();
    let global = arena.alloc(NodeKind::Global);
    let mangling = arena.alloc(NodeKind::TypeMangling);
    let ty = arena.alloc(NodeKind::Type);
    let builtin = arena.alloc_text(NodeKind::BuiltinTypeName, name);
    arena.add_child(ty, builtin);
    arena.add_child(mangling, ty);
    arena.add_child(global, mangling);
    SymbolTree::new(arena, global)
}

#[test]
fn dump_format() {
    let tree = builtin_tree("Builtin.FPIEEE32");
    assert_eq!(
        tree.to_string(),
        "kind=Global\n  kind=TypeMangling\n    kind=Type\n      kind=BuiltinTypeName, text=\"Builtin.FPIEEE32\"\n"
    );
}

#[test]
fn dump_shows_index_and_sibling_order() {
    let mut arena = NodeArena::new();
    let root = arena.alloc(NodeKind::DependentGenericParamType);
    let depth = arena.alloc_index(NodeKind::Index, 0);
    let index = arena.alloc_index(NodeKind::Index, 1);
    arena.add_child(root, depth);
    arena.add_child(root, index);
    let tree = SymbolTree::new(arena, root);
    assert_eq!(
        tree.to_string(),
        "kind=DependentGenericParamType\n  kind=Index, index=0\n  kind=Index, index=1\n"
    );
}

#[test]
fn equal_trees_from_separate_arenas() {
    assert_eq!(builtin_tree("Builtin.Word"), builtin_tree("Builtin.Word"));
}

#[test]
fn payload_difference_breaks_equality() {
    assert_ne!(builtin_tree("Builtin.Word"), builtin_tree("Builtin.Int8"));
}

#[test]
fn shape_difference_breaks_equality() {
    let plain = builtin_tree("Builtin.Word");

    let mut arena = plain.arena().clone();
    let suffix = arena.alloc_text(NodeKind::Suffix, "x");
    arena.add_child(plain.root(), suffix);
    let with_suffix = SymbolTree::new(arena, plain.root());

    assert_ne!(plain, with_suffix);
}

#[test]
fn accessors() {
    let tree = builtin_tree("Builtin.Word");
    let root = tree.root();
    assert_eq!(tree.kind(root), NodeKind::Global);
    let mangling = tree.find_child(root, NodeKind::TypeMangling);
    assert!(mangling.is_some());
    assert_eq!(tree.find_child(root, NodeKind::Suffix), None);
    assert_eq!(
        tree.spine(),
        vec![
            NodeKind::Global,
            NodeKind::TypeMangling,
            NodeKind::Type,
            NodeKind::BuiltinTypeName
        ]
    );
    let leaf = tree.children(tree.children(mangling.unwrap_or(root))[0])[0];
    assert_eq!(leaf.index(), 3);
    assert_eq!(tree.text(leaf).as_deref(), Some("Builtin.Word"));
    assert_eq!(tree.index(leaf), None);
    assert_eq!(tree.child(leaf, 0), None);
}

#[test]
fn deep_trees_compare_and_print_without_recursion() {
    fn chain(len: usize) -> SymbolTree {
        let mut arena = NodeArena::new();
        let root = arena.alloc(NodeKind::Type);
        let mut parent = root;
        for _ in 0..len {
            let child = arena.alloc(NodeKind::Type);
            arena.add_child(parent, child);
            parent = child;
        }
        SymbolTree::new(arena, root)
    }
    assert!(chain(100_000) == chain(100_000));
    assert_eq!(chain(2_000).to_string().lines().count(), 2_001);
}

/// Each level is a `Type` whose two children are both the level below, so
/// a fully expanded dump doubles with every level.
fn doubling(levels: usize, leaf: &str) -> SymbolTree {
    let mut arena = NodeArena::new();
    let mut below: NodeId = arena.alloc_text(NodeKind::Identifier, leaf);
    for _ in 0..levels {
        let node = arena.alloc(NodeKind::Type);
        arena.add_child(node, below);
        arena.add_child(node, below);
        below = node;
    }
    SymbolTree::new(arena, below)
}

#[test]
fn small_shared_subtrees_print_in_full() {
    assert_eq!(
        doubling(1, "A").to_string(),
        "kind=Type\n  kind=Identifier, text=\"A\"\n  kind=Identifier, text=\"A\"\n"
    );
}

#[test]
fn large_shared_subtrees_print_as_back_references() {
    let dump = doubling(40, "A").to_string();
    // 41 nodes printed once each, plus one `ref` line per repeated child.
    assert_eq!(dump.lines().count(), 81);
    assert_eq!(dump.lines().filter(|line| line.contains(", ref=")).count(), 40);
    assert_eq!(dump.lines().nth(1), Some("  kind=Type, id=39"));
    assert_eq!(dump.lines().last(), Some("  kind=Type, ref=39"));
}

#[test]
fn equality_compares_shared_subtrees_once() {
    assert_eq!(doubling(64, "A"), doubling(64, "A"));
    assert_ne!(doubling(64, "A"), doubling(64, "B"));
}

#[test]
fn cycles_terminate() {
    let mut arena = NodeArena::new();
    let outer = arena.alloc(NodeKind::Type);
    let inner = arena.alloc(NodeKind::Type);
    arena.add_child(outer, inner);
    arena.add_child(inner, outer);
    let tree = SymbolTree::new(arena, outer);
    assert_eq!(
        tree.to_string(),
        "kind=Type, id=0\n  kind=Type\n    kind=Type, ref=0\n"
    );
    assert_eq!(tree, tree.clone());
}

#[test]
fn symbol_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SymbolTree>();
}
