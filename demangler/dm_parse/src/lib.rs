//! Recursive-descent decoder for legacy `_T` mangled symbols.
//!
//! Produces a [`SymbolTree`] rooted at a `Global` node (full symbols) or a
//! `Type` node (bare types). Any malformed input yields `None`; the decoder
//! never panics and never loops, whatever bytes it is given.
//!
//! ```text
//! _TtBf32_  →  Global
//!                TypeMangling
//!                  Type
//!                    BuiltinTypeName "Builtin.FPIEEE32"
//! ```

mod driver;
mod grammar;
pub mod substitution;

#[cfg(test)]
mod test_support;

use dm_cursor::Cursor;
use dm_stack::ensure_sufficient_stack;
use dm_tree::{NodeArena, NodeId, NodeKind, SymbolTree};

use crate::substitution::SubstitutionTable;

/// Default nesting limit for guarded productions.
pub const MAX_DEPTH: u32 = 1024;

/// Decoder configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum nesting of guarded productions (types, contexts, nested
    /// globals, archetype chains) before the decode fails.
    pub max_depth: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: MAX_DEPTH,
        }
    }
}

/// Decode a complete mangled symbol.
pub fn demangle_symbol(symbol: &str) -> Option<SymbolTree> {
    demangle_symbol_with(symbol, Options::default())
}

/// Decode a bare type mangling (no `_T` prefix). Trailing bytes are ignored.
pub fn demangle_type(mangled: &str) -> Option<SymbolTree> {
    demangle_type_with(mangled, Options::default())
}

pub fn demangle_symbol_with(symbol: &str, options: Options) -> Option<SymbolTree> {
    demangle_symbol_bytes(symbol.as_bytes(), options)
}

/// Decode a symbol that may not be valid UTF-8, such as one recovered from
/// a corrupted stack.
#[tracing::instrument(level = "debug", skip_all, fields(len = symbol.len()))]
pub fn demangle_symbol_bytes(symbol: &[u8], options: Options) -> Option<SymbolTree> {
    let mut demangler = Demangler::new(symbol, options);
    let tree = demangler.top_level().map(|root| demangler.finish(root));
    report(tree.as_ref());
    tree
}

pub fn demangle_type_with(mangled: &str, options: Options) -> Option<SymbolTree> {
    demangle_type_bytes(mangled.as_bytes(), options)
}

/// Decode a bare type mangling that may not be valid UTF-8.
#[tracing::instrument(level = "debug", skip_all, fields(len = mangled.len()))]
pub fn demangle_type_bytes(mangled: &[u8], options: Options) -> Option<SymbolTree> {
    let mut demangler = Demangler::new(mangled, options);
    let tree = demangler.ty().map(|root| demangler.finish(root));
    report(tree.as_ref());
    tree
}

fn report(tree: Option<&SymbolTree>) {
    match tree {
        Some(tree) => tracing::debug!(nodes = tree.arena().len(), "decoded"),
        None => tracing::debug!("rejected"),
    }
}

/// Parser state for one decode.
///
/// Grammar productions are methods on this type spread across the
/// `grammar` modules. Each returns `Option<NodeId>`; `None` aborts the
/// whole decode, since consumed input is never given back.
pub(crate) struct Demangler<'a> {
    cursor: Cursor<'a>,
    arena: NodeArena,
    subs: SubstitutionTable,
    depth: u32,
    max_depth: u32,
}

impl<'a> Demangler<'a> {
    fn new(input: &'a [u8], options: Options) -> Self {
        Demangler {
            cursor: Cursor::from_bytes(input),
            arena: NodeArena::with_capacity(input.len()),
            subs: SubstitutionTable::new(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn finish(self, root: NodeId) -> SymbolTree {
        SymbolTree::new(self.arena, root)
    }

    /// Run a recursive production one nesting level deeper.
    ///
    /// Fails once `max_depth` levels are active, and grows the native stack
    /// when it runs low so that the limit is what stops deep input.
    fn descend<R>(&mut self, f: impl FnOnce(&mut Self) -> Option<R>) -> Option<R> {
        if self.depth >= self.max_depth {
            tracing::trace!(depth = self.depth, "nesting limit reached");
            return None;
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    // ===== Node construction =====

    #[inline]
    fn node(&mut self, kind: NodeKind) -> NodeId {
        self.arena.alloc(kind)
    }

    /// Allocate a node whose children are already built.
    fn node_with(&mut self, kind: NodeKind, children: &[NodeId]) -> NodeId {
        let id = self.arena.alloc(kind);
        for &child in children {
            self.arena.add_child(id, child);
        }
        id
    }

    #[inline]
    fn text_node(&mut self, kind: NodeKind, text: impl AsRef<[u8]>) -> NodeId {
        self.arena.alloc_text(kind, text)
    }

    #[inline]
    fn index_node(&mut self, kind: NodeKind, index: u64) -> NodeId {
        self.arena.alloc_index(kind, index)
    }

    #[inline]
    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.arena.add_child(parent, child);
    }

    /// Wrap `inner` in a `Type` node.
    #[inline]
    fn type_node(&mut self, inner: NodeId) -> NodeId {
        self.node_with(NodeKind::Type, &[inner])
    }

    #[inline]
    fn kind(&self, id: NodeId) -> NodeKind {
        self.arena.kind(id)
    }
}
