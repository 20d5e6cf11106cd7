//! A finished symbol tree.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{NodeArena, NodeId, NodeKind, Payload};

/// Most lines a dump prints before shared subtrees collapse to
/// back-references.
pub const DUMP_EXPANSION_LIMIT: u64 = 1 << 16;

/// A decoded symbol: the arena that holds its nodes plus the root.
///
/// Read access goes through the tree so callers never see a `NodeId`
/// detached from the arena it indexes.
#[derive(Clone, Debug)]
pub struct SymbolTree {
    arena: NodeArena,
    root: NodeId,
}

impl SymbolTree {
    pub fn new(arena: NodeArena, root: NodeId) -> Self {
        SymbolTree { arena, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.arena.kind(id)
    }

    #[inline]
    pub fn text(&self, id: NodeId) -> Option<Cow<'_, str>> {
        self.arena.text(id)
    }

    #[inline]
    pub fn index(&self, id: NodeId) -> Option<u64> {
        self.arena.index(id)
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.arena.children(id)
    }

    #[inline]
    pub fn child(&self, id: NodeId, n: usize) -> Option<NodeId> {
        self.arena.child(id, n)
    }

    /// First direct child of `id` with the given kind.
    pub fn find_child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// Kinds along the path of first children starting at the root.
    ///
    /// Handy for asserting the spine of a tree without spelling out every
    /// payload.
    pub fn spine(&self) -> Vec<NodeKind> {
        let mut kinds = vec![self.kind(self.root)];
        let mut current = self.root;
        while let Some(next) = self.child(current, 0) {
            kinds.push(self.kind(next));
            current = next;
        }
        kinds
    }

    /// Lines a fully expanded dump would print, saturating at `u64::MAX`.
    fn expanded_lines(&self) -> u64 {
        let mut lines: FxHashMap<NodeId, u64> = FxHashMap::default();
        let mut pending = vec![(self.root, false)];
        while let Some((id, children_done)) = pending.pop() {
            if children_done {
                let total = self.children(id).iter().fold(1u64, |total, child| {
                    total.saturating_add(lines.get(child).copied().unwrap_or(u64::MAX))
                });
                lines.insert(id, total);
            } else if let Entry::Vacant(slot) = lines.entry(id) {
                // Placeholder while the children are summed. A cycle reads it
                // back and saturates.
                slot.insert(u64::MAX);
                pending.push((id, true));
                pending.extend(self.children(id).iter().map(|&child| (child, false)));
            }
        }
        lines.get(&self.root).copied().unwrap_or(u64::MAX)
    }

    /// Nodes reached through more than one edge. The root counts one edge
    /// of its own, so a cycle back to it marks it shared.
    fn shared_nodes(&self) -> FxHashSet<NodeId> {
        let mut parents: FxHashMap<NodeId, u32> = FxHashMap::default();
        parents.insert(self.root, 1);
        let mut seen = FxHashSet::default();
        let mut pending = vec![self.root];
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            for &child in self.children(id) {
                let count = parents.entry(child).or_default();
                *count = count.saturating_add(1);
                pending.push(child);
            }
        }
        parents
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Structural equality: same shape, kinds and payloads.
///
/// Walks both trees with an explicit stack so arbitrarily deep trees
/// compare without recursion. Substitutions make a node the child of more
/// than one parent, so each pair of nodes is compared at most once.
impl PartialEq for SymbolTree {
    fn eq(&self, other: &Self) -> bool {
        let mut seen = FxHashSet::default();
        let mut pending = vec![(self.root, other.root)];
        while let Some((a, b)) = pending.pop() {
            if !seen.insert((a, b)) {
                continue;
            }
            if self.arena.kind(a) != other.arena.kind(b)
                || self.arena.payload(a) != other.arena.payload(b)
            {
                return false;
            }
            let (left, right) = (self.arena.children(a), other.arena.children(b));
            if left.len() != right.len() {
                return false;
            }
            pending.extend(left.iter().copied().zip(right.iter().copied()));
        }
        true
    }
}

impl Eq for SymbolTree {}

/// Indented node dump, one node per line:
///
/// ```text
/// kind=Global
///   kind=TypeMangling
///     kind=Type
///       kind=BuiltinTypeName, text="Builtin.FPIEEE32"
/// ```
///
/// Shared subtrees are printed in full at every use while the whole dump
/// stays within [`DUMP_EXPANSION_LIMIT`] lines. Past that, a node reachable
/// from several parents is printed once with `id=<n>` and every later use
/// collapses to a single `ref=<n>` line.
impl fmt::Display for SymbolTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = if self.expanded_lines() > DUMP_EXPANSION_LIMIT {
            self.shared_nodes()
        } else {
            FxHashSet::default()
        };
        let mut printed = FxHashSet::default();
        let mut pending = vec![(self.root, 0usize)];
        while let Some((id, depth)) = pending.pop() {
            write!(f, "{:indent$}kind={}", "", self.kind(id), indent = depth * 2)?;
            match self.arena.payload(id) {
                Payload::None => {}
                Payload::Text(bytes) => {
                    write!(f, ", text=\"{}\"", String::from_utf8_lossy(bytes))?;
                }
                Payload::Index(index) => write!(f, ", index={index}")?,
            }
            if shared.contains(&id) {
                if !printed.insert(id) {
                    writeln!(f, ", ref={}", id.raw())?;
                    continue;
                }
                write!(f, ", id={}", id.raw())?;
            }
            writeln!(f)?;
            pending.extend(self.children(id).iter().rev().map(|&c| (c, depth + 1)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
