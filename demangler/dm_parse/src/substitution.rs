//! Back-reference table for `S<index>` substitutions.
//!
//! Modules, declarations and associated-type references are recorded as
//! soon as they are built; a later `S_`, `S0_`, `S1_`... refers back to
//! them by position. Entries are `NodeId` copies, so a substituted node is
//! shared by every parent that references it.

use dm_tree::NodeId;

/// Append-only list of substitutable nodes for one decode.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionTable {
    entries: Vec<NodeId>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, id: NodeId) {
        self.entries.push(id);
    }

    /// Entry at a decoded substitution index.
    pub fn resolve(&self, index: u64) -> Option<NodeId> {
        let found = usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get(i))
            .copied();
        if found.is_none() {
            tracing::trace!(index, len = self.entries.len(), "substitution out of range");
        }
        found
    }

    /// Forget every entry. Specialization headers do not share
    /// substitutions with each other or with the symbol they prefix.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
