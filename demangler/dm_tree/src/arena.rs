//! Arena storage for symbol-tree nodes.
//!
//! All nodes of one decode live in a single `Vec`; children are stored as
//! `NodeId` lists inline in their parent. Nodes are only ever appended to,
//! so an ID stays valid for the life of the arena.

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::NodeKind;

/// Index into a [`NodeArena`].
///
/// An ID is only meaningful for the arena that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Data attached to a node besides its kind and children.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Payload {
    #[default]
    None,
    /// Raw identifier bytes. Usually UTF-8, but symbols recovered from
    /// corrupted memory are not guaranteed to be.
    Text(Box<[u8]>),
    Index(u64),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    payload: Payload,
    /// Most nodes have at most a handful of children.
    children: SmallVec<[NodeId; 4]>,
}

/// Contiguous storage for every node of one decoded symbol.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity based on the mangled length.
    /// Heuristic: roughly one node per two bytes of input.
    pub fn with_capacity(input_len: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(input_len / 2),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by the length of one symbol"
    )]
    fn push(&mut self, kind: NodeKind, payload: Payload) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            payload,
            children: SmallVec::new(),
        });
        id
    }

    // ===== Allocation =====

    /// Allocate a node with no payload.
    #[inline]
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.push(kind, Payload::None)
    }

    /// Allocate a node carrying text.
    #[inline]
    pub fn alloc_text(&mut self, kind: NodeKind, text: impl AsRef<[u8]>) -> NodeId {
        self.push(kind, Payload::Text(Box::from(text.as_ref())))
    }

    /// Allocate a node carrying an integer.
    #[inline]
    pub fn alloc_index(&mut self, kind: NodeKind, index: u64) -> NodeId {
        self.push(kind, Payload::Index(index))
    }

    /// Append `child` to the child list of `parent`.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.index()].children.push(child);
    }

    // ===== Access =====

    /// Kind of a node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    #[inline]
    #[track_caller]
    pub fn payload(&self, id: NodeId) -> &Payload {
        &self.nodes[id.index()].payload
    }

    /// Text payload as raw bytes.
    pub fn text_bytes(&self, id: NodeId) -> Option<&[u8]> {
        match self.payload(id) {
            Payload::Text(bytes) => Some(&bytes[..]),
            _ => None,
        }
    }

    /// Text payload as a string, replacing invalid UTF-8.
    pub fn text(&self, id: NodeId) -> Option<Cow<'_, str>> {
        self.text_bytes(id).map(String::from_utf8_lossy)
    }

    /// Integer payload.
    pub fn index(&self, id: NodeId) -> Option<u64> {
        match *self.payload(id) {
            Payload::Index(index) => Some(index),
            _ => None,
        }
    }

    #[inline]
    #[track_caller]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// The `n`th child, if there is one.
    pub fn child(&self, id: NodeId, n: usize) -> Option<NodeId> {
        self.children(id).get(n).copied()
    }

    #[inline]
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Number of allocated nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
