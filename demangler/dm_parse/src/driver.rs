//! Top-level symbol decoding.
//!
//! ```text
//! symbol ::= '_T' global suffix?
//!        ::= '_T' thunk-marker global suffix?
//!        ::= '_TTS' specialization ('_TTS' specialization)* '_T' global suffix?
//! ```
//!
//! Every specialization block starts from an empty substitution table, and
//! so does the global that follows them.

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

/// Single-letter attributes between `_T` and the global.
const THUNK_MARKERS: [(&str, NodeKind); 5] = [
    ("To", NodeKind::ObjCAttribute),
    ("TO", NodeKind::NonObjCAttribute),
    ("TD", NodeKind::DynamicAttribute),
    ("Td", NodeKind::DirectMethodReferenceAttribute),
    ("TV", NodeKind::VTableAttribute),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    AwaitGlobalPrefix,
    AwaitSpecializationOrThunkPrefix,
    ParsingGlobal,
    Done,
    Failed,
}

impl Demangler<'_> {
    /// Decode a complete symbol into a `Global` node.
    pub(crate) fn top_level(&mut self) -> Option<NodeId> {
        let root = self.node(NodeKind::Global);
        let mut state = DriverState::AwaitGlobalPrefix;

        loop {
            state = match state {
                DriverState::AwaitGlobalPrefix => {
                    if self.cursor.eat_str("_T") {
                        DriverState::AwaitSpecializationOrThunkPrefix
                    } else {
                        tracing::trace!("missing _T prefix");
                        DriverState::Failed
                    }
                }
                DriverState::AwaitSpecializationOrThunkPrefix => {
                    if self.cursor.eat_str("TS") {
                        self.specializations(root)
                    } else {
                        self.thunk_marker(root);
                        DriverState::ParsingGlobal
                    }
                }
                DriverState::ParsingGlobal => match self.global() {
                    Some(global) => {
                        self.add_child(root, global);
                        DriverState::Done
                    }
                    None => DriverState::Failed,
                },
                DriverState::Done => break,
                DriverState::Failed => return None,
            };
        }

        if !self.cursor.is_eof() {
            let suffix = self.cursor.take_rest();
            tracing::trace!(len = suffix.len(), "keeping unparsed suffix");
            let suffix = self.text_node(NodeKind::Suffix, suffix);
            self.add_child(root, suffix);
        }
        Some(root)
    }

    /// Specialization blocks, after the first `_TTS`, up to and including
    /// the `_T` that introduces the global.
    fn specializations(&mut self, root: NodeId) -> DriverState {
        loop {
            self.subs.reset();
            let Some(attribute) = self.specialized_attribute() else {
                return DriverState::Failed;
            };
            self.add_child(root, attribute);
            if !self.cursor.eat_str("_TTS") {
                break;
            }
        }
        self.subs.reset();
        if self.cursor.eat_str("_T") {
            DriverState::ParsingGlobal
        } else {
            tracing::trace!("specialization not followed by _T");
            DriverState::Failed
        }
    }

    fn thunk_marker(&mut self, root: NodeId) {
        let marker = THUNK_MARKERS
            .iter()
            .find(|(code, _)| self.cursor.rest().starts_with(code.as_bytes()));
        if let Some(&(code, kind)) = marker {
            self.cursor.eat_str(code);
            let attribute = self.node(kind);
            self.add_child(root, attribute);
        }
    }
}
