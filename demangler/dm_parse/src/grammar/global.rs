//! Global symbols: everything that may follow the `_T` prefix.

use dm_tree::{Directness, NodeId, NodeKind, ValueWitnessKind};

use crate::Demangler;

/// Metadata kinds introduced by `M` and a second letter. Each wraps a type.
const METADATA_KINDS: [(u8, NodeKind); 6] = [
    (b'P', NodeKind::GenericTypeMetadataPattern),
    (b'a', NodeKind::TypeMetadataAccessFunction),
    (b'L', NodeKind::TypeMetadataLazyCache),
    (b'm', NodeKind::Metaclass),
    (b'n', NodeKind::NominalTypeDescriptor),
    (b'f', NodeKind::FullTypeMetadata),
];

impl Demangler<'_> {
    /// ```text
    /// global ::= 'M' metadata
    ///        ::= 'PA' 'o'? ('__T' global)?   // partial application forwarder
    ///        ::= 't' type
    ///        ::= 'w' value-witness-kind type
    ///        ::= 'W' witness
    ///        ::= 'T' thunk
    ///        ::= entity
    /// ```
    pub(crate) fn global(&mut self) -> Option<NodeId> {
        self.descend(|this| {
            if this.cursor.is_eof() {
                return None;
            }
            match this.cursor.peek() {
                b'M' => {
                    this.cursor.next_byte();
                    this.metadata()
                }
                b'P' if this.cursor.peek_at(1) == b'A' => {
                    this.cursor.eat_str("PA");
                    this.partial_apply_forwarder()
                }
                b't' => {
                    this.cursor.next_byte();
                    this.wrap_type(NodeKind::TypeMangling)
                }
                b'w' => {
                    this.cursor.next_byte();
                    let code = [this.cursor.next_byte(), this.cursor.next_byte()];
                    let Some(kind) = ValueWitnessKind::from_code(code) else {
                        tracing::trace!(?code, "unknown value witness");
                        return None;
                    };
                    let witness = this.index_node(NodeKind::ValueWitness, kind.index());
                    let ty = this.ty()?;
                    this.add_child(witness, ty);
                    Some(witness)
                }
                b'W' => {
                    this.cursor.next_byte();
                    this.witness()
                }
                b'T' => {
                    this.cursor.next_byte();
                    this.thunk()
                }
                _ => this.entity(),
            }
        })
    }

    /// `kind` node with one `type` child.
    fn wrap_type(&mut self, kind: NodeKind) -> Option<NodeId> {
        let ty = self.ty()?;
        Some(self.node_with(kind, &[ty]))
    }

    /// Metadata, after the `M`.
    fn metadata(&mut self) -> Option<NodeId> {
        let next = self.cursor.peek();
        if let Some(&(_, kind)) = METADATA_KINDS.iter().find(|(code, _)| *code == next) {
            self.cursor.next_byte();
            return self.wrap_type(kind);
        }
        if self.cursor.eat(b'p') {
            let protocol = self.protocol_name()?;
            return Some(self.node_with(NodeKind::ProtocolDescriptor, &[protocol]));
        }
        self.wrap_type(NodeKind::TypeMetadata)
    }

    /// Partial application forwarder, after the `PA`. The forwarded
    /// function, when mangled, is a complete nested global.
    fn partial_apply_forwarder(&mut self) -> Option<NodeId> {
        let kind = if self.cursor.eat(b'o') {
            NodeKind::PartialApplyObjCForwarder
        } else {
            NodeKind::PartialApplyForwarder
        };
        let forwarder = self.node(kind);
        if self.cursor.eat_str("__T") {
            let target = self.global()?;
            self.add_child(forwarder, target);
        }
        Some(forwarder)
    }

    /// Witness tables and offsets, after the `W`.
    fn witness(&mut self) -> Option<NodeId> {
        match self.cursor.next_byte() {
            b'V' => self.wrap_type(NodeKind::ValueWitnessTable),
            b'v' => {
                let directness = Directness::from_code(self.cursor.next_byte())?;
                let directness = self.index_node(NodeKind::Directness, directness.index());
                let entity = self.entity()?;
                Some(self.node_with(NodeKind::FieldOffset, &[directness, entity]))
            }
            b'P' => self.wrap_conformance(NodeKind::ProtocolWitnessTable),
            b'G' => self.wrap_conformance(NodeKind::GenericProtocolWitnessTable),
            b'I' => self.wrap_conformance(
                NodeKind::GenericProtocolWitnessTableInstantiationFunction,
            ),
            b'a' => self.wrap_conformance(NodeKind::ProtocolWitnessTableAccessor),
            b'l' => self.typed_conformance(NodeKind::LazyProtocolWitnessTableAccessor),
            b'L' => self.typed_conformance(NodeKind::LazyProtocolWitnessTableCacheVariable),
            b't' => {
                let conformance = self.protocol_conformance()?;
                let name = self.decl_name()?;
                Some(self.node_with(
                    NodeKind::AssociatedTypeMetadataAccessor,
                    &[conformance, name],
                ))
            }
            b'T' => {
                let conformance = self.protocol_conformance()?;
                let name = self.decl_name()?;
                let protocol = self.protocol_name()?;
                Some(self.node_with(
                    NodeKind::AssociatedTypeWitnessTableAccessor,
                    &[conformance, name, protocol],
                ))
            }
            _ => None,
        }
    }

    fn wrap_conformance(&mut self, kind: NodeKind) -> Option<NodeId> {
        let conformance = self.protocol_conformance()?;
        Some(self.node_with(kind, &[conformance]))
    }

    /// `type protocol-conformance`
    fn typed_conformance(&mut self, kind: NodeKind) -> Option<NodeId> {
        let ty = self.ty()?;
        let conformance = self.protocol_conformance()?;
        Some(self.node_with(kind, &[ty, conformance]))
    }

    /// Thunks, after the `T`.
    fn thunk(&mut self) -> Option<NodeId> {
        match self.cursor.next_byte() {
            code @ (b'R' | b'r') => {
                let thunk = self.node(if code == b'R' {
                    NodeKind::ReabstractionThunkHelper
                } else {
                    NodeKind::ReabstractionThunk
                });
                if self.cursor.eat(b'G') {
                    let signature = self.generic_signature(false)?;
                    self.add_child(thunk, signature);
                }
                let from = self.ty()?;
                self.add_child(thunk, from);
                let to = self.ty()?;
                self.add_child(thunk, to);
                Some(thunk)
            }
            b'W' => {
                let conformance = self.protocol_conformance()?;
                let entity = self.entity()?;
                Some(self.node_with(NodeKind::ProtocolWitness, &[conformance, entity]))
            }
            _ => None,
        }
    }
}
