//! Specialization attributes, the blocks between `_TTS` and the next `_T`.
//!
//! ```text
//! specialization ::= 'g' header generic-param* '_'
//!                ::= 'r' header generic-param* '_'
//!                ::= 'f' header func-sig-param* '_'
//! header         ::= 'q'? pass-id
//! generic-param  ::= type protocol-conformance* '_'
//! ```

use dm_tree::{NodeId, NodeKind, SpecializationParamFlags, SpecializationParamKind};

use crate::Demangler;

impl Demangler<'_> {
    pub(crate) fn specialized_attribute(&mut self) -> Option<NodeId> {
        let (kind, is_generic) = match self.cursor.next_byte() {
            b'g' => (NodeKind::GenericSpecialization, true),
            b'r' => (NodeKind::GenericSpecializationNotReAbstracted, true),
            b'f' => (NodeKind::FunctionSignatureSpecialization, false),
            _ => return None,
        };
        let specialization = self.node(kind);

        if self.cursor.eat(b'q') {
            let serialized = self.node(NodeKind::IsSerialized);
            self.add_child(specialization, serialized);
        }
        if !self.cursor.at_digit() {
            tracing::trace!("specialization pass id is not a digit");
            return None;
        }
        let pass = u64::from(self.cursor.next_byte() - b'0');
        let pass = self.index_node(NodeKind::SpecializationPassID, pass);
        self.add_child(specialization, pass);

        if is_generic {
            while !self.cursor.eat(b'_') {
                let param = self.generic_specialization_param()?;
                self.add_child(specialization, param);
            }
        } else {
            let mut count = 0;
            while !self.cursor.eat(b'_') {
                let param = self.func_sig_specialization_param(count)?;
                self.add_child(specialization, param);
                count += 1;
            }
        }
        Some(specialization)
    }

    fn generic_specialization_param(&mut self) -> Option<NodeId> {
        let ty = self.ty()?;
        let param = self.node_with(NodeKind::GenericSpecializationParam, &[ty]);
        while !self.cursor.eat(b'_') {
            let conformance = self.protocol_conformance()?;
            self.add_child(param, conformance);
        }
        Some(param)
    }

    fn param_kind(&mut self, kind: SpecializationParamKind) -> NodeId {
        self.index_node(NodeKind::FunctionSignatureSpecializationParamKind, kind.index())
    }

    fn param_payload(&mut self, text: impl AsRef<[u8]>) -> NodeId {
        self.text_node(NodeKind::FunctionSignatureSpecializationParamPayload, text)
    }

    /// ```text
    /// func-sig-param ::= 'n_'                          // unchanged
    ///                ::= 'cp' constant-prop
    ///                ::= 'cl' identifier type* '_'     // closure
    ///                ::= 'i_' | 'k_'                   // box to value, box to stack
    ///                ::= [dgos]+ '_'                   // flags
    /// ```
    fn func_sig_specialization_param(&mut self, count: u64) -> Option<NodeId> {
        let param = self.index_node(NodeKind::FunctionSignatureSpecializationParam, count);

        if self.cursor.eat_str("n_") {
            return Some(param);
        }

        if self.cursor.eat_str("cp") {
            self.constant_prop(param)?;
            return Some(param);
        }

        if self.cursor.eat_str("cl") {
            let closure = self.identifier(None)?;
            let name = self.arena.text_bytes(closure)?.to_vec();
            let kind = self.param_kind(SpecializationParamKind::ClosureProp);
            let payload = self.param_payload(name);
            self.add_child(param, kind);
            self.add_child(param, payload);
            while self.cursor.peek() != b'_' {
                match self.ty() {
                    Some(ty) => self.add_child(param, ty),
                    None => break,
                }
            }
            return self.cursor.eat(b'_').then_some(param);
        }

        for (code, kind) in [
            ("i_", SpecializationParamKind::BoxToValue),
            ("k_", SpecializationParamKind::BoxToStack),
        ] {
            if self.cursor.eat_str(code) {
                let kind = self.param_kind(kind);
                self.add_child(param, kind);
                return Some(param);
            }
        }

        let mut flags = SpecializationParamFlags::empty();
        for code in *b"dgos" {
            if self.cursor.eat(code) {
                flags |= SpecializationParamFlags::from_code(code)?;
            }
        }
        if flags.is_empty() || !self.cursor.eat(b'_') {
            return None;
        }
        let kind = self.index_node(
            NodeKind::FunctionSignatureSpecializationParamKind,
            flags.bits(),
        );
        self.add_child(param, kind);
        Some(param)
    }

    /// Constant propagation, after the `cp`. Adds the kind and payload
    /// children to `param`.
    fn constant_prop(&mut self, param: NodeId) -> Option<()> {
        if self.cursor.eat_str("fr") {
            return self.constant_prop_name(param, SpecializationParamKind::ConstantPropFunction);
        }
        if self.cursor.eat(b'g') {
            return self.constant_prop_name(param, SpecializationParamKind::ConstantPropGlobal);
        }
        if self.cursor.eat(b'i') {
            return self.constant_prop_literal(param, SpecializationParamKind::ConstantPropInteger);
        }
        if self.cursor.eat_str("fl") {
            return self.constant_prop_literal(param, SpecializationParamKind::ConstantPropFloat);
        }
        if self.cursor.eat_str("se") {
            let encoding = match self.cursor.next_byte() {
                b'0' => "u8",
                b'1' => "u16",
                _ => return None,
            };
            if !self.cursor.eat(b'v') {
                return None;
            }
            let literal = self.identifier(None)?;
            let text = self.arena.text_bytes(literal)?.to_vec();
            if !self.cursor.eat(b'_') {
                return None;
            }
            let kind = self.param_kind(SpecializationParamKind::ConstantPropString);
            let encoding = self.param_payload(encoding);
            let text = self.param_payload(text);
            self.add_child(param, kind);
            self.add_child(param, encoding);
            self.add_child(param, text);
            return Some(());
        }
        None
    }

    /// `identifier '_'`, kept as the payload text.
    fn constant_prop_name(&mut self, param: NodeId, kind: SpecializationParamKind) -> Option<()> {
        let name = self.identifier(None)?;
        let text = self.arena.text_bytes(name)?.to_vec();
        if !self.cursor.eat(b'_') {
            return None;
        }
        let kind = self.param_kind(kind);
        let payload = self.param_payload(text);
        self.add_child(param, kind);
        self.add_child(param, payload);
        Some(())
    }

    /// Raw literal text up to the next `_`.
    fn constant_prop_literal(
        &mut self,
        param: NodeId,
        kind: SpecializationParamKind,
    ) -> Option<()> {
        let (literal, found) = self.cursor.read_until(b'_');
        if !found {
            return None;
        }
        self.cursor.next_byte();
        let kind = self.param_kind(kind);
        let payload = self.param_payload(literal);
        self.add_child(param, kind);
        self.add_child(param, payload);
        Some(())
    }
}
