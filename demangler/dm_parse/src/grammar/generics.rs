//! Generic parameters, dependent types and generic signatures.

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

/// Display name of a generic parameter: the index in base 26 as `A`..`Z`,
/// least significant letter first, followed by the depth when non-zero.
fn generic_param_name(index: u64, depth: u64) -> String {
    let mut name = String::new();
    let mut rest = index;
    loop {
        let letter = u8::try_from(rest % 26).unwrap_or_default();
        name.push(char::from(b'A' + letter));
        rest /= 26;
        if rest == 0 {
            break;
        }
    }
    if depth != 0 {
        name.push_str(&depth.to_string());
    }
    name
}

impl Demangler<'_> {
    pub(crate) fn generic_param_type(&mut self, depth: u64, index: u64) -> NodeId {
        let name = generic_param_name(index, depth);
        let param = self.text_node(NodeKind::DependentGenericParamType, name);
        let depth = self.index_node(NodeKind::Index, depth);
        let index = self.index_node(NodeKind::Index, index);
        self.add_child(param, depth);
        self.add_child(param, index);
        param
    }

    /// ```text
    /// generic-param-index ::= 'x'             // depth 0, index 0
    ///                     ::= index           // depth 0, index n+1
    ///                     ::= 'd' index index // depth n+1, index
    /// ```
    fn generic_param_index(&mut self) -> Option<NodeId> {
        let (depth, index) = if self.cursor.eat(b'd') {
            let depth = self.index()?.checked_add(1)?;
            (depth, self.index()?)
        } else if self.cursor.eat(b'x') {
            (0, 0)
        } else {
            (0, self.index()?.checked_add(1)?)
        };
        Some(self.generic_param_type(depth, index))
    }

    /// Member of `base` (a `Type` node) named by an associated type.
    fn dependent_member_type(&mut self, base: NodeId) -> Option<NodeId> {
        let assoc = if self.cursor.eat(b'S') {
            let sub = self.substitution()?;
            if self.kind(sub) != NodeKind::DependentAssociatedTypeRef {
                return None;
            }
            sub
        } else {
            let protocol = if self.cursor.eat(b'P') {
                Some(self.protocol_name()?)
            } else {
                None
            };
            let assoc = self.identifier(Some(NodeKind::DependentAssociatedTypeRef))?;
            if let Some(protocol) = protocol {
                self.add_child(assoc, protocol);
            }
            self.subs.push(assoc);
            assoc
        };
        Some(self.node_with(NodeKind::DependentMemberType, &[base, assoc]))
    }

    /// `generic-param-index assoc-name`
    pub(crate) fn associated_type_simple(&mut self) -> Option<NodeId> {
        let param = self.generic_param_index()?;
        let base = self.type_node(param);
        self.dependent_member_type(base)
    }

    /// `generic-param-index assoc-name* '_'`
    pub(crate) fn associated_type_compound(&mut self) -> Option<NodeId> {
        let mut base = self.generic_param_index()?;
        while !self.cursor.eat(b'_') {
            let ty = self.type_node(base);
            base = self.dependent_member_type(ty)?;
        }
        Some(base)
    }

    /// Dependent type, after the `q`: a generic parameter, or a member of
    /// any other type.
    pub(crate) fn dependent_type(&mut self) -> Option<NodeId> {
        if self.cursor.is_eof() {
            return None;
        }
        let next = self.cursor.peek();
        if next != b'd' && next != b'_' && !next.is_ascii_digit() {
            let base = self.ty()?;
            return self.dependent_member_type(base);
        }
        self.generic_param_index()
    }

    /// The subject of a requirement. The `q` is left off generic params.
    fn constrained_type(&mut self) -> Option<NodeId> {
        let inner = if self.cursor.eat(b'w') {
            self.associated_type_simple()?
        } else if self.cursor.eat(b'W') {
            self.associated_type_compound()?
        } else {
            self.generic_param_index()?
        };
        Some(self.type_node(inner))
    }

    /// ```text
    /// generic-signature ::= (param-count)* ('r' | 'R' requirement* 'r')
    /// param-count       ::= 'z' | index       // 0 or n+1
    /// ```
    ///
    /// With no counts mangled there is exactly one parameter.
    pub(crate) fn generic_signature(&mut self, pseudogeneric: bool) -> Option<NodeId> {
        let signature = self.node(if pseudogeneric {
            NodeKind::DependentPseudogenericSignature
        } else {
            NodeKind::DependentGenericSignature
        });

        let mut saw_count = false;
        while !matches!(self.cursor.peek(), b'R' | b'r') {
            let count = if self.cursor.eat(b'z') {
                0
            } else {
                self.index()?.checked_add(1)?
            };
            let count = self.index_node(NodeKind::DependentGenericParamCount, count);
            self.add_child(signature, count);
            saw_count = true;
        }
        if !saw_count {
            let count = self.index_node(NodeKind::DependentGenericParamCount, 1);
            self.add_child(signature, count);
        }

        if self.cursor.eat(b'r') {
            return Some(signature);
        }
        if !self.cursor.eat(b'R') {
            return None;
        }
        while !self.cursor.eat(b'r') {
            let requirement = self.generic_requirement()?;
            self.add_child(signature, requirement);
        }
        Some(signature)
    }

    fn generic_requirement(&mut self) -> Option<NodeId> {
        let constrained = self.constrained_type()?;

        if self.cursor.eat(b'z') {
            let second = self.ty()?;
            return Some(self.node_with(
                NodeKind::DependentGenericSameTypeRequirement,
                &[constrained, second],
            ));
        }
        if self.cursor.eat(b'l') {
            return self.layout_requirement(constrained);
        }

        if self.cursor.is_eof() {
            return None;
        }
        // Superclass constraints start with a class type mangling (`C` or a
        // substitution); anything else names a protocol.
        let constraint = match self.cursor.peek() {
            b'C' => self.ty()?,
            b'S' => {
                self.cursor.next_byte();
                let sub = self.substitution()?;
                let name = match self.kind(sub) {
                    NodeKind::Protocol | NodeKind::Class => sub,
                    NodeKind::Module => self.protocol_in(sub)?,
                    _ => return None,
                };
                self.type_node(name)
            }
            _ => self.protocol_name()?,
        };
        Some(self.node_with(
            NodeKind::DependentGenericConformanceRequirement,
            &[constrained, constraint],
        ))
    }

    /// ```text
    /// layout ::= 'U' | 'R' | 'N' | 'T'
    ///        ::= 'E' size '_' alignment | 'M' size '_' alignment
    ///        ::= 'e' size | 'm' size
    /// ```
    fn layout_requirement(&mut self, constrained: NodeId) -> Option<NodeId> {
        let code = self.cursor.next_byte();
        let (size, alignment) = match code {
            b'U' | b'R' | b'N' | b'T' => (None, None),
            b'E' | b'M' => {
                let size = self.natural()?;
                if !self.cursor.eat(b'_') {
                    return None;
                }
                (Some(size), Some(self.natural()?))
            }
            b'e' | b'm' => (Some(self.natural()?), None),
            _ => return None,
        };

        let name = self.text_node(NodeKind::Identifier, [code]);
        let requirement = self.node_with(
            NodeKind::DependentGenericLayoutRequirement,
            &[constrained, name],
        );
        for value in [size, alignment].into_iter().flatten() {
            let number = self.index_node(NodeKind::Number, value);
            self.add_child(requirement, number);
        }
        Some(requirement)
    }
}
