//! Type productions.
//!
//! `type ::= type-impl`, wrapped in a `Type` node. `type-impl` dispatches on
//! its first byte; every other production that needs a type comes through
//! here, which makes `type_impl` the main recursion guard.

use std::borrow::Cow;

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

impl Demangler<'_> {
    /// `type`, wrapped in a `Type` node.
    pub(crate) fn ty(&mut self) -> Option<NodeId> {
        let inner = self.type_impl()?;
        Some(self.type_node(inner))
    }

    fn type_impl(&mut self) -> Option<NodeId> {
        self.descend(|this| {
            if this.cursor.is_eof() {
                return None;
            }
            match this.cursor.next_byte() {
                b'B' => this.builtin_type(),
                b'a' => this.declaration_name(NodeKind::TypeAlias),
                b'b' => this.function_type(NodeKind::ObjCBlock),
                b'c' => this.function_type(NodeKind::CFunctionPointer),
                b'F' => this.function_type(NodeKind::FunctionType),
                b'f' => this.function_type(NodeKind::UncurriedFunctionType),
                b'K' => this.function_type(NodeKind::AutoClosureType),
                b'D' => this.wrapped_type(NodeKind::DynamicSelf),
                b'M' => this.wrapped_type(NodeKind::Metatype),
                b'E' => {
                    if !this.cursor.eat_str("RR") {
                        return None;
                    }
                    Some(this.text_node(NodeKind::ErrorType, ""))
                }
                b'G' => this.bound_generic_type(),
                b'P' => {
                    if this.cursor.eat(b'M') {
                        return this.wrapped_type(NodeKind::ExistentialMetatype);
                    }
                    this.protocol_list()
                }
                b'Q' => this.archetype(),
                b'q' => this.dependent_type(),
                b'x' => Some(this.generic_param_type(0, 0)),
                b'w' => this.associated_type_simple(),
                b'W' => this.associated_type_compound(),
                b'R' => {
                    // `inout` applies to the bare type, without a `Type` wrapper.
                    let inner = this.type_impl()?;
                    Some(this.node_with(NodeKind::InOut, &[inner]))
                }
                b'S' => this.substitution(),
                b'T' => this.tuple(false),
                b't' => this.tuple(true),
                b'u' => {
                    let signature = this.generic_signature(false)?;
                    let ty = this.ty()?;
                    Some(this.node_with(NodeKind::DependentGenericType, &[signature, ty]))
                }
                b'X' => this.extended_type(),
                b'C' => this.declaration_name(NodeKind::Class),
                b'V' => this.declaration_name(NodeKind::Structure),
                b'O' => this.declaration_name(NodeKind::Enum),
                _ => None,
            }
        })
    }

    /// `kind` with a single `type` child.
    fn wrapped_type(&mut self, kind: NodeKind) -> Option<NodeId> {
        let ty = self.ty()?;
        Some(self.node_with(kind, &[ty]))
    }

    /// Everything after `X`.
    fn extended_type(&mut self) -> Option<NodeId> {
        match self.cursor.next_byte() {
            b'b' => self.wrapped_type(NodeKind::SILBoxType),
            b'B' => self.sil_box_with_layout(),
            b'M' => self.metatype_with_representation(NodeKind::Metatype),
            b'P' => {
                if self.cursor.eat(b'M') {
                    return self.metatype_with_representation(NodeKind::ExistentialMetatype);
                }
                self.protocol_list()
            }
            b'f' => self.function_type(NodeKind::ThinFunctionType),
            b'o' => self.wrapped_type(NodeKind::Unowned),
            b'u' => self.wrapped_type(NodeKind::Unmanaged),
            b'w' => self.wrapped_type(NodeKind::Weak),
            b'F' => self.impl_function_type(),
            _ => None,
        }
    }

    fn metatype_with_representation(&mut self, kind: NodeKind) -> Option<NodeId> {
        let representation = match self.cursor.next_byte() {
            b't' => "@thin",
            b'T' => "@thick",
            b'o' => "@objc_metatype",
            _ => return None,
        };
        let representation = self.text_node(NodeKind::MetatypeRepresentation, representation);
        let ty = self.ty()?;
        Some(self.node_with(kind, &[representation, ty]))
    }

    /// `natural '_'`
    fn builtin_size(&mut self) -> Option<u64> {
        let size = self.natural()?;
        self.cursor.eat(b'_').then_some(size)
    }

    /// Builtin types, after the `B`.
    fn builtin_type(&mut self) -> Option<NodeId> {
        let name: Cow<'static, str> = match self.cursor.next_byte() {
            b'b' => "Builtin.BridgeObject".into(),
            b'B' => "Builtin.UnsafeValueBuffer".into(),
            b'f' => format!("Builtin.FPIEEE{}", self.builtin_size()?).into(),
            b'i' => format!("Builtin.Int{}", self.builtin_size()?).into(),
            b'v' => {
                let elements = self.natural()?;
                if !self.cursor.eat(b'B') {
                    return None;
                }
                let vector = match self.cursor.next_byte() {
                    b'i' => format!("Builtin.Vec{elements}xInt{}", self.builtin_size()?),
                    b'f' => format!("Builtin.Vec{elements}xFloat{}", self.builtin_size()?),
                    b'p' => format!("Builtin.Vec{elements}xRawPointer"),
                    _ => return None,
                };
                vector.into()
            }
            b'O' => "Builtin.UnknownObject".into(),
            b'o' => "Builtin.NativeObject".into(),
            b'p' => "Builtin.RawPointer".into(),
            b't' => "Builtin.SILToken".into(),
            b'w' => "Builtin.Word".into(),
            _ => return None,
        };
        Some(self.text_node(NodeKind::BuiltinTypeName, name.as_bytes()))
    }

    /// `function-type ::= 'z'? type type`
    pub(crate) fn function_type(&mut self, kind: NodeKind) -> Option<NodeId> {
        let throws = self.cursor.eat(b'z');
        let input = self.ty()?;
        let output = self.ty()?;

        let function = self.node(kind);
        if throws {
            let annotation = self.node(NodeKind::ThrowsAnnotation);
            self.add_child(function, annotation);
        }
        let arguments = self.node_with(NodeKind::ArgumentTuple, &[input]);
        self.add_child(function, arguments);
        let result = self.node_with(NodeKind::ReturnType, &[output]);
        self.add_child(function, result);
        Some(function)
    }

    /// `tuple ::= (label? type)* '_'`
    ///
    /// In a variadic tuple the last element carries a trailing
    /// `VariadicMarker`.
    fn tuple(&mut self, variadic: bool) -> Option<NodeId> {
        let tuple = self.node(NodeKind::Tuple);
        let mut last = None;
        while !self.cursor.eat(b'_') {
            if self.cursor.is_eof() {
                return None;
            }
            let element = self.node(NodeKind::TupleElement);
            if self.cursor.at_digit() || self.cursor.peek() == b'o' {
                let label = self.identifier(Some(NodeKind::TupleElementName))?;
                self.add_child(element, label);
            }
            let ty = self.ty()?;
            self.add_child(element, ty);
            self.add_child(tuple, element);
            last = Some(element);
        }
        if let (true, Some(element)) = (variadic, last) {
            let marker = self.node(NodeKind::VariadicMarker);
            self.add_child(element, marker);
        }
        Some(tuple)
    }

    /// Associated type reference rooted at an archetype (`Q`), a
    /// substitution (`S`) or the standard library (`s`).
    fn archetype(&mut self) -> Option<NodeId> {
        self.descend(|this| {
            let root = match this.cursor.next_byte() {
                b'Q' => this.archetype()?,
                b'S' => this.substitution()?,
                b's' => this.stdlib_module(),
                _ => return None,
            };
            let name = this.identifier(None)?;
            let assoc = this.node_with(NodeKind::AssociatedTypeRef, &[root, name]);
            this.subs.push(assoc);
            Some(assoc)
        })
    }
}
