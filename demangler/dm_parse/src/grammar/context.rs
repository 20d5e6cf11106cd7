//! Substitutions, modules, contexts, entities and nominal types.

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

const STDLIB_NAME: &str = "Swift";
const OBJC_MODULE_NAME: &str = "__ObjC";
const CLANG_MODULE_NAME: &str = "__C";

/// Identifier that marks an accessor's storage as a subscript.
const SUBSCRIPT: &[u8] = b"subscript";

/// Standard-library types with a dedicated one-letter substitution.
const KNOWN_TYPES: [(u8, NodeKind, &str); 16] = [
    (b'a', NodeKind::Structure, "Array"),
    (b'b', NodeKind::Structure, "Bool"),
    (b'c', NodeKind::Structure, "UnicodeScalar"),
    (b'd', NodeKind::Structure, "Double"),
    (b'f', NodeKind::Structure, "Float"),
    (b'i', NodeKind::Structure, "Int"),
    (b'V', NodeKind::Structure, "UnsafeRawPointer"),
    (b'v', NodeKind::Structure, "UnsafeMutableRawPointer"),
    (b'P', NodeKind::Structure, "UnsafePointer"),
    (b'p', NodeKind::Structure, "UnsafeMutablePointer"),
    (b'q', NodeKind::Enum, "Optional"),
    (b'Q', NodeKind::Enum, "ImplicitlyUnwrappedOptional"),
    (b'R', NodeKind::Structure, "UnsafeBufferPointer"),
    (b'r', NodeKind::Structure, "UnsafeMutableBufferPointer"),
    (b'S', NodeKind::Structure, "String"),
    (b'u', NodeKind::Structure, "UInt"),
];

/// Name part of an entity, decoded after its context.
struct EntityName {
    kind: NodeKind,
    name: Option<NodeId>,
    has_type: bool,
    /// Accessors wrap a synthetic `Variable` or `Subscript` node.
    is_accessor: bool,
}

impl EntityName {
    fn plain(kind: NodeKind, name: Option<NodeId>, has_type: bool) -> Self {
        EntityName {
            kind,
            name,
            has_type,
            is_accessor: false,
        }
    }
}

fn accessor_kind(tag: u8) -> Option<NodeKind> {
    Some(match tag {
        b'g' => NodeKind::Getter,
        b'G' => NodeKind::GlobalGetter,
        b's' => NodeKind::Setter,
        b'm' => NodeKind::MaterializeForSet,
        b'w' => NodeKind::WillSet,
        b'W' => NodeKind::DidSet,
        b'r' => NodeKind::ReadAccessor,
        b'M' => NodeKind::ModifyAccessor,
        _ => return None,
    })
}

fn addressor_kind(mutable: bool, code: u8) -> Option<NodeKind> {
    Some(match (mutable, code) {
        (true, b'O') => NodeKind::OwningMutableAddressor,
        (true, b'o') => NodeKind::NativeOwningMutableAddressor,
        (true, b'p') => NodeKind::NativePinningMutableAddressor,
        (true, b'u') => NodeKind::UnsafeMutableAddressor,
        (false, b'O') => NodeKind::OwningAddressor,
        (false, b'o') => NodeKind::NativeOwningAddressor,
        (false, b'p') => NodeKind::NativePinningAddressor,
        (false, b'u') => NodeKind::UnsafeAddressor,
        _ => return None,
    })
}

impl Demangler<'_> {
    pub(crate) fn stdlib_module(&mut self) -> NodeId {
        self.text_node(NodeKind::Module, STDLIB_NAME)
    }

    /// `Swift.<name>` as a `kind` node.
    fn swift_type(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let module = self.stdlib_module();
        let name = self.text_node(NodeKind::Identifier, name);
        self.node_with(kind, &[module, name])
    }

    /// Substitution reference, after the `S` has been consumed.
    pub(crate) fn substitution(&mut self) -> Option<NodeId> {
        if self.cursor.is_eof() {
            return None;
        }
        if self.cursor.eat(b'o') {
            return Some(self.text_node(NodeKind::Module, OBJC_MODULE_NAME));
        }
        if self.cursor.eat(b'C') {
            return Some(self.text_node(NodeKind::Module, CLANG_MODULE_NAME));
        }
        let next = self.cursor.peek();
        if let Some(&(_, kind, name)) = KNOWN_TYPES.iter().find(|(code, ..)| *code == next) {
            self.cursor.next_byte();
            return Some(self.swift_type(kind, name));
        }
        let index = self.index()?;
        self.subs.resolve(index)
    }

    /// `module ::= 's' | 'S' substitution | identifier`
    pub(crate) fn module(&mut self) -> Option<NodeId> {
        if self.cursor.eat(b's') {
            return Some(self.stdlib_module());
        }
        if self.cursor.eat(b'S') {
            let module = self.substitution()?;
            return (self.kind(module) == NodeKind::Module).then_some(module);
        }
        let module = self.identifier(Some(NodeKind::Module))?;
        self.subs.push(module);
        Some(module)
    }

    /// `context decl-name`, as a substitutable `kind` node.
    pub(crate) fn declaration_name(&mut self, kind: NodeKind) -> Option<NodeId> {
        let context = self.context()?;
        let name = self.decl_name()?;
        let decl = self.node_with(kind, &[context, name]);
        self.subs.push(decl);
        Some(decl)
    }

    /// A protocol, wrapped in a `Type` node.
    pub(crate) fn protocol_name(&mut self) -> Option<NodeId> {
        let protocol = self.protocol_name_inner()?;
        Some(self.type_node(protocol))
    }

    fn protocol_name_inner(&mut self) -> Option<NodeId> {
        // `S` may name either the protocol itself or its module.
        if self.cursor.eat(b'S') {
            let sub = self.substitution()?;
            return match self.kind(sub) {
                NodeKind::Protocol => Some(sub),
                NodeKind::Module => self.protocol_in(sub),
                _ => None,
            };
        }
        if self.cursor.eat(b's') {
            let stdlib = self.stdlib_module();
            return self.protocol_in(stdlib);
        }
        self.declaration_name(NodeKind::Protocol)
    }

    /// Protocol declared directly in `context`.
    pub(crate) fn protocol_in(&mut self, context: NodeId) -> Option<NodeId> {
        let name = self.decl_name()?;
        let protocol = self.node_with(NodeKind::Protocol, &[context, name]);
        self.subs.push(protocol);
        Some(protocol)
    }

    /// `protocol-list ::= protocol-name* '_'`
    pub(crate) fn protocol_list(&mut self) -> Option<NodeId> {
        let types = self.node(NodeKind::TypeList);
        while !self.cursor.eat(b'_') {
            let protocol = self.protocol_name()?;
            self.add_child(types, protocol);
        }
        Some(self.node_with(NodeKind::ProtocolList, &[types]))
    }

    /// `protocol-conformance ::= type protocol-name context`
    pub(crate) fn protocol_conformance(&mut self) -> Option<NodeId> {
        let ty = self.ty()?;
        let protocol = self.protocol_name()?;
        let context = self.context()?;
        Some(self.node_with(NodeKind::ProtocolConformance, &[ty, protocol, context]))
    }

    pub(crate) fn nominal_type(&mut self) -> Option<NodeId> {
        let kind = match self.cursor.peek() {
            b'S' => {
                self.cursor.next_byte();
                return self.substitution();
            }
            b'V' => NodeKind::Structure,
            b'O' => NodeKind::Enum,
            b'C' => NodeKind::Class,
            b'P' => NodeKind::Protocol,
            _ => return None,
        };
        self.cursor.next_byte();
        self.declaration_name(kind)
    }

    /// `bound-generic-type ::= nominal-type (type* '_')+`
    pub(crate) fn bound_generic_type(&mut self) -> Option<NodeId> {
        let nominal = self.nominal_type()?;
        self.bound_generic_args(nominal)
    }

    /// Apply one argument list per nesting level, outermost parent first.
    fn bound_generic_args(&mut self, nominal: NodeId) -> Option<NodeId> {
        self.descend(|this| {
            let parent = this.arena.child(nominal, 0)?;
            let mut nominal = nominal;

            if !matches!(
                this.kind(parent),
                NodeKind::Module | NodeKind::Function | NodeKind::Extension
            ) {
                let parent = this.bound_generic_args(parent)?;
                let name = this.arena.child(nominal, 1)?;
                let kind = this.kind(nominal);
                nominal = this.node_with(kind, &[parent, name]);
            }

            let args = this.node(NodeKind::TypeList);
            while !this.cursor.eat(b'_') {
                let ty = this.ty()?;
                this.add_child(args, ty);
                if this.cursor.is_eof() {
                    return None;
                }
            }
            if this.arena.num_children(args) == 0 {
                return Some(nominal);
            }

            let bound_kind = match this.kind(nominal) {
                NodeKind::Class => NodeKind::BoundGenericClass,
                NodeKind::Structure => NodeKind::BoundGenericStructure,
                NodeKind::Enum => NodeKind::BoundGenericEnum,
                _ => return None,
            };
            let unbound = this.type_node(nominal);
            Some(this.node_with(bound_kind, &[unbound, args]))
        })
    }

    /// ```text
    /// context ::= 'E' module context                    // extension
    ///         ::= 'e' module generic-signature context  // constrained extension
    ///         ::= 'S' substitution | 's' | 'G' bound-generic-type
    ///         ::= entity | module
    /// ```
    pub(crate) fn context(&mut self) -> Option<NodeId> {
        self.descend(|this| {
            if this.cursor.is_eof() {
                return None;
            }
            match this.cursor.peek() {
                b'E' => {
                    this.cursor.next_byte();
                    let module = this.module()?;
                    let context = this.context()?;
                    Some(this.node_with(NodeKind::Extension, &[module, context]))
                }
                b'e' => {
                    this.cursor.next_byte();
                    let module = this.module()?;
                    let signature = this.generic_signature(false)?;
                    let context = this.context()?;
                    Some(this.node_with(NodeKind::Extension, &[module, context, signature]))
                }
                b'S' => {
                    this.cursor.next_byte();
                    this.substitution()
                }
                b's' => {
                    this.cursor.next_byte();
                    Some(this.stdlib_module())
                }
                b'G' => {
                    this.cursor.next_byte();
                    this.bound_generic_type()
                }
                b'F' | b'I' | b'v' | b'P' | b'Z' | b'C' | b'V' | b'O' => this.entity(),
                _ => this.module(),
            }
        })
    }

    /// ```text
    /// entity ::= 'Z'? entity-kind context entity-name
    ///        ::= nominal-type
    /// ```
    pub(crate) fn entity(&mut self) -> Option<NodeId> {
        let is_static = self.cursor.eat(b'Z');
        let basic_kind = match self.cursor.peek() {
            b'F' => NodeKind::Function,
            b'v' => NodeKind::Variable,
            b'I' => NodeKind::Initializer,
            b'i' => NodeKind::Subscript,
            _ => return self.nominal_type(),
        };
        self.cursor.next_byte();

        let context = self.context()?;
        let name = self.entity_name(basic_kind)?;
        let entity = self.node(name.kind);

        if name.is_accessor {
            let storage_name = name.name?;
            let storage = self.accessed_storage(context, storage_name)?;
            self.add_child(entity, storage);
        } else {
            self.add_child(entity, context);
            if let Some(name) = name.name {
                self.add_child(entity, name);
            }
            if name.has_type {
                let ty = self.ty()?;
                self.add_child(entity, ty);
            }
        }

        if is_static {
            return Some(self.node_with(NodeKind::Static, &[entity]));
        }
        Some(entity)
    }

    fn entity_name(&mut self, basic_kind: NodeKind) -> Option<EntityName> {
        let tag = self.cursor.peek();

        let fixed = match tag {
            b'D' => Some((NodeKind::Deallocator, false)),
            b'd' => Some((NodeKind::Destructor, false)),
            b'e' => Some((NodeKind::IVarInitializer, false)),
            b'E' => Some((NodeKind::IVarDestroyer, false)),
            b'C' => Some((NodeKind::Allocator, true)),
            b'c' => Some((NodeKind::Constructor, true)),
            _ => None,
        };
        if let Some((kind, has_type)) = fixed {
            self.cursor.next_byte();
            return Some(EntityName::plain(kind, None, has_type));
        }

        let accessor = if matches!(tag, b'a' | b'l') {
            self.cursor.next_byte();
            Some(addressor_kind(tag == b'a', self.cursor.next_byte())?)
        } else {
            let kind = accessor_kind(tag);
            if kind.is_some() {
                self.cursor.next_byte();
            }
            kind
        };
        if let Some(kind) = accessor {
            let name = self.decl_name()?;
            return Some(EntityName {
                kind,
                name: Some(name),
                has_type: true,
                is_accessor: true,
            });
        }

        if matches!(tag, b'U' | b'u') {
            self.cursor.next_byte();
            let kind = if tag == b'U' {
                NodeKind::ExplicitClosure
            } else {
                NodeKind::ImplicitClosure
            };
            let index = self.index_as_node(NodeKind::Number)?;
            return Some(EntityName::plain(kind, Some(index), true));
        }

        if basic_kind == NodeKind::Initializer {
            if self.cursor.eat(b'A') {
                let index = self.index_as_node(NodeKind::Number)?;
                return Some(EntityName::plain(
                    NodeKind::DefaultArgumentInitializer,
                    Some(index),
                    false,
                ));
            }
            if self.cursor.eat(b'i') {
                return Some(EntityName::plain(NodeKind::Initializer, None, false));
            }
            return None;
        }

        let name = self.decl_name()?;
        Some(EntityName::plain(basic_kind, Some(name), true))
    }

    /// The `Variable` or `Subscript` an accessor belongs to.
    ///
    /// Subscript accessors are mangled against storage named `subscript`;
    /// that name is dropped, keeping only a private discriminator if any.
    fn accessed_storage(&mut self, context: NodeId, name: NodeId) -> Option<NodeId> {
        let (is_subscript, name) = match self.kind(name) {
            NodeKind::Identifier if self.arena.text_bytes(name) == Some(SUBSCRIPT) => (true, None),
            NodeKind::PrivateDeclName
                if self
                    .arena
                    .child(name, 1)
                    .and_then(|id| self.arena.text_bytes(id))
                    == Some(SUBSCRIPT) =>
            {
                let discriminator = self.arena.child(name, 0)?;
                let private = self.node_with(NodeKind::PrivateDeclName, &[discriminator]);
                (true, Some(private))
            }
            _ => (false, Some(name)),
        };

        let storage = if is_subscript {
            self.node(NodeKind::Subscript)
        } else {
            self.node(NodeKind::Variable)
        };
        self.add_child(storage, context);
        // Variables mangle their name before the type, subscripts their
        // discriminator after it.
        if !is_subscript {
            if let Some(name) = name {
                self.add_child(storage, name);
            }
        }
        let ty = self.ty()?;
        self.add_child(storage, ty);
        if is_subscript {
            if let Some(discriminator) = name {
                self.add_child(storage, discriminator);
            }
        }
        Some(storage)
    }
}

#[cfg(test)]
mod tests;
