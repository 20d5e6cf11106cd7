//! SIL-only types: `XF` impl function types and `XB` boxes with layout.

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

/// Where a convention letter appears in an impl function type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConventionContext {
    Callee,
    Parameter,
    Result,
}

/// Convention attribute for `code` in `context`, if it has one there.
fn convention(code: u8, context: ConventionContext) -> Option<&'static str> {
    use ConventionContext::{Callee, Parameter, Result};

    Some(match (code, context) {
        (b'a', Result) => "@autoreleased",
        (b'd', Callee) => "@callee_unowned",
        (b'd', Parameter | Result) => "@unowned",
        (b'D', Result) => "@unowned_inner_pointer",
        (b'g', Callee) => "@callee_guaranteed",
        (b'g', Parameter) => "@guaranteed",
        (b'e', Parameter) => "@deallocating",
        (b'i', Parameter) => "@in",
        (b'i', Result) => "@out",
        (b'l', Parameter) => "@inout",
        (b'o', Callee) => "@callee_owned",
        (b'o', Parameter | Result) => "@owned",
        _ => return None,
    })
}

fn function_attribute(code: u8) -> Option<&'static str> {
    Some(match code {
        b'b' => "@convention(block)",
        b'c' => "@convention(c)",
        b'm' => "@convention(method)",
        b'O' => "@convention(objc_method)",
        b'w' => "@convention(witness_method)",
        _ => return None,
    })
}

impl Demangler<'_> {
    /// ```text
    /// impl-function-type ::= callee-convention function-attribute?
    ///                        generic-signature? '_' param* '_' result* '_'
    /// ```
    pub(crate) fn impl_function_type(&mut self) -> Option<NodeId> {
        let function = self.node(NodeKind::ImplFunctionType);

        let callee = if self.cursor.eat(b't') {
            "@convention(thin)"
        } else {
            convention(self.cursor.next_byte(), ConventionContext::Callee)?
        };
        let callee = self.text_node(NodeKind::ImplConvention, callee);
        self.add_child(function, callee);

        if self.cursor.eat(b'C') {
            let attribute = function_attribute(self.cursor.next_byte())?;
            let attribute = self.text_node(NodeKind::ImplFunctionAttribute, attribute);
            self.add_child(function, attribute);
        }

        if self.cursor.eat(b'G') {
            let signature = self.generic_signature(false)?;
            self.add_child(function, signature);
        } else if self.cursor.eat(b'g') {
            let signature = self.generic_signature(true)?;
            self.add_child(function, signature);
        }

        if !self.cursor.eat(b'_') {
            return None;
        }

        while !self.cursor.eat(b'_') {
            let parameter = self.impl_entry(ConventionContext::Parameter)?;
            self.add_child(function, parameter);
        }

        let mut saw_error = false;
        while !self.cursor.eat(b'_') {
            if self.cursor.eat(b'z') {
                if saw_error {
                    tracing::trace!("second error result in impl function type");
                    return None;
                }
                saw_error = true;
                let error =
                    self.impl_entry_as(NodeKind::ImplErrorResult, ConventionContext::Result)?;
                self.add_child(function, error);
            } else {
                let result = self.impl_entry(ConventionContext::Result)?;
                self.add_child(function, result);
            }
        }

        Some(function)
    }

    fn impl_entry(&mut self, context: ConventionContext) -> Option<NodeId> {
        let kind = if context == ConventionContext::Parameter {
            NodeKind::ImplParameter
        } else {
            NodeKind::ImplResult
        };
        self.impl_entry_as(kind, context)
    }

    /// `convention type`
    fn impl_entry_as(&mut self, kind: NodeKind, context: ConventionContext) -> Option<NodeId> {
        let convention = convention(self.cursor.next_byte(), context)?;
        let convention = self.text_node(NodeKind::ImplConvention, convention);
        let ty = self.ty()?;
        Some(self.node_with(kind, &[convention, ty]))
    }

    /// ```text
    /// sil-box-layout ::= ('G' generic-signature)? field* '_' (type* '_')?
    /// field          ::= 'm' type | 'i' type
    /// ```
    ///
    /// The generic arguments are only present with a signature.
    pub(crate) fn sil_box_with_layout(&mut self) -> Option<NodeId> {
        let signature = if self.cursor.eat(b'G') {
            Some(self.generic_signature(false)?)
        } else {
            None
        };

        let layout = self.node(NodeKind::SILBoxLayout);
        while !self.cursor.eat(b'_') {
            let kind = match self.cursor.next_byte() {
                b'm' => NodeKind::SILBoxMutableField,
                b'i' => NodeKind::SILBoxImmutableField,
                _ => return None,
            };
            let ty = self.ty()?;
            let field = self.node_with(kind, &[ty]);
            self.add_child(layout, field);
        }

        let boxed = self.node_with(NodeKind::SILBoxTypeWithLayout, &[layout]);
        if let Some(signature) = signature {
            self.add_child(boxed, signature);
            let args = self.node(NodeKind::TypeList);
            while !self.cursor.eat(b'_') {
                let ty = self.ty()?;
                self.add_child(args, ty);
            }
            self.add_child(boxed, args);
        }
        Some(boxed)
    }
}
