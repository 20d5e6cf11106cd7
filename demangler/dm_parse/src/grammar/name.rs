//! Numbers, identifiers and declaration names.

use std::borrow::Cow;

use dm_tree::{NodeId, NodeKind};

use crate::Demangler;

/// Operator characters for the letters `a` through `z`. A space marks a
/// letter with no operator meaning.
const OPERATOR_TABLE: &[u8; 26] = b"& @/= >    <*!|+?%-~   ^ .";

/// Map an operator identifier's letters to operator characters.
///
/// Non-ASCII bytes (from punycode) pass through unchanged.
fn decode_operator(raw: &[u8]) -> Option<Vec<u8>> {
    raw.iter()
        .map(|&b| match b {
            0x80..=0xFF => Some(b),
            b'a'..=b'z' => match OPERATOR_TABLE[usize::from(b - b'a')] {
                b' ' => None,
                op => Some(op),
            },
            _ => None,
        })
        .collect()
}

impl Demangler<'_> {
    /// `natural ::= [0-9]+`
    pub(crate) fn natural(&mut self) -> Option<u64> {
        if !self.cursor.at_digit() {
            return None;
        }
        let mut value: u64 = 0;
        while self.cursor.at_digit() {
            let digit = u64::from(self.cursor.next_byte() - b'0');
            let Some(next) = value.checked_mul(10).and_then(|v| v.checked_add(digit)) else {
                tracing::trace!("natural number overflows");
                return None;
            };
            value = next;
        }
        Some(value)
    }

    /// `index ::= '_' | natural '_'`, decoded as 0 and n+1.
    pub(crate) fn index(&mut self) -> Option<u64> {
        if self.cursor.eat(b'_') {
            return Some(0);
        }
        let n = self.natural()?;
        if !self.cursor.eat(b'_') {
            return None;
        }
        n.checked_add(1)
    }

    /// An index packaged as a node carrying it.
    pub(crate) fn index_as_node(&mut self, kind: NodeKind) -> Option<NodeId> {
        let index = self.index()?;
        Some(self.index_node(kind, index))
    }

    /// `identifier ::= 'X'? ('o' [pPi])? natural <bytes>`
    ///
    /// `kind` requests a specific node kind instead of `Identifier`; operator
    /// identifiers are rejected when one is requested.
    pub(crate) fn identifier(&mut self, kind: Option<NodeKind>) -> Option<NodeId> {
        if self.cursor.is_eof() {
            return None;
        }
        let punycoded = self.cursor.eat(b'X');

        let mut kind = kind;
        let is_operator = self.cursor.eat(b'o');
        if is_operator {
            if kind.is_some() {
                return None;
            }
            kind = Some(match self.cursor.next_byte() {
                b'p' => NodeKind::PrefixOperator,
                b'P' => NodeKind::PostfixOperator,
                b'i' => NodeKind::InfixOperator,
                _ => return None,
            });
        }

        let len = usize::try_from(self.natural()?).ok()?;
        let Some(raw) = self.cursor.take(len) else {
            tracing::trace!(
                len,
                remaining = self.cursor.remaining(),
                "identifier overruns input"
            );
            return None;
        };

        let mut text = Cow::Borrowed(raw);
        if punycoded {
            match dm_punycode::decode_utf8(raw) {
                Ok(decoded) => text = Cow::Owned(decoded.into_bytes()),
                Err(err) => {
                    tracing::trace!(%err, "punycode identifier rejected");
                    return None;
                }
            }
        }
        if text.is_empty() {
            return None;
        }
        if is_operator {
            text = Cow::Owned(decode_operator(&text)?);
        }

        Some(self.text_node(kind.unwrap_or(NodeKind::Identifier), text))
    }

    /// ```text
    /// decl-name ::= 'L' index identifier     // local
    ///           ::= 'P' identifier identifier // private: discriminator, name
    ///           ::= identifier
    /// ```
    pub(crate) fn decl_name(&mut self) -> Option<NodeId> {
        if self.cursor.eat(b'L') {
            let discriminator = self.index_as_node(NodeKind::Number)?;
            let name = self.identifier(None)?;
            return Some(self.node_with(NodeKind::LocalDeclName, &[discriminator, name]));
        }
        if self.cursor.eat(b'P') {
            let discriminator = self.identifier(None)?;
            let name = self.identifier(None)?;
            return Some(self.node_with(NodeKind::PrivateDeclName, &[discriminator, name]));
        }
        self.identifier(None)
    }
}
