//! Grammar Modules
//!
//! Each module extends `Demangler` with the productions for one part of the
//! legacy mangling grammar:
//!
//! - [`name`]: naturals, indices, identifiers (plain, punycode, operator)
//!   and declaration names
//! - [`context`]: substitutions, modules, contexts, entities and nominal
//!   types, including bound generic argument lists
//! - [`ty`]: the `type` production and everything it dispatches to
//! - [`generics`]: generic parameters, dependent types and signatures
//! - [`sil`]: SIL-only types (`XF` impl function types, `XB` boxes)
//! - [`global`]: everything that may follow the `_T` prefix
//! - [`specialization`]: `TS` specialization headers
//!
//! Productions return `Option<NodeId>`. `None` means the input does not
//! match and aborts the decode: there is no backtracking over consumed
//! bytes, so a caller never retries an alternative after a failure.

mod context;
mod generics;
mod global;
mod name;
mod sil;
mod specialization;
mod ty;
