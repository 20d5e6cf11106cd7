//! Low-level cursor for the legacy mangling decoder.
//!
//! The cursor is a forward-only view over the bytes of a mangled symbol.
//! It never backtracks past a consumed byte and never panics: reads past
//! the end yield [`SENTINEL`], and consuming operations that cannot match
//! leave the cursor where it was.

mod cursor;

pub use cursor::{Cursor, SENTINEL};
