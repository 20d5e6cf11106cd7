//! Stack safety for deep recursion.
//!
//! The decoder recurses once per nesting level of the mangled grammar
//! (generic arguments, tuples, function types, contexts). Its depth limit
//! bounds that recursion, but a limit large enough for real symbols can
//! still exceed a small thread stack (crash handlers often run on one).
//! Wrapping each guarded recursion point in [`ensure_sufficient_stack`]
//! grows the stack on demand so the depth limit, not the stack size, is
//! what stops pathological input.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).

/// Minimum stack space to keep available (64KB red zone).
///
/// A single grammar production uses well under a kilobyte of stack, so this
/// covers any run of unguarded calls between two guarded ones.
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone, a new segment is
/// allocated and `f` runs on it.
///
/// ```text
/// fn context(&mut self) -> Option<NodeId> {
///     self.descend(|this| {
///         // ... recursive productions ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
