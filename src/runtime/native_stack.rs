//! Host stack safety for nested evaluation.
//!
//! Every named call and eval recurses through the evaluator.  The depth limit bounds how far, but
//! a generous limit can still outgrow a small thread stack, so nested evaluation runs through
//! `stacker`, which moves to a fresh segment when the current one runs low.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
