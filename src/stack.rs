//! Stack growth for the recursive parser and evaluator.
//!
//! Deeply nested scripts recurse once per nesting level in both the parser
//! and the evaluator. Recursive entry points wrap themselves in
//! [`ensure_sufficient_stack`] so the native stack is grown instead of
//! overflowing.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, growing the stack first if less than the red zone remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
