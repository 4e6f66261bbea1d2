//! Native stack growth for deep evaluation.
//!
//! Trees nest as deeply as their builders like, and recursive lambdas add a
//! few native frames per call level, so every node evaluation runs behind
//! [`ensure_sufficient_stack`].

/// Run `f`, first growing the native stack if less than the red zone remains.
///
/// On WASM the closure is called directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (1MB).
    const GROWTH: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
