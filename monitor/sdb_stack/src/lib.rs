//! Stack growth guard for the evaluator.
//!
//! Expression evaluation recurses once per parenthesis level and once per
//! operator split. A watch expression may hold up to 65536 tokens, so a line
//! of nested parentheses can recurse tens of thousands of frames deep. Wrap
//! each recursive step in [`ensure_sufficient_stack`] and the stack is grown
//! on demand instead of overflowing the monitor thread.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the
/// red zone.
///
/// ```text
/// fn eval_range(&self, range: Range<usize>) -> Result<Word, EvalError> {
///     ensure_sufficient_stack(|| {
///         // ... split range, recurse on both halves ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
