//! Stack safety for recursive parsing and evaluation.
//!
//! Configuration expressions nest arbitrarily (`a ^ (b ^ ...)`, arrays of
//! constructions of arrays). Recursive descent over them goes through
//! [`ensure_sufficient_stack`], which grows the stack on demand.

/// Grow when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn test_deep_recursion() {
        assert_eq!(depth(100_000), 100_000);
    }

    #[test]
    fn test_returns_value() {
        assert_eq!(ensure_sufficient_stack(|| 42), 42);
    }
}
