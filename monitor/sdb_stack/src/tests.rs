use super::*;

/// Counts matching parenthesis pairs by recursing once per level, the same
/// shape the evaluator takes on `((((...))))`.
fn nested_depth(bytes: &[u8]) -> usize {
    ensure_sufficient_stack(|| match bytes {
        [b'(', inner @ .., b')'] => nested_depth(inner) + 1,
        _ => 0,
    })
}

#[test]
fn test_shallow_nesting() {
    assert_eq!(nested_depth(b"((1))"), 2);
    assert_eq!(nested_depth(b"1"), 0);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 200_000;
    let mut line = vec![b'('; depth];
    line.push(b'1');
    line.extend(std::iter::repeat(b')').take(depth));

    assert_eq!(nested_depth(&line), depth);
}

#[test]
fn test_passes_result_through() {
    let result: Result<u32, &str> = ensure_sufficient_stack(|| Err("division by zero"));
    assert_eq!(result, Err("division by zero"));
}
