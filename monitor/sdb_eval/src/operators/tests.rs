use super::*;

#[test]
fn test_precedence_order() {
    assert!(BinaryOp::Eq.precedence() < BinaryOp::Add.precedence());
    assert_eq!(BinaryOp::Add.precedence(), BinaryOp::Sub.precedence());
    assert!(BinaryOp::Sub.precedence() < BinaryOp::Mul.precedence());
    assert_eq!(BinaryOp::Mul.precedence(), BinaryOp::Div.precedence());
}

#[test]
fn test_from_token() {
    assert_eq!(BinaryOp::from_token(TokenKind::Plus), Some(BinaryOp::Add));
    assert_eq!(BinaryOp::from_token(TokenKind::Eq), Some(BinaryOp::Eq));
    assert_eq!(BinaryOp::from_token(TokenKind::LParen), None);
    assert_eq!(BinaryOp::from_token(TokenKind::RegisterRef), None);
}

#[test]
fn test_wrapping_arithmetic() {
    assert_eq!(evaluate_binary(BinaryOp::Add, u32::MAX, 2), Some(1));
    assert_eq!(evaluate_binary(BinaryOp::Sub, 1, 2), Some(u32::MAX));
    assert_eq!(
        evaluate_binary(BinaryOp::Mul, 0x1_0000, 0x1_0000),
        Some(0)
    );
}

#[test]
fn test_division_is_signed() {
    // -6 / 2 == -3
    let minus_six = 6u32.wrapping_neg();
    assert_eq!(
        evaluate_binary(BinaryOp::Div, minus_six, 2),
        Some(3u32.wrapping_neg())
    );
    // Truncates toward zero.
    assert_eq!(evaluate_binary(BinaryOp::Div, 7, 2), Some(3));
    assert_eq!(
        evaluate_binary(BinaryOp::Div, 7u32.wrapping_neg(), 2),
        Some(3u32.wrapping_neg())
    );
}

#[test]
fn test_division_overflow_wraps() {
    let min = 0x8000_0000;
    assert_eq!(evaluate_binary(BinaryOp::Div, min, u32::MAX), Some(min));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(evaluate_binary(BinaryOp::Div, 10, 0), None);
    assert_eq!(evaluate_binary(BinaryOp::Div, 0, 0), None);
}

#[test]
fn test_equality() {
    assert_eq!(evaluate_binary(BinaryOp::Eq, 3, 3), Some(1));
    assert_eq!(evaluate_binary(BinaryOp::Eq, 3, 4), Some(0));
}

#[test]
fn test_symbols() {
    assert_eq!(BinaryOp::Eq.symbol(), "==");
    assert_eq!(BinaryOp::Div.symbol(), "/");
}
