//! Random expression tests.
//!
//! Expressions are generated as small trees, rendered with the fewest
//! parentheses the precedence rules allow (plus some redundant ones), and
//! evaluated both by the crate and by a direct tree walk. The two must agree,
//! and any zero divisor anywhere in the tree must surface as
//! `DivisionByZero`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "Reference arithmetic reinterprets words as signed"
)]

use proptest::prelude::*;
use sdb_eval::{expr, EvalError, ExprError, Word};

const REGS: &[(&str, Word)] = &[
    ("zero", 0),
    ("ra", 0x8000_0010),
    ("sp", 0x8fff_fff0),
    ("a0", 7),
    ("a1", 0xffff_ffff),
    ("pc", 0x8000_0000),
];

fn resolve(name: &str) -> Option<Word> {
    REGS.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl Op {
    fn precedence(self) -> u8 {
        match self {
            Op::Eq => 0,
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Eq => "==",
        }
    }
}

#[derive(Clone, Debug)]
enum Expr {
    Dec(u32),
    Hex(u32),
    Reg(&'static str),
    Paren(Box<Expr>),
    Binary {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        spaced: bool,
    },
}

impl Expr {
    /// Precedence of the operator this node exposes to its parent.
    fn exposed_precedence(&self) -> Option<u8> {
        match self {
            Expr::Binary { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Expr::Dec(n) => out.push_str(&n.to_string()),
            Expr::Hex(n) => out.push_str(&format!("{n:#x}")),
            Expr::Reg(name) => {
                out.push('$');
                out.push_str(name);
            }
            Expr::Paren(inner) => {
                out.push('(');
                inner.render(out);
                out.push(')');
            }
            Expr::Binary {
                op,
                lhs,
                rhs,
                spaced,
            } => {
                let prec = op.precedence();
                let wrap_lhs = lhs.exposed_precedence().is_some_and(|p| p < prec);
                let wrap_rhs = rhs.exposed_precedence().is_some_and(|p| p <= prec);
                render_operand(lhs, wrap_lhs, out);
                if *spaced {
                    out.push(' ');
                }
                out.push_str(op.symbol());
                if *spaced {
                    out.push(' ');
                }
                render_operand(rhs, wrap_rhs, out);
            }
        }
    }

    /// Reference value, or `None` if some divisor is zero.
    fn reference(&self) -> Option<Word> {
        match self {
            Expr::Dec(n) | Expr::Hex(n) => Some(*n),
            Expr::Reg(name) => resolve(name),
            Expr::Paren(inner) => inner.reference(),
            Expr::Binary { op, lhs, rhs, .. } => {
                let l = lhs.reference();
                let r = rhs.reference();
                let (l, r) = (l?, r?);
                Some(match op {
                    Op::Add => l.wrapping_add(r),
                    Op::Sub => l.wrapping_sub(r),
                    Op::Mul => l.wrapping_mul(r),
                    Op::Div => {
                        if r == 0 {
                            return None;
                        }
                        (l as i32).wrapping_div(r as i32) as u32
                    }
                    Op::Eq => u32::from(l == r),
                })
            }
        }
    }
}

fn render_operand(e: &Expr, wrap: bool, out: &mut String) {
    if wrap {
        out.push('(');
        e.render(out);
        out.push(')');
    } else {
        e.render(out);
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        Just(Op::Sub),
        Just(Op::Mul),
        Just(Op::Div),
        Just(Op::Eq),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => (0u32..100).prop_map(Expr::Dec),
        1 => any::<u32>().prop_map(Expr::Hex),
        1 => prop::sample::select(REGS).prop_map(|(name, _)| Expr::Reg(name)),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    leaf_strategy().prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            4 => (op_strategy(), inner.clone(), inner.clone(), any::<bool>()).prop_map(
                |(op, lhs, rhs, spaced)| Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                    spaced,
                }
            ),
            1 => inner.prop_map(|e| Expr::Paren(Box::new(e))),
        ]
    })
}

fn rendered(e: &Expr) -> String {
    let mut out = String::new();
    e.render(&mut out);
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn generated_expressions_match_reference(e in expr_strategy()) {
        let text = rendered(&e);
        let actual = expr(&text, &resolve);
        match e.reference() {
            Some(value) => {
                prop_assert_eq!(actual, Ok(value), "expression: {}", text);
            }
            None => {
                prop_assert!(
                    matches!(actual, Err(ExprError::Eval(EvalError::DivisionByZero { .. }))),
                    "expected division by zero for {}, got {:?}",
                    text,
                    actual
                );
            }
        }
    }

    #[test]
    fn redundant_outer_parentheses_do_not_change_value(e in expr_strategy()) {
        let text = rendered(&e);
        let wrapped = format!("(({text}))");
        prop_assert_eq!(expr(&text, &resolve).ok(), expr(&wrapped, &resolve).ok());
    }
}

#[test]
fn minimal_parentheses_keep_right_grouping() {
    let e = Expr::Binary {
        op: Op::Sub,
        lhs: Box::new(Expr::Dec(10)),
        rhs: Box::new(Expr::Binary {
            op: Op::Sub,
            lhs: Box::new(Expr::Dec(4)),
            rhs: Box::new(Expr::Dec(3)),
            spaced: false,
        }),
        spaced: true,
    };
    assert_eq!(rendered(&e), "10 - (4-3)");
    assert_eq!(expr(&rendered(&e), &resolve), Ok(9));
}
