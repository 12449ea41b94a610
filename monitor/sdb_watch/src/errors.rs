//! Pool and watchpoint command errors.

use std::fmt;

use sdb_eval::ExprError;

use crate::pool::{WatchpointId, MAX_EXPRESSION_LEN, NR_WATCHPOINTS};

/// Failure to take a slot from the pool.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PoolError {
    /// Every slot is active. Nothing was modified.
    Exhausted,
    /// Every watchpoint number has been issued once. Nothing was modified.
    IdsExhausted,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Exhausted => write!(
                f,
                "no free watchpoints (all {NR_WATCHPOINTS} slots in use)"
            ),
            PoolError::IdsExhausted => write!(f, "watchpoint numbers exhausted"),
        }
    }
}

impl std::error::Error for PoolError {}

/// Failure of a set or delete request.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum WatchError {
    /// No active watchpoint has this id.
    NotFound { id: WatchpointId },
    /// The expression text does not fit in a slot.
    ExpressionTooLong { len: usize },
    Pool(PoolError),
    /// The expression is malformed.
    Expr(ExprError),
}

impl fmt::Display for WatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchError::NotFound { id } => write!(f, "no watchpoint number {id}"),
            WatchError::ExpressionTooLong { len } => write!(
                f,
                "expression is {len} bytes long, the limit is {MAX_EXPRESSION_LEN}"
            ),
            WatchError::Pool(err) => fmt::Display::fmt(err, f),
            WatchError::Expr(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for WatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WatchError::Pool(err) => Some(err),
            WatchError::Expr(err) => Some(err),
            WatchError::NotFound { .. } | WatchError::ExpressionTooLong { .. } => None,
        }
    }
}

impl From<PoolError> for WatchError {
    fn from(err: PoolError) -> Self {
        WatchError::Pool(err)
    }
}

impl From<ExprError> for WatchError {
    fn from(err: ExprError) -> Self {
        WatchError::Expr(err)
    }
}
