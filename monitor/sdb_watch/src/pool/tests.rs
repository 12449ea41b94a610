#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use sdb_eval::{EvalError, ExprError};

fn no_regs(_: &str) -> Option<Word> {
    None
}

fn ids(pool: &WatchpointPool) -> Vec<WatchpointId> {
    pool.list_active().iter().map(|w| w.id).collect()
}

#[test]
fn test_new_pool_is_all_free() {
    let pool = WatchpointPool::new();
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
    assert!(pool.list_active().is_empty());
    assert!(pool.is_consistent());
}

#[test]
fn test_allocate_takes_lowest_free_slot_first() {
    let mut pool = WatchpointPool::new();
    let a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();
    assert_eq!(a.0, 0);
    assert_eq!(b.0, 1);
}

#[test]
fn test_active_list_is_newest_first_and_unlinks_anywhere() {
    let mut pool = WatchpointPool::new();
    let a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();
    let c = pool.allocate().unwrap();
    assert_eq!(pool.active_indices().collect::<Vec<_>>(), vec![c.0, b.0, a.0]);

    assert!(pool.release(b));
    assert_eq!(pool.active_indices().collect::<Vec<_>>(), vec![c.0, a.0]);

    assert!(pool.release(c));
    assert_eq!(pool.active_indices().collect::<Vec<_>>(), vec![a.0]);

    assert!(pool.release(a));
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
}

#[test]
fn test_released_slot_is_reused_next() {
    let mut pool = WatchpointPool::new();
    let _a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();
    pool.release(b);
    let again = pool.allocate().unwrap();
    assert_eq!(again, b);
    assert_eq!(pool.get(again).unwrap().id, WatchpointId::new(3));
}

#[test]
fn test_exhaustion_leaves_pool_untouched() {
    let mut pool = WatchpointPool::new();
    for _ in 0..NR_WATCHPOINTS {
        pool.allocate().unwrap();
    }
    let before = pool.list_active();
    assert_eq!(pool.allocate(), Err(PoolError::Exhausted));
    assert_eq!(pool.list_active(), before);
    assert_eq!(pool.free_len(), 0);
    assert!(pool.is_consistent());
}

#[test]
fn test_release_of_free_slot_is_a_no_op() {
    let mut pool = WatchpointPool::new();
    let a = pool.allocate().unwrap();
    assert!(pool.release(a));
    assert!(!pool.release(a));
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
    assert!(pool.is_consistent());
}

#[test]
fn test_allocate_clears_stale_contents() {
    let mut pool = WatchpointPool::new();
    let id = pool.set("0x10", &no_regs).unwrap().id;
    pool.delete(id).unwrap();
    let h = pool.allocate().unwrap();
    let info = pool.get(h).unwrap();
    assert_eq!(info.expression, "");
    assert_eq!(info.last_value, 0);
}

#[test]
fn test_set_seeds_last_value() {
    let mut pool = WatchpointPool::new();
    let id = pool.set("  6 * 7 ", &no_regs).unwrap().id;
    assert_eq!(
        pool.list_active(),
        vec![WatchpointInfo {
            id,
            expression: "6 * 7".to_owned(),
            last_value: 42,
        }]
    );
}

#[test]
fn test_set_rejects_malformed_expression_without_allocating() {
    let mut pool = WatchpointPool::new();
    assert!(matches!(
        pool.set("1 @ 2", &no_regs),
        Err(WatchError::Expr(ExprError::Tokenize(_)))
    ));
    assert!(matches!(
        pool.set("1 +", &no_regs),
        Err(WatchError::Expr(ExprError::Eval(EvalError::Empty { .. })))
    ));
    assert!(matches!(
        pool.set("1 2", &no_regs),
        Err(WatchError::Expr(ExprError::Eval(EvalError::NoMainOperator { .. })))
    ));
    assert!(matches!(
        pool.set("4294967296", &no_regs),
        Err(WatchError::Expr(ExprError::Eval(EvalError::MalformedLiteral { .. })))
    ));
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
}

/// `a0 = 10`, `a1` as given, nothing else.
fn divider(a1: Word) -> impl Fn(&str) -> Option<Word> {
    move |name: &str| match name {
        "a0" => Some(10),
        "a1" => Some(a1),
        _ => None,
    }
}

#[test]
fn test_set_accepts_expression_failing_on_current_registers() {
    let regs = divider(0);
    let mut pool = WatchpointPool::new();

    let div = pool.set("$a0 / $a1", &regs).unwrap();
    assert!(matches!(
        div.pending,
        Some(ExprError::Eval(EvalError::DivisionByZero { .. }))
    ));
    let unknown = pool.set("$nope", &regs).unwrap();
    assert!(matches!(
        unknown.pending,
        Some(ExprError::Eval(EvalError::UnknownRegister { .. }))
    ));

    assert_eq!(ids(&pool), vec![unknown.id, div.id]);
    assert!(pool.list_active().iter().all(|w| w.last_value == 0));
}

#[test]
fn test_pending_watchpoint_fires_once_it_evaluates() {
    let mut pool = WatchpointPool::new();
    let new = pool.set("$a0 / $a1", &divider(0)).unwrap();
    assert!(new.pending.is_some());

    let still_zero = pool.scan(&divider(0));
    assert_eq!(still_zero.failures.len(), 1);
    assert!(!still_zero.triggered());

    let report = pool.scan(&divider(2));
    assert!(report.failures.is_empty());
    assert_eq!(report.changes.len(), 1);
    assert_eq!(report.changes[0].id, new.id);
    assert_eq!(report.changes[0].old_value, 0);
    assert_eq!(report.changes[0].new_value, 5);
}

#[test]
fn test_set_rejects_long_expression() {
    let mut pool = WatchpointPool::new();
    let fits = format!("1{}", "+1".repeat(63));
    assert_eq!(fits.len(), MAX_EXPRESSION_LEN);
    assert!(pool.set(&fits, &no_regs).is_ok());

    let long = format!("{fits}+1");
    assert_eq!(
        pool.set(&long, &no_regs),
        Err(WatchError::ExpressionTooLong { len: 129 })
    );
}

#[test]
fn test_set_reports_exhaustion() {
    let mut pool = WatchpointPool::new();
    for _ in 0..NR_WATCHPOINTS {
        pool.set("1", &no_regs).unwrap();
    }
    assert_eq!(
        pool.set("1", &no_regs),
        Err(WatchError::Pool(PoolError::Exhausted))
    );
}

#[test]
fn test_delete_and_not_found() {
    let mut pool = WatchpointPool::new();
    let one = pool.set("1", &no_regs).unwrap().id;
    let two = pool.set("2", &no_regs).unwrap().id;
    assert_eq!(pool.delete(one), Ok(()));
    assert_eq!(pool.delete(one), Err(WatchError::NotFound { id: one }));
    assert_eq!(
        pool.delete(WatchpointId::new(99)),
        Err(WatchError::NotFound {
            id: WatchpointId::new(99)
        })
    );
    assert_eq!(ids(&pool), vec![two]);
}

#[test]
fn test_ids_increase_across_delete_and_reset() {
    let mut pool = WatchpointPool::new();
    let a = pool.set("1", &no_regs).unwrap().id;
    pool.delete(a).unwrap();
    let b = pool.set("1", &no_regs).unwrap().id;
    pool.reset();
    let c = pool.set("1", &no_regs).unwrap().id;
    assert_eq!(
        (a, b, c),
        (WatchpointId::new(1), WatchpointId::new(2), WatchpointId::new(3))
    );
}

#[test]
fn test_reset_is_idempotent() {
    let mut pool = WatchpointPool::new();
    pool.set("1", &no_regs).unwrap();
    pool.set("2", &no_regs).unwrap();
    pool.reset();
    pool.reset();
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
    assert_eq!(pool.allocate().unwrap().0, 0);
    assert!(pool.is_consistent());
}

#[test]
fn test_find_and_get() {
    let mut pool = WatchpointPool::new();
    let id = pool.set("0x1f", &no_regs).unwrap().id;
    let handle = pool.find(id).unwrap();
    assert_eq!(pool.get(handle).unwrap().last_value, 31);
    pool.release(handle);
    assert_eq!(pool.find(id), None);
    assert_eq!(pool.get(handle), None);
}

#[test]
fn test_id_exhaustion_is_an_error() {
    let mut pool = WatchpointPool::new();
    pool.next_id = u32::MAX - 1;
    let last = pool.set("1", &no_regs).unwrap().id;
    assert_eq!(last, WatchpointId::new(u32::MAX - 1));

    assert_eq!(pool.allocate(), Err(PoolError::IdsExhausted));
    assert_eq!(
        pool.set("1", &no_regs),
        Err(WatchError::Pool(PoolError::IdsExhausted))
    );
    // Reset frees slots but never recycles numbers.
    pool.reset();
    assert_eq!(pool.allocate(), Err(PoolError::IdsExhausted));
    assert_eq!(pool.free_len(), NR_WATCHPOINTS);
    assert!(pool.is_consistent());
}

#[test]
fn test_corrupt_lists_are_detected() {
    let mut pool = WatchpointPool::new();
    let a = pool.allocate().unwrap();
    // point the active slot back into the free list
    pool.slots[a.0].next = Some(1);
    assert!(!pool.is_consistent());
}
