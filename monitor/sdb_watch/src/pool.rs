//! Index arena with intrusive active and free lists.

use std::fmt;

use sdb_eval::{ExprError, RegisterResolver};
use sdb_ir::Word;
use tracing::{debug, warn};

use crate::errors::{PoolError, WatchError};

/// Number of slots in a pool.
pub const NR_WATCHPOINTS: usize = 32;

/// Longest expression text a slot stores, in bytes.
pub const MAX_EXPRESSION_LEN: usize = 127;

/// User-visible watchpoint number.
///
/// Issued by a forward counter; a number is never handed out twice by the
/// same pool, even after delete or reset.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WatchpointId(u32);

impl WatchpointId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        WatchpointId(raw)
    }

}

impl fmt::Display for WatchpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Slot index minted by [`WatchpointPool::allocate`].
///
/// Always in bounds. Whether the slot is still active is checked on use.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WatchpointHandle(usize);

/// Snapshot of one active watchpoint.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WatchpointInfo {
    pub id: WatchpointId,
    pub expression: String,
    pub last_value: Word,
}

/// A watchpoint created by [`WatchpointPool::set`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NewWatchpoint {
    pub id: WatchpointId,
    /// Why the expression could not be evaluated when it was set.
    ///
    /// The baseline is then 0; the next scan either reports the same
    /// failure or the first real value as a change.
    pub pending: Option<ExprError>,
}

#[derive(Clone, Debug)]
pub(crate) struct Slot {
    pub(crate) id: WatchpointId,
    pub(crate) expression: String,
    pub(crate) last_value: Word,
    pub(crate) next: Option<usize>,
}

/// Fixed pool of [`NR_WATCHPOINTS`] watchpoint slots.
#[derive(Clone, Debug)]
pub struct WatchpointPool {
    pub(crate) slots: Vec<Slot>,
    pub(crate) active: Option<usize>,
    free: Option<usize>,
    pub(crate) next_id: u32,
}

impl WatchpointPool {
    /// Pool with every slot free, slot 0 at the head of the free list.
    pub fn new() -> Self {
        let slots = (0..NR_WATCHPOINTS)
            .map(|i| Slot {
                id: WatchpointId(0),
                expression: String::new(),
                last_value: 0,
                next: (i + 1 < NR_WATCHPOINTS).then_some(i + 1),
            })
            .collect();
        WatchpointPool {
            slots,
            active: None,
            free: Some(0),
            next_id: 1,
        }
    }

    /// Drop every watchpoint. The id counter keeps counting.
    pub fn reset(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.expression.clear();
            slot.last_value = 0;
            slot.next = (i + 1 < NR_WATCHPOINTS).then_some(i + 1);
        }
        self.active = None;
        self.free = Some(0);
        debug!(next_id = self.next_id, "watchpoint pool reset");
        self.debug_check();
    }

    /// Move the head of the free list to the head of the active list.
    ///
    /// The slot gets a fresh id and an empty expression. Once every id has
    /// been issued the pool refuses to allocate rather than reuse one.
    pub fn allocate(&mut self) -> Result<WatchpointHandle, PoolError> {
        let Some(index) = self.free else {
            debug!("watchpoint pool exhausted");
            return Err(PoolError::Exhausted);
        };
        let Some(next_id) = self.next_id.checked_add(1) else {
            warn!(last_id = self.next_id, "watchpoint ids exhausted");
            return Err(PoolError::IdsExhausted);
        };
        let id = WatchpointId(self.next_id);
        self.next_id = next_id;

        let slot = &mut self.slots[index];
        self.free = slot.next;
        slot.next = self.active;
        slot.id = id;
        slot.expression.clear();
        slot.last_value = 0;
        self.active = Some(index);

        debug!(slot = index, %id, "watchpoint allocated");
        self.debug_check();
        Ok(WatchpointHandle(index))
    }

    /// Unlink `handle` from the active list and push it onto the free list.
    ///
    /// Returns `false` and changes nothing if the slot is not active.
    pub fn release(&mut self, handle: WatchpointHandle) -> bool {
        let target = handle.0;
        let mut prev: Option<usize> = None;
        let mut cursor = self.active;
        while let Some(i) = cursor {
            if i == target {
                let next = self.slots[i].next;
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.active = next,
                }
                self.slots[i].next = self.free;
                self.free = Some(i);
                debug!(slot = i, id = %self.slots[i].id, "watchpoint released");
                self.debug_check();
                return true;
            }
            prev = cursor;
            cursor = self.slots[i].next;
        }
        false
    }

    /// Active watchpoints, newest first.
    pub fn list_active(&self) -> Vec<WatchpointInfo> {
        self.active_indices()
            .map(|i| self.info(i))
            .collect()
    }

    /// Handle of the active watchpoint numbered `id`.
    pub fn find(&self, id: WatchpointId) -> Option<WatchpointHandle> {
        self.active_indices()
            .find(|&i| self.slots[i].id == id)
            .map(WatchpointHandle)
    }

    /// Snapshot of `handle`, or `None` if the slot is free.
    pub fn get(&self, handle: WatchpointHandle) -> Option<WatchpointInfo> {
        self.active_indices()
            .any(|i| i == handle.0)
            .then(|| self.info(handle.0))
    }

    pub fn active_len(&self) -> usize {
        self.active_indices().count()
    }

    pub fn free_len(&self) -> usize {
        Chain::new(&self.slots, self.free).count()
    }

    /// Create a watchpoint on `expression`.
    ///
    /// The current value becomes the baseline, so the first scan only
    /// reports real changes. An expression that is well-formed but fails
    /// on the current registers (a zero divisor, a register this machine
    /// lacks) is still set, with baseline 0 and the failure returned in
    /// [`NewWatchpoint::pending`]. Malformed text is rejected and the pool
    /// is left untouched.
    pub fn set(
        &mut self,
        expression: &str,
        regs: &dyn RegisterResolver,
    ) -> Result<NewWatchpoint, WatchError> {
        let expression = expression.trim();
        if expression.len() > MAX_EXPRESSION_LEN {
            return Err(WatchError::ExpressionTooLong {
                len: expression.len(),
            });
        }
        let (value, pending) = match sdb_eval::expr(expression, regs) {
            Ok(value) => (value, None),
            Err(err) if err.is_state_dependent() => (0, Some(err)),
            Err(err) => return Err(err.into()),
        };
        let handle = self.allocate()?;
        let slot = &mut self.slots[handle.0];
        slot.expression.push_str(expression);
        slot.last_value = value;
        match &pending {
            None => debug!(id = %slot.id, expression, value, "watchpoint set"),
            Some(error) => {
                debug!(id = %slot.id, expression, %error, "watchpoint set, not evaluable yet");
            }
        }
        Ok(NewWatchpoint {
            id: slot.id,
            pending,
        })
    }

    /// Delete the active watchpoint numbered `id`.
    pub fn delete(&mut self, id: WatchpointId) -> Result<(), WatchError> {
        let handle = self.find(id).ok_or(WatchError::NotFound { id })?;
        self.release(handle);
        Ok(())
    }

    /// Whether every slot is on exactly one list and nothing else is.
    ///
    /// A `false` here means the lists are corrupt.
    pub fn is_consistent(&self) -> bool {
        let mut seen = [false; NR_WATCHPOINTS];
        for head in [self.active, self.free] {
            let mut cursor = head;
            while let Some(i) = cursor {
                match seen.get_mut(i) {
                    Some(flag) if !*flag => *flag = true,
                    // out of range, or visited twice (shared node or cycle)
                    _ => return false,
                }
                cursor = self.slots[i].next;
            }
        }
        seen.iter().all(|&s| s)
    }

    pub(crate) fn active_indices(&self) -> Chain<'_> {
        Chain::new(&self.slots, self.active)
    }

    fn info(&self, index: usize) -> WatchpointInfo {
        let slot = &self.slots[index];
        WatchpointInfo {
            id: slot.id,
            expression: slot.expression.clone(),
            last_value: slot.last_value,
        }
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.is_consistent(),
            "watchpoint lists corrupt: a slot is on neither or both lists"
        );
    }
}

impl Default for WatchpointPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks one list by slot index.
pub(crate) struct Chain<'a> {
    slots: &'a [Slot],
    cursor: Option<usize>,
}

impl<'a> Chain<'a> {
    fn new(slots: &'a [Slot], head: Option<usize>) -> Self {
        Chain {
            slots,
            cursor: head,
        }
    }
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let i = self.cursor?;
        self.cursor = self.slots[i].next;
        Some(i)
    }
}

#[cfg(test)]
mod tests;
