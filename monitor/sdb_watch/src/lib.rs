//! Watchpoints for the sdb monitor.
//!
//! A [`WatchpointPool`] owns a fixed arena of [`NR_WATCHPOINTS`] slots. Each
//! slot sits on exactly one of two singly linked lists threaded through the
//! arena by index: the *active* list (newest first) and the *free* list.
//! Allocation and release move slots between the two, so the pool never
//! grows and never allocates slots after construction.
//!
//! An expression that only fails on the current register values is still
//! accepted; the scanner reports it until it evaluates.
//!
//! [`WatchpointPool::scan`] re-evaluates every active expression once per
//! step boundary and reports what changed. A watchpoint that fails to
//! evaluate is reported and skipped; the rest are still checked.
//!
//! Hosts that share a pool between threads use [`SharedWatchpoints`].

mod errors;
mod pool;
mod scan;
mod shared;

pub use errors::{PoolError, WatchError};
pub use pool::{
    NewWatchpoint, WatchpointHandle, WatchpointId, WatchpointInfo, WatchpointPool,
    MAX_EXPRESSION_LEN, NR_WATCHPOINTS,
};
pub use scan::{ScanError, ScanReport, WatchChange, WatchFailure};
pub use shared::SharedWatchpoints;
