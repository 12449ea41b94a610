//! Pool behind a lock, for hosts that touch watchpoints from several threads.

use std::sync::Arc;

use parking_lot::Mutex;
use sdb_eval::RegisterResolver;

use crate::errors::WatchError;
use crate::pool::{NewWatchpoint, WatchpointId, WatchpointInfo, WatchpointPool};
use crate::scan::ScanReport;

/// Cloneable handle to one [`WatchpointPool`].
///
/// Every operation takes the same mutex, so set, delete, list and scan are
/// serialised against each other.
#[derive(Clone, Default)]
pub struct SharedWatchpoints {
    pool: Arc<Mutex<WatchpointPool>>,
}

impl SharedWatchpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &self,
        expression: &str,
        regs: &dyn RegisterResolver,
    ) -> Result<NewWatchpoint, WatchError> {
        self.pool.lock().set(expression, regs)
    }

    pub fn delete(&self, id: WatchpointId) -> Result<(), WatchError> {
        self.pool.lock().delete(id)
    }

    pub fn list(&self) -> Vec<WatchpointInfo> {
        self.pool.lock().list_active()
    }

    pub fn scan(&self, regs: &dyn RegisterResolver) -> ScanReport {
        self.pool.lock().scan(regs)
    }

    pub fn reset(&self) {
        self.pool.lock().reset();
    }
}
