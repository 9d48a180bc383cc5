//! Lock-guarded store for callers that share one graph
//!
//! Mutations take the write lock; detection and snapshots take the read lock,
//! so a detection run never observes a graph that changes under it.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::RagStore;
use crate::detector::DeadlockCheck;

/// Cloneable handle to a [`RagStore`] behind a single reader-writer lock
#[derive(Debug, Clone, Default)]
pub struct SharedRagStore {
    inner: Arc<RwLock<RagStore>>,
}

impl SharedRagStore {
    pub fn new(store: RagStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store
    pub fn write<T>(&self, f: impl FnOnce(&mut RagStore) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Run `f` with shared, read-only access to the store
    pub fn read<T>(&self, f: impl FnOnce(&RagStore) -> T) -> T {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Detect a deadlock while holding the read lock for the whole traversal
    pub fn run_deadlock_check(&self) -> DeadlockCheck {
        self.inner.read().run_deadlock_check()
    }

    pub fn read_guard(&self) -> RwLockReadGuard<'_, RagStore> {
        self.inner.read()
    }

    pub fn write_guard(&self) -> RwLockWriteGuard<'_, RagStore> {
        self.inner.write()
    }
}
