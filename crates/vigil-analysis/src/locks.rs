//! Per-model lock arena.
//!
//! Serializes the write pipeline (simulation, reset, governance
//! transitions) per model without one global lock. Entries are created
//! lazily and reaped once no caller holds them.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct ModelLockArena {
    locks: Mutex<FxHashMap<i64, Arc<Mutex<()>>>>,
}

impl ModelLockArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock handle for a model, created on first use.
    pub fn handle(&self, model_id: i64) -> Arc<Mutex<()>> {
        let mut locks = lock_recovering(&self.locks);
        Arc::clone(locks.entry(model_id).or_default())
    }

    /// Run `f` while holding the model's lock.
    pub fn with_model<R>(&self, model_id: i64, f: impl FnOnce() -> R) -> R {
        let handle = self.handle(model_id);
        let _guard = lock_recovering(&handle);
        f()
    }

    /// Drop arena entries no caller currently holds. Returns how many
    /// were removed.
    pub fn reap_idle(&self) -> usize {
        let mut locks = lock_recovering(&self.locks);
        let before = locks.len();
        locks.retain(|_, handle| Arc::strong_count(handle) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        lock_recovering(&self.locks).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned model lock only means a previous holder panicked; the
// database state it guarded is transactional, so recover the guard.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
