//! Advisory per-group locking (§9: "use a single-row advisory lock keyed by
//! `(dim_group, composition)` or serialize folds per group").
//!
//! The catalog's own CRUD calls are not individually atomic across
//! processes; callers that fold concurrently into the same
//! `(dim_group, composition)` key serialize through this lock so demotion
//! decisions cannot race (§5 ordering guarantees).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use idrc_ir::Composition;

use crate::ids::DimGroupId;

type GroupKey = (DimGroupId, Composition);

/// A process-local table of one mutex per `(dim_group, composition)` key,
/// created lazily on first use.
#[derive(Debug, Default)]
pub struct GroupLock {
    locks: Mutex<HashMap<GroupKey, Arc<Mutex<()>>>>,
}

impl GroupLock {
    /// An empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`, blocking until it is free.
    pub fn with_lock<R>(&self, key: GroupKey, f: impl FnOnce() -> R) -> R {
        let key_lock = {
            let mut table = self.locks.lock().expect("group lock table poisoned");
            table.entry(key).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        let _guard = key_lock.lock().expect("group lock poisoned");
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_keys_do_not_block_each_other() {
        let lock = GroupLock::new();
        let a = lock.with_lock((DimGroupId(1), (1, 0, 0)), || 1 + 1);
        let b = lock.with_lock((DimGroupId(2), (0, 1, 0)), || 2 + 2);
        assert_eq!(a, 2);
        assert_eq!(b, 4);
    }

    #[test]
    fn test_same_key_reentrant_calls_run_sequentially() {
        let lock = GroupLock::new();
        let key = (DimGroupId(1), (1, 0, 0));
        let first = lock.with_lock(key, || 10);
        let second = lock.with_lock(key, || 20);
        assert_eq!((first, second), (10, 20));
    }
}
