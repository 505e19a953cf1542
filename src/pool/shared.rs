//! Thread-safe handle around a [`RangePool`].

use super::{PoolItem, PoolSnapshot, RangePool};
use crate::error::PoolResult;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cloneable, mutex-guarded pool.
///
/// Each allocate or release runs under the lock, so concurrent callers never
/// race on the same gap. Clones share the same pool.
#[derive(Debug)]
pub struct SharedPool<T: PoolItem> {
    inner: Arc<Mutex<RangePool<T>>>,
}

impl<T: PoolItem> SharedPool<T> {
    /// Wrap an existing pool.
    pub fn new(pool: RangePool<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Reserve `item`, or the lowest free item when `None`.
    pub fn allocate(&self, item: Option<T>) -> PoolResult<T> {
        self.lock().allocate(item)
    }

    /// Return a reserved item to the pool.
    pub fn release(&self, item: T) -> PoolResult<()> {
        self.lock().release(item)
    }

    /// Check whether `item` is currently reserved.
    pub fn is_reserved(&self, item: T) -> bool {
        self.lock().is_reserved(item)
    }

    /// Capture the pool state.
    pub fn snapshot(&self) -> PoolSnapshot<T> {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the pool.
    pub fn with<R>(&self, f: impl FnOnce(&mut RangePool<T>) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, RangePool<T>> {
        // pool state stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: PoolItem> Clone for SharedPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: PoolItem> From<RangePool<T>> for SharedPool<T> {
    fn from(pool: RangePool<T>) -> Self {
        Self::new(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::thread;

    #[test]
    fn test_shared_pool_clone() {
        let pool1 = SharedPool::new(RangePool::<u32>::new(0, 10).unwrap());
        let pool2 = pool1.clone();

        assert_eq!(pool1.allocate(None).unwrap(), 0);
        assert!(pool2.is_reserved(0));
        assert_eq!(pool2.allocate(None).unwrap(), 1);
    }

    #[test]
    fn test_concurrent_allocations_are_unique() {
        let pool = SharedPool::new(RangePool::<u32>::new(0, 400).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|_| pool.allocate(None).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = BTreeSet::new();
        for handle in handles {
            for item in handle.join().unwrap() {
                assert!(seen.insert(item), "duplicate allocation {item}");
            }
        }

        assert_eq!(seen.len(), 400);
        assert!(pool.with(|p| p.is_full()));
        assert!(pool.allocate(None).is_err());
    }

    #[test]
    fn test_release_through_handle() {
        let pool: SharedPool<u16> = RangePool::with_reserved(0, 3, [0, 1, 2]).unwrap().into();
        pool.release(1).unwrap();
        assert_eq!(pool.allocate(None).unwrap(), 1);
        assert_eq!(pool.snapshot().reserved, vec![0, 1, 2]);
    }
}
