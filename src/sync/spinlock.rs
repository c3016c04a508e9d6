/*!
 * Test-and-Set Spinlock
 *
 * Unbounded busy wait on an atomic exchange. No backoff, no fairness:
 * waiters pay the full contention cost, which is what the benchmark measures.
 */

use std::sync::atomic::{AtomicBool, Ordering};

/// Busy-wait lock over a single flag
#[derive(Debug, Default)]
pub struct SpinLock {
    locked: AtomicBool,
}

/// Releases the lock on drop
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct SpinGuard<'a> {
    lock: &'a SpinLock,
}

impl SpinLock {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Spin until the flag flips from clear to set
    #[inline]
    pub fn lock(&self) -> SpinGuard<'_> {
        while self.locked.swap(true, Ordering::Acquire) {
            std::hint::spin_loop();
        }
        SpinGuard { lock: self }
    }

    #[inline]
    pub fn try_lock(&self) -> Option<SpinGuard<'_>> {
        (!self.locked.swap(true, Ordering::Acquire)).then(|| SpinGuard { lock: self })
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Relaxed)
    }
}

impl Drop for SpinGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::UnsafeCell;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_and_release() {
        let lock = SpinLock::new();
        {
            let _guard = lock.lock();
            assert!(lock.is_locked());
            assert!(lock.try_lock().is_none());
        }
        assert!(!lock.is_locked());
        assert!(lock.try_lock().is_some());
    }

    struct Counter {
        lock: SpinLock,
        value: UnsafeCell<u64>,
    }

    // SAFETY: `value` is only touched while `lock` is held
    unsafe impl Sync for Counter {}

    #[test]
    fn test_mutual_exclusion() {
        let counter = Arc::new(Counter {
            lock: SpinLock::new(),
            value: UnsafeCell::new(0),
        });

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        let _guard = counter.lock.lock();
                        // SAFETY: guarded by the spinlock
                        unsafe { *counter.value.get() += 1 };
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let _guard = counter.lock.lock();
        // SAFETY: guarded by the spinlock
        assert_eq!(unsafe { *counter.value.get() }, 40_000);
    }
}
