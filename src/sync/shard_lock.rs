/*!
 * Shard Lock
 * One lock per shard, in whichever discipline the run selected
 */

use super::discipline::SyncDiscipline;
use super::spinlock::SpinLock;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Per-thread accumulator of time spent blocked on shard mutexes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitClock {
    total: Duration,
    acquisitions: u64,
}

impl WaitClock {
    pub const fn new() -> Self {
        Self {
            total: Duration::ZERO,
            acquisitions: 0,
        }
    }

    #[inline]
    pub fn record(&mut self, waited: Duration) {
        self.total += waited;
        self.acquisitions += 1;
    }

    #[inline]
    pub fn total(&self) -> Duration {
        self.total
    }

    #[inline]
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    pub fn merge(&mut self, other: &WaitClock) {
        self.total += other.total;
        self.acquisitions += other.acquisitions;
    }
}

/// Lock guarding a single shard
pub enum ShardLock {
    /// Unsynchronized: the operation runs immediately
    None,
    /// Blocking mutex; acquisition time goes into the caller's [`WaitClock`]
    Mutex(Mutex<()>),
    /// Busy-wait test-and-set
    Spin(SpinLock),
}

impl ShardLock {
    pub fn new(discipline: SyncDiscipline) -> Self {
        match discipline {
            SyncDiscipline::None => ShardLock::None,
            SyncDiscipline::Mutex => ShardLock::Mutex(Mutex::new(())),
            SyncDiscipline::Spinlock => ShardLock::Spin(SpinLock::new()),
        }
    }

    pub fn discipline(&self) -> SyncDiscipline {
        match self {
            ShardLock::None => SyncDiscipline::None,
            ShardLock::Mutex(_) => SyncDiscipline::Mutex,
            ShardLock::Spin(_) => SyncDiscipline::Spinlock,
        }
    }

    /// Run `op` as one critical section
    #[inline]
    pub fn with_lock<F, R>(&self, wait: &mut WaitClock, op: F) -> R
    where
        F: FnOnce() -> R,
    {
        match self {
            ShardLock::None => op(),
            ShardLock::Mutex(mutex) => {
                let start = Instant::now();
                let _guard = mutex.lock();
                wait.record(start.elapsed());
                op()
            }
            ShardLock::Spin(spin) => {
                let _guard = spin.lock();
                op()
            }
        }
    }
}
