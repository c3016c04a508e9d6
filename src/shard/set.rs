/*!
 * Shard Set
 * N independent (list, lock) pairs over one shared node arena
 */

use super::partitioner::Partitioner;
use crate::core::errors::ListError;
use crate::core::types::{Handle, Key};
use crate::list::{Arena, SortedList, YieldPoints};
use crate::sync::{ShardLock, SyncDiscipline, WaitClock};

/// One list sentinel and the lock that serializes it
///
/// Aligned so neighboring locks don't share a cache line.
#[repr(align(64))]
struct Shard {
    head: Handle,
    lock: ShardLock,
}

/// Fixed set of sharded sorted lists
///
/// Owns the arena for the duration of a run; element storage is dropped
/// together with the set, after the final length check.
pub struct ShardSet {
    arena: Arena,
    shards: Box<[Shard]>,
    partitioner: Partitioner,
    yields: YieldPoints,
}

impl ShardSet {
    /// One shard per sentinel in `arena`
    pub fn new(arena: Arena, discipline: SyncDiscipline, yields: YieldPoints) -> Self {
        let shards: Box<[Shard]> = (0..arena.list_count())
            .map(|index| Shard {
                head: arena.sentinel(index),
                lock: ShardLock::new(discipline),
            })
            .collect();
        let partitioner = Partitioner::new(shards.len());

        Self {
            arena,
            shards,
            partitioner,
            yields,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    #[inline]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[inline]
    pub fn partitioner(&self) -> Partitioner {
        self.partitioner
    }

    #[inline]
    pub fn shard_for(&self, key: &Key) -> usize {
        self.partitioner.shard(key)
    }

    /// Unguarded view of shard `index`
    ///
    /// Only safe to rely on when no other thread is mutating that shard.
    #[inline]
    pub fn list(&self, index: usize) -> SortedList<'_> {
        SortedList::new(&self.arena, self.shards[index].head, self.yields)
    }

    /// Run `op` on shard `index` inside its critical section
    #[inline]
    pub fn with_lock<F, R>(&self, index: usize, wait: &mut WaitClock, op: F) -> R
    where
        F: FnOnce(SortedList<'_>) -> R,
    {
        let list = self.list(index);
        self.shards[index].lock.with_lock(wait, || op(list))
    }

    /// Lengths of every shard, each read under its lock
    pub fn lengths(&self) -> Result<Vec<usize>, (usize, ListError)> {
        let mut scratch = WaitClock::new();
        (0..self.len())
            .map(|index| {
                self.with_lock(index, &mut scratch, |list| list.length())
                    .map_err(|err| (index, err))
            })
            .collect()
    }
}
