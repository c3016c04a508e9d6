/*!
 * Synchronization Strategies
 *
 * Three ways to guard a shard, behind one `with_lock` entry point:
 * - None: no serialization (deliberately unsafe baseline)
 * - Mutex: blocking, with per-thread wait-time accounting
 * - Spinlock: atomic test-and-set busy wait
 */

mod discipline;
mod shard_lock;
mod spinlock;

pub use discipline::SyncDiscipline;
pub use shard_lock::{ShardLock, WaitClock};
pub use spinlock::{SpinGuard, SpinLock};
