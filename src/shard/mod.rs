/*!
 * Sharding
 * Hash partitioning of keys across independent (list, lock) pairs
 */

mod partitioner;
mod set;

pub use partitioner::Partitioner;
pub use set::ShardSet;
