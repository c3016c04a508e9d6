/*!
 * listbench
 * Sharded sorted-list stress harness for comparing lock disciplines
 */

pub mod bench;
pub mod core;
pub mod fault;
pub mod list;
pub mod monitoring;
pub mod shard;
pub mod sync;

// Re-exports
pub use bench::{BenchConfig, Harness, RunSummary, WorkerPhase};
pub use crate::core::errors::{BenchError, BenchResult, ConfigError, ExitStatus, ListError};
pub use crate::core::types::{Handle, Key, KeyValue};
pub use fault::install_fault_trap;
pub use list::{Arena, SortedList, YieldPoint, YieldPoints};
pub use monitoring::init_tracing;
pub use shard::{Partitioner, ShardSet};
pub use sync::{ShardLock, SpinLock, SyncDiscipline, WaitClock};
