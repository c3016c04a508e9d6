/*!
 * Benchmark Harness
 *
 * Drives the sharded list under a chosen sync discipline:
 * - config: validated, frozen run parameters
 * - worker: per-thread insert / length / lookup+delete phases
 * - harness: thread pool, timing, final drain check
 * - report: summary record
 */

mod config;
mod harness;
mod report;
mod worker;

pub use config::{BenchConfig, MAX_SHARDS, OPS_PER_ELEMENT};
pub use harness::{BenchContext, Harness, KEY_RANGE};
pub use report::RunSummary;
pub use worker::{WorkerPhase, WorkerReport};
