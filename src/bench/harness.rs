/*!
 * Benchmark Harness
 *
 * Builds the arena and shards, runs a fixed pool of workers over disjoint
 * element slices, then checks that every shard drained back to empty.
 */

use super::config::BenchConfig;
use super::report::RunSummary;
use super::worker::{Worker, WorkerReport};
use crate::core::errors::{BenchError, BenchResult, ConfigError};
use crate::core::types::KeyValue;
use crate::list::Arena;
use crate::shard::ShardSet;
use crate::sync::WaitClock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Printable ASCII, space through tilde
pub const KEY_RANGE: RangeInclusive<KeyValue> = b' '..=b'~';

/// State shared by every worker of one run
pub struct BenchContext {
    pub config: BenchConfig,
    pub shards: ShardSet,
    /// Raised by the first worker that fails
    pub abort: AtomicBool,
}

/// One benchmark run
pub struct Harness {
    config: BenchConfig,
}

impl Harness {
    pub fn new(config: BenchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Draw one key value per element
    pub fn generate_keys(config: &BenchConfig) -> Vec<KeyValue> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..config.elements())
            .map(|_| rng.gen_range(KEY_RANGE))
            .collect()
    }

    /// Run with freshly generated keys
    pub fn run(self) -> BenchResult<RunSummary> {
        let keys = Self::generate_keys(&self.config);
        self.run_with_keys(keys)
    }

    /// Run with caller-supplied keys, one per element in thread-slice order
    pub fn run_with_keys(self, keys: Vec<KeyValue>) -> BenchResult<RunSummary> {
        let config = self.config;
        if keys.len() != config.elements() {
            return Err(ConfigError::InvalidArgument(format!(
                "expected {} keys, got {}",
                config.elements(),
                keys.len()
            ))
            .into());
        }

        let span = info_span!("bench_run", run_id = %Uuid::new_v4(), label = %config.label());
        let _entered = span.enter();

        let arena = Arena::new(config.lists, keys);
        let shards = ShardSet::new(arena, config.sync, config.yields);
        let ctx = Arc::new(BenchContext {
            config,
            shards,
            abort: AtomicBool::new(false),
        });

        info!(
            threads = ctx.config.threads,
            iterations = ctx.config.iterations,
            lists = ctx.config.lists,
            "starting run"
        );

        let start = Instant::now();
        let handles = spawn_workers(&ctx)?;
        let wait = join_workers(handles)?;
        let elapsed = start.elapsed();

        check_drained(&ctx.shards)?;

        let summary = RunSummary::new(&ctx.config, elapsed, wait);
        info!(
            total_ns = summary.total_ns,
            avg_ns = summary.avg_ns,
            "run complete"
        );
        Ok(summary)
    }
}

fn spawn_workers(ctx: &Arc<BenchContext>) -> BenchResult<Vec<JoinHandle<BenchResult<WorkerReport>>>> {
    let iterations = ctx.config.iterations;
    let mut handles = Vec::with_capacity(ctx.config.threads);

    for thread in 0..ctx.config.threads {
        let worker_ctx = Arc::clone(ctx);
        let spawned = thread::Builder::new()
            .name(format!("listbench-worker-{thread}"))
            .spawn(move || {
                Worker::new(thread, &worker_ctx, thread * iterations, iterations).run()
            });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                // Nothing partial is worth keeping; stop the ones already running
                ctx.abort.store(true, std::sync::atomic::Ordering::Relaxed);
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(BenchError::ThreadSpawn { thread, source });
            }
        }
    }
    Ok(handles)
}

/// Join every worker, keeping the lowest-numbered failure
fn join_workers(handles: Vec<JoinHandle<BenchResult<WorkerReport>>>) -> BenchResult<WaitClock> {
    let mut wait = WaitClock::new();
    let mut failure = None;

    for (thread, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.join() {
            Ok(outcome) => outcome,
            Err(_) => Err(BenchError::ThreadJoin { thread }),
        };
        match outcome {
            Ok(report) => {
                debug!(thread, phase = ?report.phase, waited = ?report.wait.total(), "worker joined");
                wait.merge(&report.wait);
            }
            Err(err) => {
                debug!(thread, error = %err, "worker failed");
                failure.get_or_insert(err);
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(wait),
    }
}

/// Every inserted element was deleted, so every shard must be empty
fn check_drained(shards: &ShardSet) -> BenchResult<()> {
    let lengths = shards
        .lengths()
        .map_err(|(shard, source)| BenchError::Fault { shard, source })?;

    match lengths.iter().position(|&length| length != 0) {
        Some(shard) => Err(BenchError::NonEmptyShard {
            shard,
            length: lengths[shard],
        }),
        None => Ok(()),
    }
}
