/*!
 * Benchmark Worker
 *
 * Each worker owns a disjoint slice of elements and walks it through three
 * phases: insert, length query, lookup+delete. Phases run strictly in order
 * with no retries. Any failure ends the worker and raises the shared abort
 * flag so the others stop early.
 */

use super::harness::BenchContext;
use crate::core::errors::{BenchError, BenchResult};
use crate::core::types::{Handle, Key};
use crate::sync::WaitClock;
use std::hint::black_box;
use std::sync::atomic::Ordering;
use tracing::debug;

/// Worker lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Start,
    Inserting,
    LengthQuerying,
    LookupDeleting,
    Done,
}

/// What a worker hands back after joining
#[derive(Debug, Clone, Copy)]
pub struct WorkerReport {
    pub thread: usize,
    /// Last phase entered; `Done` unless the run was aborted
    pub phase: WorkerPhase,
    pub wait: WaitClock,
}

pub(crate) struct Worker<'a> {
    thread: usize,
    ctx: &'a BenchContext,
    slice: Vec<(Handle, Key)>,
    wait: WaitClock,
    phase: WorkerPhase,
}

impl<'a> Worker<'a> {
    pub(crate) fn new(thread: usize, ctx: &'a BenchContext, start: usize, len: usize) -> Self {
        let arena = ctx.shards.arena();
        let slice = arena
            .elements(start, len)
            .filter_map(|element| arena.key(element).map(|key| (element, key)))
            .collect();

        Self {
            thread,
            ctx,
            slice,
            wait: WaitClock::new(),
            phase: WorkerPhase::Start,
        }
    }

    pub(crate) fn run(mut self) -> BenchResult<WorkerReport> {
        let result = self.drive();
        if result.is_err() {
            self.ctx.abort.store(true, Ordering::Relaxed);
        }
        result.map(|()| self.report())
    }

    fn drive(&mut self) -> BenchResult<()> {
        let ctx = self.ctx;
        let shards = &ctx.shards;
        let thread = self.thread;

        if !self.enter(WorkerPhase::Inserting) {
            return Ok(());
        }
        for &(element, key) in &self.slice {
            let shard = shards.shard_for(&key);
            shards
                .with_lock(shard, &mut self.wait, |list| list.insert(element))
                .map_err(|err| BenchError::from_list(thread, shard, err))?;
        }

        if !self.enter(WorkerPhase::LengthQuerying) {
            return Ok(());
        }
        for &(_, key) in &self.slice {
            let shard = shards.shard_for(&key);
            let length = shards
                .with_lock(shard, &mut self.wait, |list| list.length())
                .map_err(|err| BenchError::from_list(thread, shard, err))?;
            black_box(length);
        }

        if !self.enter(WorkerPhase::LookupDeleting) {
            return Ok(());
        }
        for &(_, key) in &self.slice {
            let shard = shards.shard_for(&key);
            shards.with_lock(shard, &mut self.wait, |list| {
                let found = list
                    .lookup(&key)
                    .map_err(|err| BenchError::from_list(thread, shard, err))?
                    .ok_or_else(|| BenchError::LookupMiss {
                        thread,
                        shard,
                        key: key.to_string(),
                    })?;
                list.delete(found)
                    .map_err(|err| BenchError::from_list(thread, shard, err))
            })?;
        }

        self.enter(WorkerPhase::Done);
        Ok(())
    }

    /// Move to `phase` unless another worker already failed
    fn enter(&mut self, phase: WorkerPhase) -> bool {
        if phase != WorkerPhase::Done && self.ctx.abort.load(Ordering::Relaxed) {
            debug!(thread = self.thread, phase = ?self.phase, "worker aborted");
            return false;
        }
        debug!(thread = self.thread, from = ?self.phase, to = ?phase, "worker phase");
        self.phase = phase;
        true
    }

    fn report(&self) -> WorkerReport {
        WorkerReport {
            thread: self.thread,
            phase: self.phase,
            wait: self.wait,
        }
    }
}
