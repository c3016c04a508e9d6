/*!
 * Run Summary
 * The single record emitted after a successful run
 */

use super::config::BenchConfig;
use crate::sync::WaitClock;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Aggregated timing for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub label: String,
    pub threads: usize,
    pub iterations: usize,
    pub lists: usize,
    pub operations: u64,
    pub total_ns: u64,
    pub avg_ns: u64,
    /// Mean mutex acquisition wait per operation; mutex runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_avg_ns: Option<u64>,
}

#[inline]
fn nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

impl RunSummary {
    pub fn new(config: &BenchConfig, elapsed: Duration, wait: WaitClock) -> Self {
        let operations = config.operations();
        let total_ns = nanos(elapsed);
        let wait_avg_ns = config
            .sync
            .records_wait()
            .then(|| nanos(wait.total()) / operations);

        Self {
            label: config.label(),
            threads: config.threads,
            iterations: config.iterations,
            lists: config.lists,
            operations,
            total_ns,
            avg_ns: total_ns / operations,
            wait_avg_ns,
        }
    }

    /// Comma-separated record
    pub fn csv_line(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{}",
            self.label,
            self.threads,
            self.iterations,
            self.lists,
            self.operations,
            self.total_ns,
            self.avg_ns
        )?;
        if let Some(wait) = self.wait_avg_ns {
            write!(f, ",{wait}")?;
        }
        Ok(())
    }
}
