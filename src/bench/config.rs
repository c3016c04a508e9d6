/*!
 * Benchmark Configuration
 *
 * Validated once before any worker starts, then shared read-only.
 */

use crate::core::errors::ConfigError;
use crate::list::YieldPoints;
use crate::sync::SyncDiscipline;

/// Upper bound on the number of lists
pub const MAX_SHARDS: usize = 1 << 16;

/// List operations issued per element (insert, length, lookup+delete)
pub const OPS_PER_ELEMENT: u64 = 3;

/// Run parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Worker thread count
    pub threads: usize,
    /// Elements handled by each worker
    pub iterations: usize,
    /// Shard (list) count
    pub lists: usize,
    pub sync: SyncDiscipline,
    pub yields: YieldPoints,
    /// Key generator seed; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            iterations: 1,
            lists: 1,
            sync: SyncDiscipline::None,
            yields: YieldPoints::NONE,
            seed: None,
        }
    }
}

impl BenchConfig {
    pub fn new(threads: usize, iterations: usize) -> Self {
        Self {
            threads,
            iterations,
            ..Default::default()
        }
    }

    pub fn with_lists(mut self, lists: usize) -> Self {
        self.lists = lists;
        self
    }

    pub fn with_sync(mut self, sync: SyncDiscipline) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_yields(mut self, yields: YieldPoints) -> Self {
        self.yields = yields;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject anything a run can't start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NonPositive { field: "threads" });
        }
        if self.iterations == 0 {
            return Err(ConfigError::NonPositive {
                field: "iterations",
            });
        }
        if self.lists == 0 {
            return Err(ConfigError::NonPositive { field: "lists" });
        }
        if self.lists > MAX_SHARDS {
            return Err(ConfigError::ShardRange(self.lists));
        }

        // Key ids are 32-bit
        let fits = self
            .threads
            .checked_mul(self.iterations)
            .is_some_and(|elements| elements <= u32::MAX as usize);
        if !fits {
            return Err(ConfigError::TooManyElements {
                threads: self.threads,
                iterations: self.iterations,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn elements(&self) -> usize {
        self.threads * self.iterations
    }

    #[inline]
    pub fn operations(&self) -> u64 {
        OPS_PER_ELEMENT * self.elements() as u64
    }

    /// Run name, e.g. `list-id-m`
    pub fn label(&self) -> String {
        format!("list-{}-{}", self.yields, self.sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_counts() {
        assert_eq!(
            BenchConfig::new(0, 10).validate(),
            Err(ConfigError::NonPositive { field: "threads" })
        );
        assert_eq!(
            BenchConfig::new(2, 0).validate(),
            Err(ConfigError::NonPositive {
                field: "iterations"
            })
        );
        assert_eq!(
            BenchConfig::new(2, 2).with_lists(0).validate(),
            Err(ConfigError::NonPositive { field: "lists" })
        );
    }

    #[test]
    fn test_rejects_shard_range() {
        assert_eq!(
            BenchConfig::new(1, 1).with_lists(MAX_SHARDS + 1).validate(),
            Err(ConfigError::ShardRange(MAX_SHARDS + 1))
        );
        assert!(BenchConfig::new(1, 1).with_lists(MAX_SHARDS).validate().is_ok());
    }

    #[test]
    fn test_rejects_element_overflow() {
        let config = BenchConfig::new(usize::MAX, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyElements { .. })
        ));
    }

    #[test]
    fn test_label_and_operations() {
        let config = BenchConfig::new(4, 100)
            .with_sync(SyncDiscipline::Mutex)
            .with_yields(YieldPoints::parse("li").unwrap());
        assert_eq!(config.label(), "list-il-m");
        assert_eq!(config.operations(), 1200);

        assert_eq!(BenchConfig::default().label(), "list-none-none");
    }
}
