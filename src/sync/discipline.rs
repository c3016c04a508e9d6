/*!
 * Synchronization Discipline
 * Which mutual-exclusion strategy guards each shard
 */

use crate::core::errors::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Mutual-exclusion strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncDiscipline {
    /// No serialization at all (unsafe baseline)
    #[default]
    None,
    /// Blocking mutex with wait-time instrumentation
    Mutex,
    /// Test-and-set busy wait, no backoff
    Spinlock,
}

impl SyncDiscipline {
    /// Short label used in run names (`none`, `m`, `s`)
    pub const fn label(self) -> &'static str {
        match self {
            SyncDiscipline::None => "none",
            SyncDiscipline::Mutex => "m",
            SyncDiscipline::Spinlock => "s",
        }
    }

    /// Whether acquisition wait time is measured
    #[inline]
    pub const fn records_wait(self) -> bool {
        matches!(self, SyncDiscipline::Mutex)
    }
}

impl FromStr for SyncDiscipline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SyncDiscipline::None),
            "m" | "mutex" => Ok(SyncDiscipline::Mutex),
            "s" | "spin" | "spinlock" => Ok(SyncDiscipline::Spinlock),
            other => Err(ConfigError::InvalidSync(other.to_string())),
        }
    }
}

impl fmt::Display for SyncDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
