/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use crate::core::types::Handle;
use miette::Diagnostic;
use thiserror::Error;

/// Failures reported by the list core
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// Neighbor links around `element` do not point back at it
    #[error("corrupted links around element {element}")]
    Corrupted { element: Handle },

    /// A traversal followed an unlinked node or never returned to the sentinel
    #[error("traversal fault in list {list} at node {at}")]
    Fault { list: Handle, at: Handle },
}

/// Invalid benchmark configuration, detected before any worker starts
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("{field} must be positive")]
    #[diagnostic(code(config::non_positive), help("Pass a count of at least 1."))]
    NonPositive { field: &'static str },

    #[error("shard count {0} out of range")]
    #[diagnostic(
        code(config::shard_range),
        help("Use between 1 and 65536 lists.")
    )]
    ShardRange(usize),

    #[error("{threads} threads x {iterations} iterations is too many elements")]
    #[diagnostic(
        code(config::too_many_elements),
        help("Reduce --threads or --iterations.")
    )]
    TooManyElements { threads: usize, iterations: usize },

    #[error("invalid sync discipline '{0}'")]
    #[diagnostic(code(config::invalid_sync), help("Use one of: none, m, s."))]
    InvalidSync(String),

    #[error("invalid yield option '{0}'")]
    #[diagnostic(
        code(config::invalid_yield),
        help("Combine the letters i (insert), d (delete) and l (lookup).")
    )]
    InvalidYield(char),

    #[error("{0}")]
    #[diagnostic(code(config::invalid_argument))]
    InvalidArgument(String),
}

/// Fatal benchmark outcome
#[derive(Error, Debug, Diagnostic)]
pub enum BenchError {
    #[error("Invalid configuration: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create thread {thread}: {source}")]
    #[diagnostic(
        code(bench::thread_spawn),
        help("The system refused another thread. Lower --threads.")
    )]
    ThreadSpawn {
        thread: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to wait for thread {thread} to terminate")]
    #[diagnostic(code(bench::thread_join))]
    ThreadJoin { thread: usize },

    #[error("Key {key} can not be found in list {shard} (thread {thread})")]
    #[diagnostic(
        code(bench::lookup_miss),
        help("An inserted element became unreachable. The sync discipline is unsound.")
    )]
    LookupMiss {
        thread: usize,
        shard: usize,
        key: String,
    },

    #[error("Failed to delete element from list {shard} (thread {thread}): {source}")]
    #[diagnostic(
        code(bench::corruption),
        help("Neighbor links were inconsistent. The sync discipline is unsound.")
    )]
    Corruption {
        thread: usize,
        shard: usize,
        #[source]
        source: ListError,
    },

    #[error("Length of list {shard} is {length}, not 0")]
    #[diagnostic(code(bench::non_empty_shard))]
    NonEmptyShard { shard: usize, length: usize },

    #[error("Run failed, caught fault in list {shard}: {source}")]
    #[diagnostic(code(bench::fault))]
    Fault {
        shard: usize,
        #[source]
        source: ListError,
    },
}

impl BenchError {
    /// Map a list failure raised in `shard` to the matching fatal outcome
    pub fn from_list(thread: usize, shard: usize, err: ListError) -> Self {
        match err {
            ListError::Corrupted { .. } => BenchError::Corruption {
                thread,
                shard,
                source: err,
            },
            ListError::Fault { .. } => BenchError::Fault { shard, source: err },
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self {
            BenchError::Config(_) => ExitStatus::Config,
            BenchError::ThreadSpawn { .. } | BenchError::ThreadJoin { .. } => ExitStatus::Resource,
            BenchError::LookupMiss { .. } | BenchError::Corruption { .. } => ExitStatus::Corruption,
            BenchError::NonEmptyShard { .. } => ExitStatus::NonEmptyShard,
            BenchError::Fault { .. } => ExitStatus::TrappedFault,
        }
    }
}

/// Process exit status for every terminal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitStatus {
    Success = 0,
    Config = 1,
    Corruption = 2,
    NonEmptyShard = 3,
    Resource = 4,
    TrappedFault = 5,
}

impl ExitStatus {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

pub type BenchResult<T> = Result<T, BenchError>;
