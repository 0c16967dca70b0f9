//! Parallel processing strategies

use rayon::{ThreadPool, ThreadPoolBuilder};
use texeval_core::{Error, Result};

/// Processing mode for a batch of sub-images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Single-threaded processing
    Sequential,
    /// Parallel processing on rayon's global pool (all available cores)
    #[default]
    Parallel,
    /// Parallel on a dedicated pool with the given number of threads
    ParallelWith(usize),
}

impl ProcessingMode {
    /// Mode for a `--threads` style option: unset means all cores,
    /// one thread means sequential.
    pub fn from_threads(threads: Option<usize>) -> Self {
        match threads {
            None | Some(0) => ProcessingMode::Parallel,
            Some(1) => ProcessingMode::Sequential,
            Some(n) => ProcessingMode::ParallelWith(n),
        }
    }

    /// Build the dedicated pool: one thread for `Sequential`, `n` for
    /// `ParallelWith(n)`. `Parallel` uses rayon's global pool.
    pub fn thread_pool(&self) -> Result<Option<ThreadPool>> {
        let threads = match self {
            ProcessingMode::Sequential => 1,
            ProcessingMode::ParallelWith(threads) => *threads,
            ProcessingMode::Parallel => return Ok(None),
        };
        ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("texeval-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| Error::Other(format!("Failed to build thread pool: {}", e)))
    }

    /// Number of workers that run concurrently in this mode
    pub fn concurrency(&self) -> usize {
        match self {
            ProcessingMode::Sequential => 1,
            ProcessingMode::Parallel => num_cpus(),
            ProcessingMode::ParallelWith(threads) => *threads,
        }
    }
}

/// Get the number of available CPU cores
pub fn num_cpus() -> usize {
    rayon::current_num_threads()
}
