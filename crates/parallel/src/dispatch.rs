//! Ordered fan-out/fan-in over a batch of sub-images
//!
//! Every item of a batch becomes one unit of work on the pool. Units report
//! `(index, result)` through a shared channel in whatever order they finish;
//! the dispatcher waits for the whole batch and then restores input order by
//! sorting on the index tag. Downstream class inference is positional, so
//! `output[i]` must always be the result for `input[i]`.

use crossbeam_channel::unbounded;
use rayon::ThreadPool;
use texeval_core::{Error, Result};

use crate::strategy::ProcessingMode;

/// Runs one batch at a time on a fixed processing mode
pub struct Dispatcher {
    mode: ProcessingMode,
    pool: Option<ThreadPool>,
}

impl Dispatcher {
    /// Create a dispatcher, building its dedicated pool if the mode needs one
    pub fn new(mode: ProcessingMode) -> Result<Self> {
        let pool = mode.thread_pool()?;
        Ok(Self { mode, pool })
    }

    /// Processing mode of this dispatcher
    pub fn mode(&self) -> ProcessingMode {
        self.mode
    }

    /// Run `op` on the dedicated pool, or on the caller when there is none.
    ///
    /// Rayon iterators inside `op` then share the dispatcher's thread bound.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Apply `compute` to every item and return the results in input order.
    ///
    /// The first failed unit fails the whole batch with [`Error::Worker`];
    /// no partial results are returned. A panicking unit unwinds out of
    /// this call once the rest of the batch has finished.
    pub fn dispatch<I, T, F>(&self, items: &[I], compute: F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> Result<T> + Sync,
    {
        let (tx, rx) = unbounded::<(usize, Result<T>)>();

        match self.mode {
            ProcessingMode::Sequential => {
                for (index, item) in items.iter().enumerate() {
                    // The receiver outlives this loop, so send cannot fail
                    let _ = tx.send((index, compute(item)));
                }
            }
            ProcessingMode::Parallel | ProcessingMode::ParallelWith(_) => {
                let compute = &compute;
                let fan_out = || {
                    rayon::scope(|s| {
                        for (index, item) in items.iter().enumerate() {
                            let tx = tx.clone();
                            s.spawn(move |_| {
                                let _ = tx.send((index, compute(item)));
                            });
                        }
                    })
                };
                match &self.pool {
                    Some(pool) => pool.install(fan_out),
                    None => fan_out(),
                }
            }
        }
        drop(tx);

        let mut tagged: Vec<(usize, T)> = Vec::with_capacity(items.len());
        for (index, result) in rx.iter() {
            match result {
                Ok(value) => tagged.push((index, value)),
                Err(e) => {
                    return Err(Error::Worker {
                        index,
                        source: Box::new(e),
                    });
                }
            }
        }

        if tagged.len() != items.len() {
            return Err(Error::Other(format!(
                "Batch returned {} results for {} items",
                tagged.len(),
                items.len()
            )));
        }

        tagged.sort_unstable_by_key(|(index, _)| *index);
        Ok(tagged.into_iter().map(|(_, value)| value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_dispatch_restores_input_order() {
        let dispatcher = Dispatcher::new(ProcessingMode::ParallelWith(4)).unwrap();
        let items: Vec<u64> = (0..16).collect();

        // Early items sleep longest, so they finish last
        let out = dispatcher
            .dispatch(&items, |&i| {
                sleep(Duration::from_millis((16 - i) * 3));
                Ok(i * 10)
            })
            .unwrap();

        let expected: Vec<u64> = items.iter().map(|i| i * 10).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_dispatch_all_modes_agree() {
        let items: Vec<usize> = (0..37).collect();
        let square = |&i: &usize| -> Result<usize> { Ok(i * i) };

        let mut outputs = Vec::new();
        for mode in [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel,
            ProcessingMode::ParallelWith(3),
        ] {
            let dispatcher = Dispatcher::new(mode).unwrap();
            outputs.push(dispatcher.dispatch(&items, square).unwrap());
        }

        assert_eq!(outputs[0], outputs[1]);
        assert_eq!(outputs[1], outputs[2]);
    }

    #[test]
    fn test_install_uses_dedicated_pool() {
        let dispatcher = Dispatcher::new(ProcessingMode::ParallelWith(2)).unwrap();
        assert_eq!(dispatcher.install(rayon::current_num_threads), 2);

        let sequential = Dispatcher::new(ProcessingMode::Sequential).unwrap();
        assert_eq!(sequential.install(|| 7), 7);
    }

    #[test]
    fn test_dispatch_empty_batch() {
        let dispatcher = Dispatcher::new(ProcessingMode::Parallel).unwrap();
        let out: Vec<u8> = dispatcher.dispatch(&[] as &[u8], |&v| Ok(v)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_worker_failure_aborts_batch() {
        let dispatcher = Dispatcher::new(ProcessingMode::ParallelWith(2)).unwrap();
        let items: Vec<usize> = (0..8).collect();

        let result = dispatcher.dispatch(&items, |&i| {
            if i == 5 {
                Err(Error::Algorithm("boom".into()))
            } else {
                Ok(i)
            }
        });

        match result {
            Err(Error::Worker { index, .. }) => assert_eq!(index, 5),
            other => panic!("expected worker failure, got {:?}", other),
        }
    }
}
