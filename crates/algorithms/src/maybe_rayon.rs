//! Rayon or sequential iteration, selected by the `parallel` feature.
//!
//! Code in this crate writes `(0..n).into_par_iter()` unconditionally. With
//! the feature on that is rayon's parallel iterator; with it off the call
//! falls back to `into_iter()` and the chain runs on the calling thread.
//! Both paths collect in index order.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
pub use fallback::IntoParallelIterator;

#[cfg(not(feature = "parallel"))]
mod fallback {
    /// Sequential stand-in for `rayon::prelude::IntoParallelIterator`
    pub trait IntoParallelIterator: IntoIterator + Sized {
        fn into_par_iter(self) -> Self::IntoIter {
            self.into_iter()
        }
    }

    impl<I: IntoIterator> IntoParallelIterator for I {}
}
