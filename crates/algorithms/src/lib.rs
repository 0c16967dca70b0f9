//! # texeval Algorithms
//!
//! Texture descriptors and their retrieval benchmark.
//!
//! ## Modules
//!
//! - **texture**: GLCM, LBP and WLD descriptors
//! - **statistics**: column normalization of the descriptor matrix
//! - **retrieval**: Euclidean ranking and precision/recall evaluation
//! - **pipeline**: per-image extraction and end-to-end runs

pub(crate) mod maybe_rayon;
pub mod numeric;
pub mod pipeline;
pub mod retrieval;
pub mod statistics;
pub mod texture;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::pipeline::{BenchmarkParams, BenchmarkReport, TextureBenchmark};
    pub use crate::retrieval::{PrecisionCurve, RetrievalEvaluator};
    pub use crate::statistics::normalize_columns;
    pub use crate::texture::{
        glcm_descriptor, lbp_descriptor, wld_descriptor, Descriptor, Glcm, Lbp, Wld,
    };
    pub use texeval_core::prelude::*;
    pub use texeval_parallel::ProcessingMode;
}
