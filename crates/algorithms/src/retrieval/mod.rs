//! Retrieval evaluation
//!
//! Every descriptor is used as a query against all others. Neighbours are
//! ranked by Euclidean distance and the class-aware precision at each
//! recall depth is averaged over the dataset.
//!
//! - **distance**: Euclidean distance and stable ranking
//! - **precision**: per-query precision vectors and the averaged curve

mod distance;
mod precision;

pub use distance::{euclidean, relative_distances, Ranked};
pub use precision::{PrecisionCurve, RetrievalEvaluator};
