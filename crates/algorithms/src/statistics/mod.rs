//! Statistics over the descriptor matrix
//!
//! - **normalize**: per-column max rescaling

pub mod normalize;

pub use normalize::{column_maxima, normalize_columns};
