//! Column normalization
//!
//! Rescales a descriptor matrix (one row per sub-image) so that each
//! feature column is divided by its maximum over the dataset.

use ndarray::{Array1, Array2, Axis};

use crate::numeric::safe_divisor;

/// Maximum of each column; an empty column gives zero
pub fn column_maxima(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.map_axis(Axis(0), |col| {
        col.iter().copied().reduce(f64::max).unwrap_or(0.0)
    })
}

/// Divide every entry by its column maximum, in place.
///
/// A zero maximum is replaced by one, so all-zero columns stay zero.
/// Negative maxima are used as they are.
pub fn normalize_columns(matrix: &mut Array2<f64>) {
    let divisors = column_maxima(matrix).mapv(safe_divisor);
    for mut row in matrix.rows_mut() {
        row /= &divisors;
    }
}
