//! Euclidean ranking of descriptors

use ndarray::{Array2, ArrayView1};

/// A neighbour of a query: its row index and distance
pub type Ranked = (usize, f64);

/// Euclidean distance between two feature rows
pub fn euclidean(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Distances from row `base` to every other row, ascending.
///
/// The query itself is left out. Equal distances keep row order.
pub fn relative_distances(base: usize, descriptors: &Array2<f64>) -> Vec<Ranked> {
    let query = descriptors.row(base);
    let mut ranked: Vec<Ranked> = descriptors
        .rows()
        .into_iter()
        .enumerate()
        .filter(|&(i, _)| i != base)
        .map(|(i, row)| (i, euclidean(row, query)))
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
