//! Class-aware precision at each recall depth
//!
//! Descriptor `i` belongs to class `i / num_classes`: every source image
//! contributes `num_classes` consecutive descriptors. For a query, walking
//! its ranking and hitting the k-th same-class item at rank r records
//! `k / r` at position `k - 1`. The vector has `num_classes - 1` entries,
//! one per other member of the class.

use std::fmt;

use ndarray::Array2;
use texeval_core::{Error, Result};

use super::distance::{relative_distances, Ranked};
use crate::maybe_rayon::*;

/// Averaged precision/recall curve
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrecisionCurve {
    values: Vec<f64>,
}

impl PrecisionCurve {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Precision at recall depths 1..=len
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean over all depths, the area under the curve in recall steps
    pub fn mean_precision(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

impl fmt::Display for PrecisionCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, v) in self.values.iter().enumerate() {
            if k > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:.8}", v)?;
        }
        write!(f, "]")
    }
}

/// Evaluates retrieval precision over a descriptor matrix
#[derive(Debug, Clone, Copy)]
pub struct RetrievalEvaluator {
    num_classes: usize,
}

impl RetrievalEvaluator {
    /// `num_classes` is the number of descriptors per source image
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Class label of descriptor `index`
    pub fn class_of(&self, index: usize) -> usize {
        index / self.num_classes.max(1)
    }

    /// Precision vector of query `i` given its ascending ranking
    pub fn precision_vector(&self, i: usize, ranking: &[Ranked]) -> Vec<f64> {
        let mut precision = vec![0.0; self.num_classes.saturating_sub(1)];
        let class = self.class_of(i);

        let mut retrieved_in_class = 0usize;
        for (total_retrieved, &(j, _)) in ranking.iter().enumerate() {
            if self.class_of(j) != class {
                continue;
            }
            retrieved_in_class += 1;
            if let Some(slot) = precision.get_mut(retrieved_in_class - 1) {
                *slot = retrieved_in_class as f64 / (total_retrieved + 1) as f64;
            }
        }
        precision
    }

    /// Rank every descriptor against all others and average the
    /// per-query precision vectors element-wise.
    ///
    /// Queries run in parallel; results are combined in index order.
    pub fn evaluate(&self, descriptors: &Array2<f64>) -> Result<PrecisionCurve> {
        let n = descriptors.nrows();
        if n == 0 {
            return Err(Error::InvalidParameter {
                name: "descriptors",
                value: "0 rows".to_string(),
                reason: "nothing to evaluate".to_string(),
            });
        }

        let per_query: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| self.precision_vector(i, &relative_distances(i, descriptors)))
            .collect();

        let mut mean = vec![0.0; self.num_classes.saturating_sub(1)];
        for vector in &per_query {
            for (acc, v) in mean.iter_mut().zip(vector) {
                *acc += v;
            }
        }
        for acc in &mut mean {
            *acc /= n as f64;
        }

        Ok(PrecisionCurve::new(mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_precision_vector_walk() {
        // Class size 3: query 0 shares a class with 1 and 2
        let eval = RetrievalEvaluator::new(3);
        let ranking = vec![(4, 0.1), (1, 0.2), (5, 0.3), (2, 0.4), (3, 0.5)];
        let pv = eval.precision_vector(0, &ranking);
        assert_eq!(pv.len(), 2);
        assert_relative_eq!(pv[0], 1.0 / 2.0);
        assert_relative_eq!(pv[1], 2.0 / 4.0);
    }

    #[test]
    fn test_identical_pair_is_retrieved_first() {
        // Two classes of two; row 0 and row 1 are identical
        let m = array![[1.0, 1.0], [1.0, 1.0], [0.0, 9.0], [9.0, 0.0]];
        let eval = RetrievalEvaluator::new(2);
        let pv = eval.precision_vector(0, &relative_distances(0, &m));
        assert_eq!(pv, vec![1.0]);
    }

    #[test]
    fn test_perfectly_separated_classes() {
        let m = array![[0.0], [0.1], [0.2], [10.0], [10.1], [10.2]];
        let curve = RetrievalEvaluator::new(3).evaluate(&m).unwrap();
        assert_eq!(curve.len(), 2);
        for &v in curve.values() {
            assert_relative_eq!(v, 1.0);
        }
        assert_relative_eq!(curve.mean_precision(), 1.0);
    }

    #[test]
    fn test_single_class_per_image_gives_empty_curve() {
        let m = array![[0.0], [1.0]];
        let curve = RetrievalEvaluator::new(1).evaluate(&m).unwrap();
        assert!(curve.is_empty());
        assert_eq!(curve.mean_precision(), 0.0);
    }

    #[test]
    fn test_empty_matrix_is_an_error() {
        let m = Array2::<f64>::zeros((0, 4));
        assert!(RetrievalEvaluator::new(4).evaluate(&m).is_err());
    }

    #[test]
    fn test_display() {
        let curve = PrecisionCurve::new(vec![1.0, 0.5]);
        assert_eq!(curve.to_string(), "[1.00000000 0.50000000]");
    }
}
