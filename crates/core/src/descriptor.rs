//! Feature vectors and the ordered set of descriptors built during a run

use crate::error::{Error, Result};
use crate::image::GrayImage;
use ndarray::Array2;

/// Fixed-length feature vector computed for one sub-image
pub type FeatureVector = Vec<f64>;

/// Core trait for the texture descriptors.
///
/// A descriptor is a pure function from one grayscale sub-image to a
/// feature vector whose length depends only on the descriptor.
pub trait TextureDescriptor: Send + Sync {
    /// Short lowercase name used on the command line
    fn name(&self) -> &'static str;

    /// Returns a description of what the descriptor measures
    fn description(&self) -> &'static str;

    /// Length of every vector produced by [`describe`](Self::describe)
    fn feature_len(&self) -> usize;

    /// Whether vectors must be rescaled by their column maxima before
    /// distances are meaningful
    fn needs_normalization(&self) -> bool;

    /// Compute the feature vector of one sub-image
    fn describe(&self, tile: &GrayImage) -> Result<FeatureVector>;
}

/// Ordered descriptors of a whole dataset.
///
/// Vectors are stored in (image order) x (tile order). Class membership is
/// derived from the position alone, so batches must be appended in the
/// order images were processed.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorSet {
    dim: usize,
    vectors: Vec<FeatureVector>,
}

impl DescriptorSet {
    /// Create an empty set for vectors of length `dim`
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
        }
    }

    /// Append one image's batch, keeping its order
    pub fn extend_batch(&mut self, batch: Vec<FeatureVector>) -> Result<()> {
        if let Some(bad) = batch.iter().find(|v| v.len() != self.dim) {
            return Err(Error::DescriptorLength {
                expected: self.dim,
                actual: bad.len(),
            });
        }
        self.vectors.extend(batch);
        Ok(())
    }

    /// Length of each vector
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the set holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vectors in dataset order
    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Pack the set into an `len x dim` matrix, one row per vector
    pub fn to_matrix(&self) -> Result<Array2<f64>> {
        let flat: Vec<f64> = self.vectors.iter().flatten().copied().collect();
        Array2::from_shape_vec((self.vectors.len(), self.dim), flat)
            .map_err(|e| Error::Other(e.to_string()))
    }
}
