//! Gray-Level Co-occurrence Matrix (GLCM) texture features
//!
//! Builds one symmetric 256x256 co-occurrence matrix per adjacency
//! direction (0°, 45°, 90°, 135°) over the full sub-image and reduces each
//! to five Haralick-style statistics. The descriptor is the concatenation of
//! the four statistic blocks.

use texeval_core::{FeatureVector, GrayImage, Result, TextureDescriptor};

use crate::numeric::{checked_ratio, entropy_term, safe_divisor};

/// Number of gray levels of an 8-bit image
pub const GRAY_LEVELS: usize = 256;

/// Statistics per direction
pub const GLCM_STATISTICS: usize = 5;

/// Length of the GLCM feature vector
pub const GLCM_FEATURES: usize = GLCM_STATISTICS * 4;

/// Pixel adjacency direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlcmDirection {
    /// Right neighbor `(r, c+1)`
    Deg0,
    /// Upper-right neighbor `(r-1, c+1)`
    Deg45,
    /// Lower neighbor `(r+1, c)`
    Deg90,
    /// Lower-right neighbor `(r+1, c+1)`
    Deg135,
}

impl GlcmDirection {
    /// Directions in feature-vector order
    pub const ALL: [GlcmDirection; 4] = [
        GlcmDirection::Deg0,
        GlcmDirection::Deg45,
        GlcmDirection::Deg90,
        GlcmDirection::Deg135,
    ];

    /// Offset (dr, dc) from a pixel to its partner
    pub fn offset(self) -> (isize, usize) {
        match self {
            GlcmDirection::Deg0 => (0, 1),
            GlcmDirection::Deg45 => (-1, 1),
            GlcmDirection::Deg90 => (1, 0),
            GlcmDirection::Deg135 => (1, 1),
        }
    }
}

/// The five statistics of one normalized co-occurrence matrix
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlcmFeatures {
    /// `Σ -p ln p`
    pub entropy: f64,
    /// Angular second moment `Σ p²`
    pub energy: f64,
    /// Inverse difference `Σ p / (1 + |i-j|)`
    pub homogeneity: f64,
    /// `Σ (i-j)² p`
    pub contrast: f64,
    /// Correlation against per-row and per-column mean/std of the matrix
    pub correlation: f64,
}

impl GlcmFeatures {
    /// Statistics in feature-vector order
    pub fn to_array(&self) -> [f64; GLCM_STATISTICS] {
        [
            self.entropy,
            self.energy,
            self.homogeneity,
            self.contrast,
            self.correlation,
        ]
    }
}

/// Normalized symmetric co-occurrence matrix for one direction
#[derive(Debug, Clone)]
pub struct CoOccurrence {
    p: Vec<f64>,
}

impl CoOccurrence {
    /// Count every adjacent pair `(a, b)` of `direction` as both `(a, b)` and
    /// `(b, a)`, then divide by twice the number of pairs.
    ///
    /// Pairs whose partner falls outside the tile are not counted, so 0° and
    /// 90° lose one column/row and the diagonals lose both.
    pub fn from_tile(tile: &GrayImage, direction: GlcmDirection) -> Self {
        let (rows, cols) = tile.shape();
        let (dr, dc) = direction.offset();
        let px = tile.view();

        let row_start = if dr < 0 { 1 } else { 0 };
        let row_end = if dr > 0 { rows.saturating_sub(1) } else { rows };
        let col_end = cols.saturating_sub(dc);

        let mut p = vec![0.0; GRAY_LEVELS * GRAY_LEVELS];
        for r in row_start..row_end {
            let pr = (r as isize + dr) as usize;
            for c in 0..col_end {
                let a = px[[r, c]] as usize;
                let b = px[[pr, c + dc]] as usize;
                p[a * GRAY_LEVELS + b] += 1.0;
                p[b * GRAY_LEVELS + a] += 1.0;
            }
        }

        let pairs = row_end.saturating_sub(row_start) * col_end;
        let total = safe_divisor(2.0 * pairs as f64);
        for v in &mut p {
            *v /= total;
        }

        Self { p }
    }

    /// Probability of the gray-level pair `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.p[i * GRAY_LEVELS + j]
    }

    /// Sum over all cells (1.0 for any tile with at least one pair)
    pub fn sum(&self) -> f64 {
        self.p.iter().sum()
    }

    /// Compute the five statistics.
    ///
    /// Row/column means and standard deviations are taken over the 256
    /// cell values of each matrix row/column. Correlation terms with a zero
    /// row or column deviation are skipped.
    pub fn features(&self) -> GlcmFeatures {
        let n = GRAY_LEVELS as f64;
        let mut row_mean = vec![0.0; GRAY_LEVELS];
        let mut col_mean = vec![0.0; GRAY_LEVELS];
        for i in 0..GRAY_LEVELS {
            for j in 0..GRAY_LEVELS {
                let p = self.get(i, j);
                row_mean[i] += p;
                col_mean[j] += p;
            }
        }
        for m in row_mean.iter_mut().chain(col_mean.iter_mut()) {
            *m /= n;
        }

        let mut row_std = vec![0.0; GRAY_LEVELS];
        let mut col_std = vec![0.0; GRAY_LEVELS];
        for i in 0..GRAY_LEVELS {
            for j in 0..GRAY_LEVELS {
                let p = self.get(i, j);
                row_std[i] += (p - row_mean[i]).powi(2);
                col_std[j] += (p - col_mean[j]).powi(2);
            }
        }
        for s in row_std.iter_mut().chain(col_std.iter_mut()) {
            *s = (*s / n).sqrt();
        }

        let mut f = GlcmFeatures::default();
        for i in 0..GRAY_LEVELS {
            for j in 0..GRAY_LEVELS {
                let p = self.get(i, j);
                if p == 0.0 {
                    continue;
                }
                let diff = i as f64 - j as f64;

                f.entropy += entropy_term(p);
                f.energy += p * p;
                f.homogeneity += p / (1.0 + diff.abs());
                f.contrast += diff * diff * p;

                let spread = (i as f64 - row_mean[i]) * (j as f64 - col_mean[j]);
                if let Some(z) = checked_ratio(spread, row_std[i] * col_std[j]) {
                    f.correlation += z * p;
                }
            }
        }
        f
    }
}

/// GLCM descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct Glcm;

impl TextureDescriptor for Glcm {
    fn name(&self) -> &'static str {
        "glcm"
    }

    fn description(&self) -> &'static str {
        "Gray-level co-occurrence statistics in 4 directions (20 features)"
    }

    fn feature_len(&self) -> usize {
        GLCM_FEATURES
    }

    fn needs_normalization(&self) -> bool {
        true
    }

    fn describe(&self, tile: &GrayImage) -> Result<FeatureVector> {
        glcm_descriptor(tile)
    }
}

/// Compute the 20-value GLCM descriptor of a sub-image.
///
/// Layout: for each direction in [`GlcmDirection::ALL`] order, the
/// statistics entropy, energy, homogeneity, contrast, correlation.
pub fn glcm_descriptor(tile: &GrayImage) -> Result<FeatureVector> {
    let mut out = Vec::with_capacity(GLCM_FEATURES);
    for direction in GlcmDirection::ALL {
        let matrix = CoOccurrence::from_tile(tile, direction);
        out.extend(matrix.features().to_array());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use texeval_core::Image;

    fn pattern_tile(size: usize) -> GrayImage {
        let data: Vec<u8> = (0..size * size)
            .map(|k| ((k * 37 + (k / size) * 11) % 256) as u8)
            .collect();
        Image::from_vec(data, size, size).unwrap()
    }

    fn stripe_tile() -> GrayImage {
        // Vertical stripes: columns alternate 0 and 10
        let data: Vec<u8> = (0..16).map(|k| if k % 2 == 0 { 0 } else { 10 }).collect();
        Image::from_vec(data, 4, 4).unwrap()
    }

    #[test]
    fn test_matrices_sum_to_one() {
        let tile = pattern_tile(9);
        for direction in GlcmDirection::ALL {
            let m = CoOccurrence::from_tile(&tile, direction);
            assert_relative_eq!(m.sum(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let tile = pattern_tile(6);
        let m = CoOccurrence::from_tile(&tile, GlcmDirection::Deg45);
        for i in (0..GRAY_LEVELS).step_by(7) {
            for j in (0..GRAY_LEVELS).step_by(5) {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_uniform_tile() {
        let tile = Image::filled(5, 5, 42u8);
        let m = CoOccurrence::from_tile(&tile, GlcmDirection::Deg0);
        assert_eq!(m.get(42, 42), 1.0);

        let f = m.features();
        assert_relative_eq!(f.energy, 1.0);
        assert_relative_eq!(f.entropy, 0.0);
        assert_relative_eq!(f.homogeneity, 1.0);
        assert_relative_eq!(f.contrast, 0.0);
    }

    #[test]
    fn test_stripes_contrast_by_direction() {
        let v = glcm_descriptor(&stripe_tile()).unwrap();
        assert_eq!(v.len(), GLCM_FEATURES);

        let contrast = |d: usize| v[d * GLCM_STATISTICS + 3];
        let energy = |d: usize| v[d * GLCM_STATISTICS + 1];
        let entropy = |d: usize| v[d * GLCM_STATISTICS];

        // Horizontal and diagonal neighbours always cross a stripe edge
        assert_relative_eq!(contrast(0), 100.0, epsilon = 1e-10);
        assert_relative_eq!(contrast(1), 100.0, epsilon = 1e-10);
        assert_relative_eq!(contrast(3), 100.0, epsilon = 1e-10);
        // Vertical neighbours never do
        assert_relative_eq!(contrast(2), 0.0, epsilon = 1e-10);
        assert_relative_eq!(energy(2), 0.5, epsilon = 1e-10);
        assert_relative_eq!(entropy(2), std::f64::consts::LN_2, epsilon = 1e-10);
    }

    #[test]
    fn test_boundary_loss_per_direction() {
        // [[1, 2],
        //  [3, 4]]
        let tile = Image::from_vec(vec![1u8, 2, 3, 4], 2, 2).unwrap();

        let d0 = CoOccurrence::from_tile(&tile, GlcmDirection::Deg0);
        assert_eq!(d0.get(1, 2), 0.25);
        assert_eq!(d0.get(4, 3), 0.25);

        // Only (1,0)-(0,1) has an upper-right partner
        let d45 = CoOccurrence::from_tile(&tile, GlcmDirection::Deg45);
        assert_eq!(d45.get(3, 2), 0.5);
        assert_eq!(d45.get(2, 3), 0.5);

        let d90 = CoOccurrence::from_tile(&tile, GlcmDirection::Deg90);
        assert_eq!(d90.get(1, 3), 0.25);
        assert_eq!(d90.get(4, 2), 0.25);

        let d135 = CoOccurrence::from_tile(&tile, GlcmDirection::Deg135);
        assert_eq!(d135.get(1, 4), 0.5);
        assert_eq!(d135.get(2, 3), 0.0);
    }

    #[test]
    fn test_correlation_hand_computed() {
        // [[1, 2],
        //  [3, 4]] at 0°: cells (1,2) (2,1) (3,4) (4,3) hold 0.25 each.
        // Rows/columns 1..=4 have mean m = 0.25/256 and variance
        // s² = ((0.25 - m)² + 255 m²) / 256, all other rows are empty.
        let tile = Image::from_vec(vec![1u8, 2, 3, 4], 2, 2).unwrap();
        let f = CoOccurrence::from_tile(&tile, GlcmDirection::Deg0).features();

        let m = 0.25 / 256.0;
        let s2 = ((0.25 - m) * (0.25 - m) + 255.0 * m * m) / 256.0;
        let expected = 0.25 / s2 * (2.0 * (1.0 - m) * (2.0 - m) + 2.0 * (3.0 - m) * (4.0 - m));

        assert_relative_eq!(f.correlation, expected, max_relative = 1e-12);
        assert_relative_eq!(f.correlation, 28764.36470588235, max_relative = 1e-9);
    }

    #[test]
    fn test_correlation_with_zero_deviation_rows() {
        // Only row/column 42 is non-empty; the other 255 have zero
        // deviation and contribute nothing
        let tile = Image::filled(3, 3, 42u8);
        let f = CoOccurrence::from_tile(&tile, GlcmDirection::Deg90).features();

        let m = 1.0 / 256.0;
        let s2 = ((1.0 - m) * (1.0 - m) + 255.0 * m * m) / 256.0;
        assert!(f.correlation.is_finite());
        assert_relative_eq!(f.correlation, (42.0 - m) * (42.0 - m) / s2, max_relative = 1e-12);

        // Empty matrix: every deviation is zero
        let empty = CoOccurrence::from_tile(&Image::filled(1, 1, 7u8), GlcmDirection::Deg0);
        assert_eq!(empty.features().correlation, 0.0);
    }

    #[test]
    fn test_single_pixel_tile_is_all_zero() {
        let tile = Image::filled(1, 1, 3u8);
        let v = glcm_descriptor(&tile).unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }
}
