//! Local Binary Pattern (LBP) histogram
//!
//! Each interior pixel gets an 8-bit code from comparing it against its
//! 3x3 neighbourhood; the descriptor is the normalized histogram of codes.

use ndarray::ArrayView2;
use texeval_core::{FeatureVector, GrayImage, Result, TextureDescriptor};

use crate::numeric::safe_divisor;

/// Number of distinct 8-bit patterns
pub const LBP_BINS: usize = 256;

/// Neighbour offsets (dr, dc) by bit position, clockwise from top-left
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), // bit 0: top-left
    (-1, 0),  // bit 1: top
    (-1, 1),  // bit 2: top-right
    (0, 1),   // bit 3: right
    (1, 1),   // bit 4: bottom-right
    (1, 0),   // bit 5: bottom
    (1, -1),  // bit 6: bottom-left
    (0, -1),  // bit 7: left
];

/// LBP descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct Lbp;

impl TextureDescriptor for Lbp {
    fn name(&self) -> &'static str {
        "lbp"
    }

    fn description(&self) -> &'static str {
        "Local binary pattern histogram over interior pixels (256 bins)"
    }

    fn feature_len(&self) -> usize {
        LBP_BINS
    }

    fn needs_normalization(&self) -> bool {
        false
    }

    fn describe(&self, tile: &GrayImage) -> Result<FeatureVector> {
        lbp_descriptor(tile)
    }
}

/// Pattern code of the pixel at (row, col).
///
/// Bit k is set when the center is strictly darker than neighbour k.
/// The caller guarantees (row, col) is an interior pixel.
fn pattern_at(px: &ArrayView2<'_, u8>, row: usize, col: usize) -> u8 {
    let center = px[[row, col]];

    NEIGHBOURS
        .iter()
        .enumerate()
        .fold(0u8, |code, (bit, &(dr, dc))| {
            let r = (row as isize + dr) as usize;
            let c = (col as isize + dc) as usize;
            if center < px[[r, c]] {
                code | (1 << bit)
            } else {
                code
            }
        })
}

/// Raw pattern counts over all interior pixels (1-pixel border excluded)
pub fn lbp_histogram(tile: &GrayImage) -> [u64; LBP_BINS] {
    let (rows, cols) = tile.shape();
    let px = tile.view();
    let mut hist = [0u64; LBP_BINS];

    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            hist[pattern_at(&px, row, col) as usize] += 1;
        }
    }
    hist
}

/// Compute the 256-bin LBP descriptor: pattern counts divided by the
/// number of interior pixels `(rows-2)(cols-2)`.
pub fn lbp_descriptor(tile: &GrayImage) -> Result<FeatureVector> {
    let (rows, cols) = tile.shape();
    let interior = rows.saturating_sub(2) * cols.saturating_sub(2);
    let total = safe_divisor(interior as f64);

    Ok(lbp_histogram(tile)
        .iter()
        .map(|&count| count as f64 / total)
        .collect())
}
