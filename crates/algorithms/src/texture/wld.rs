//! Weber Local Descriptor (WLD)
//!
//! Joint histogram of differential excitation and gradient orientation,
//! after Li, Gong & Yuan, "Face recognition using Weber local descriptors".
//!
//! Per pixel:
//! - excitation `α = atan(v_laplacian / v_center)` is quantized into T1 = 8
//!   non-uniform bins over [-π/2, π/2];
//! - orientation `θ = atan(v_gy / v_gx)` is mapped to [0, 2π) by quadrant and
//!   quantized into T2 = 12 bins.
//!
//! The matched bin does not receive a count of one: it accumulates
//! `floor((α + π/2) / (π/T1))` resp. `floor(θ' / (2π/T2))`. The descriptor is
//! the row-major outer product of the two histograms.

use std::f64::consts::PI;
use texeval_core::{Error, FeatureVector, GrayImage, Result, TextureDescriptor};

use super::kernel::{convolve_same, Kernel3};
use crate::numeric::safe_divisor;

/// Excitation bins
pub const T1: usize = 8;

/// Orientation bins
pub const T2: usize = 12;

/// Length of the WLD feature vector
pub const WLD_FEATURES: usize = T1 * T2;

/// Excitation intervals as multiples of π; the last one is closed
const EXCITATION_BOUNDS: [(f64, f64); T1] = [
    (-0.5, -0.3),
    (-0.3, -0.15),
    (-0.15, -0.05),
    (-0.05, 0.0),
    (0.0, 0.05),
    (0.05, 0.15),
    (0.15, 0.25),
    (0.25, 0.5),
];

/// Orientation intervals as multiples of π, all half-open
const ORIENTATION_BOUNDS: [(f64, f64); T2] = [
    (0.0, 0.15),
    (0.15, 0.35),
    (0.35, 0.5),
    (0.5, 0.65),
    (0.65, 0.85),
    (0.85, 1.0),
    (1.0, 1.15),
    (1.15, 1.35),
    (1.35, 1.5),
    (1.5, 1.65),
    (1.65, 1.85),
    (1.85, 2.0),
];

/// Excitation bin of `alpha`
pub fn excitation_bin(alpha: f64) -> Option<usize> {
    EXCITATION_BOUNDS
        .iter()
        .enumerate()
        .position(|(k, &(lo, hi))| {
            let (lo, hi) = (lo * PI, hi * PI);
            alpha >= lo && (alpha < hi || (k == T1 - 1 && alpha <= hi))
        })
}

/// Orientation bin of an angle already mapped to [0, 2π)
pub fn orientation_bin(theta: f64) -> Option<usize> {
    ORIENTATION_BOUNDS
        .iter()
        .position(|&(lo, hi)| theta >= lo * PI && theta < hi * PI)
}

/// Map `atan(gy / gx)` into [0, 2π) using the signs of the two responses
pub fn map_orientation(gy: f64, gx: f64, theta: f64) -> f64 {
    if gy > 0.0 && gx > 0.0 {
        theta
    } else if gy > 0.0 && gx < 0.0 {
        theta + 2.0 * PI
    } else {
        theta + PI
    }
}

/// Excitation and orientation histograms of one sub-image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WldHistograms {
    pub excitation: [u64; T1],
    pub orientation: [u64; T2],
}

impl WldHistograms {
    /// Row-major outer product `excitation ⊗ orientation`
    pub fn outer_product(&self) -> FeatureVector {
        let mut out = Vec::with_capacity(WLD_FEATURES);
        for &e in &self.excitation {
            for &o in &self.orientation {
                out.push((e * o) as f64);
            }
        }
        out
    }
}

/// Accumulate the excitation and orientation histograms of a sub-image.
///
/// Zero center and horizontal-gradient responses are replaced by one
/// before dividing. An angle outside every interval is reported as an
/// algorithm error.
pub fn wld_histograms(tile: &GrayImage) -> Result<WldHistograms> {
    let laplacian = convolve_same(tile, &Kernel3::EXCITATION);
    let center = convolve_same(tile, &Kernel3::CENTER);
    let grad_y = convolve_same(tile, &Kernel3::GRADIENT_Y);
    let grad_x = convolve_same(tile, &Kernel3::GRADIENT_X);

    let mut hist = WldHistograms {
        excitation: [0; T1],
        orientation: [0; T2],
    };

    for (idx, &v1) in laplacian.indexed_iter() {
        let v2 = safe_divisor(center[idx]);
        let v3 = grad_y[idx];
        let v4 = safe_divisor(grad_x[idx]);

        let alpha = (v1 / v2).atan();
        let bin = excitation_bin(alpha).ok_or_else(|| {
            Error::Algorithm(format!("Excitation angle {} at {:?} outside [-π/2, π/2]", alpha, idx))
        })?;
        hist.excitation[bin] += ((alpha + PI / 2.0) / (PI / T1 as f64)).floor() as u64;

        let theta = map_orientation(v3, v4, (v3 / v4).atan());
        let bin = orientation_bin(theta).ok_or_else(|| {
            Error::Algorithm(format!("Orientation angle {} at {:?} outside [0, 2π)", theta, idx))
        })?;
        hist.orientation[bin] += (theta / (2.0 * PI / T2 as f64)).floor() as u64;
    }

    Ok(hist)
}

/// WLD descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct Wld;

impl TextureDescriptor for Wld {
    fn name(&self) -> &'static str {
        "wld"
    }

    fn description(&self) -> &'static str {
        "Weber local descriptor, excitation x orientation histogram (96 bins)"
    }

    fn feature_len(&self) -> usize {
        WLD_FEATURES
    }

    fn needs_normalization(&self) -> bool {
        true
    }

    fn describe(&self, tile: &GrayImage) -> Result<FeatureVector> {
        wld_descriptor(tile)
    }
}

/// Compute the 96-value WLD descriptor of a sub-image
pub fn wld_descriptor(tile: &GrayImage) -> Result<FeatureVector> {
    Ok(wld_histograms(tile)?.outer_product())
}
