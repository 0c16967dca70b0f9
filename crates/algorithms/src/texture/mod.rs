//! Texture descriptors
//!
//! - **GLCM**: Gray-Level Co-occurrence Matrix statistics (20 features)
//! - **LBP**: Local Binary Pattern histogram (256 features)
//! - **WLD**: Weber Local Descriptor excitation/orientation histogram (96 features)

mod glcm;
mod kernel;
mod lbp;
mod wld;

pub use glcm::{
    glcm_descriptor, CoOccurrence, Glcm, GlcmDirection, GlcmFeatures, GLCM_FEATURES,
    GLCM_STATISTICS, GRAY_LEVELS,
};
pub use kernel::{convolve_same, Kernel3};
pub use lbp::{lbp_descriptor, lbp_histogram, Lbp, LBP_BINS};
pub use wld::{
    excitation_bin, map_orientation, orientation_bin, wld_descriptor, wld_histograms, Wld,
    WldHistograms, T1, T2, WLD_FEATURES,
};

use std::fmt;
use std::str::FromStr;
use texeval_core::{Error, FeatureVector, GrayImage, Result, TextureDescriptor};

/// Descriptor selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Descriptor {
    Glcm,
    #[default]
    Lbp,
    Wld,
}

impl Descriptor {
    pub const ALL: [Descriptor; 3] = [Descriptor::Glcm, Descriptor::Lbp, Descriptor::Wld];

    fn inner(self) -> &'static dyn TextureDescriptor {
        match self {
            Descriptor::Glcm => &Glcm,
            Descriptor::Lbp => &Lbp,
            Descriptor::Wld => &Wld,
        }
    }
}

impl TextureDescriptor for Descriptor {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn description(&self) -> &'static str {
        self.inner().description()
    }

    fn feature_len(&self) -> usize {
        self.inner().feature_len()
    }

    fn needs_normalization(&self) -> bool {
        self.inner().needs_normalization()
    }

    fn describe(&self, tile: &GrayImage) -> Result<FeatureVector> {
        self.inner().describe(tile)
    }
}

impl FromStr for Descriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glcm" => Ok(Descriptor::Glcm),
            "lbp" => Ok(Descriptor::Lbp),
            "wld" => Ok(Descriptor::Wld),
            _ => Err(Error::UnknownDescriptor(s.to_string())),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
