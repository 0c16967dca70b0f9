//! Pixel element trait for generic intensity values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in an image cell.
///
/// Intensities are 8-bit gray levels from decoded files or floating point
/// filter responses. Every pixel type converts to `f64` for descriptor math.
pub trait Pixel:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Intensity as f64
    fn intensity(self) -> f64 {
        NumCast::from(self).unwrap_or(0.0)
    }
}

macro_rules! impl_pixel {
    ($($t:ty),*) => {
        $(impl Pixel for $t {})*
    };
}

impl_pixel!(u8, f64);
