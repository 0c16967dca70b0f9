//! # texeval Core
//!
//! Core types, traits and I/O for the texeval texture benchmark.
//!
//! This crate provides:
//! - `Image<T>`: Generic 2D intensity grid
//! - `FeatureVector` / `DescriptorSet`: descriptor storage in dataset order
//! - `TextureDescriptor`: trait implemented by the texture algorithms
//! - I/O for grayscale dataset images

pub mod descriptor;
pub mod error;
pub mod image;
pub mod io;

pub use crate::descriptor::{DescriptorSet, FeatureVector, TextureDescriptor};
pub use crate::error::{Error, Result};
pub use crate::image::{GrayImage, Image, Pixel};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::descriptor::{DescriptorSet, FeatureVector, TextureDescriptor};
    pub use crate::error::{Error, Result};
    pub use crate::image::{GrayImage, Image, Pixel};
}
