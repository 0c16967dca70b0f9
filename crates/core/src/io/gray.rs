//! Grayscale image decoding
//!
//! Uses the `image` crate for GIF/PNG/TIFF decoding. Color inputs are
//! converted to 8-bit luma; the descriptors only ever see one channel.

use crate::error::{Error, Result};
use crate::image::{GrayImage, Image};
use std::path::Path;

/// Read an image file as an 8-bit grayscale image
pub fn read_gray<P: AsRef<Path>>(path: P) -> Result<GrayImage> {
    let bytes = std::fs::read(path.as_ref())?;
    read_gray_from_buffer(&bytes)
}

/// Decode an in-memory encoded image as an 8-bit grayscale image
///
/// Same as `read_gray` but operates on a byte slice instead of a file path.
pub fn read_gray_from_buffer(data: &[u8]) -> Result<GrayImage> {
    let decoded = ::image::load_from_memory(data).map_err(|e| Error::Decode(e.to_string()))?;
    let luma = decoded.into_luma8();
    let (width, height) = luma.dimensions();

    Image::from_vec(luma.into_raw(), height as usize, width as usize)
}
