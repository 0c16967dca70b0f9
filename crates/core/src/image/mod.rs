//! Image data structures

mod element;
mod grid;

pub use element::Pixel;
pub use grid::Image;

/// 8-bit grayscale image, the input of every texture descriptor
pub type GrayImage = Image<u8>;
