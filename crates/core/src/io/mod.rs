//! I/O for reading dataset images

mod dataset;
mod gray;

pub use dataset::{DatasetLayout, BRODATZ_IMAGES};
pub use gray::{read_gray, read_gray_from_buffer};
