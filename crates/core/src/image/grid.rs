//! Main Image type

use crate::error::{Error, Result};
use crate::image::Pixel;
use ndarray::{s, Array2, ArrayView2};

/// A 2D intensity grid.
///
/// `Image<T>` stores values of type `T` in row-major order `(row, col)`.
/// Images are built once by a loader or by cropping a larger image and are
/// only read afterwards; descriptor workers receive their own cropped copy.
///
/// # Example
///
/// ```ignore
/// use texeval_core::Image;
///
/// let mut image: Image<u8> = Image::new(4, 4);
/// image.set(1, 2, 200)?;
/// assert_eq!(image.get(1, 2)?, 200);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Pixel> {
    data: Array2<T>,
}

impl<T: Pixel> Image<T> {
    /// Create a new image filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
        }
    }

    /// Create a new image filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
        }
    }

    /// Create an image from row-major data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self { data: array })
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the image has no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Consume the image and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Copy the `rows x cols` block starting at (`row_offset`, `col_offset`)
    /// into a new image.
    pub fn crop(&self, row_offset: usize, col_offset: usize, rows: usize, cols: usize) -> Result<Self> {
        let row_end = row_offset + rows;
        let col_end = col_offset + cols;
        if row_end > self.rows() || col_end > self.cols() {
            return Err(Error::IndexOutOfBounds {
                row: row_end,
                col: col_end,
                rows: self.rows(),
                cols: self.cols(),
            });
        }

        Ok(Self {
            data: self
                .data
                .slice(s![row_offset..row_end, col_offset..col_end])
                .to_owned(),
        })
    }

    /// Convert every pixel to `f64`
    pub fn to_f64(&self) -> Image<f64> {
        Image {
            data: self.data.mapv(Pixel::intensity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let image: Image<u8> = Image::new(100, 200);
        assert_eq!(image.rows(), 100);
        assert_eq!(image.cols(), 200);
        assert_eq!(image.shape(), (100, 200));
    }

    #[test]
    fn test_image_access() {
        let mut image: Image<u8> = Image::new(10, 10);
        image.set(5, 5, 42).unwrap();
        assert_eq!(image.get(5, 5).unwrap(), 42);
        assert!(image.get(10, 0).is_err());
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let result = Image::<u8>::from_vec(vec![0; 5], 2, 3);
        assert!(matches!(result, Err(Error::InvalidDimensions { width: 3, height: 2 })));
    }

    #[test]
    fn test_crop_copies_block() {
        let data: Vec<u8> = (0..16).collect();
        let image = Image::from_vec(data, 4, 4).unwrap();

        let block = image.crop(2, 2, 2, 2).unwrap();
        assert_eq!(block.shape(), (2, 2));
        assert_eq!(block.get(0, 0).unwrap(), 10);
        assert_eq!(block.get(1, 1).unwrap(), 15);

        assert!(image.crop(3, 0, 2, 2).is_err());
    }

    #[test]
    fn test_to_f64() {
        let image = Image::from_vec(vec![0u8, 128, 255, 1], 2, 2).unwrap();
        let float = image.to_f64();
        assert_eq!(float.get(1, 0).unwrap(), 255.0);
    }
}
