//! 3x3 convolution kernels
//!
//! Same-size 2D convolution with zero padding. The kernel is flipped
//! (true convolution, not correlation), which matters for the asymmetric
//! gradient kernels.

use ndarray::Array2;
use texeval_core::{Image, Pixel};

/// A 3x3 kernel, `weights[row][col]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    pub weights: [[f64; 3]; 3],
}

impl Kernel3 {
    /// Laplacian-like excitation kernel
    /// ```text
    ///  1  1  1
    ///  1 -8  1
    ///  1  1  1
    /// ```
    pub const EXCITATION: Kernel3 = Kernel3 {
        weights: [[1.0, 1.0, 1.0], [1.0, -8.0, 1.0], [1.0, 1.0, 1.0]],
    };

    /// Identity kernel selecting the center pixel
    pub const CENTER: Kernel3 = Kernel3 {
        weights: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
    };

    /// Vertical Sobel-style gradient
    /// ```text
    ///  1  2  1
    ///  0  0  0
    /// -1 -2 -1
    /// ```
    pub const GRADIENT_Y: Kernel3 = Kernel3 {
        weights: [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]],
    };

    /// Horizontal Sobel-style gradient
    /// ```text
    ///  1  0 -1
    ///  2  0 -2
    ///  1  0 -1
    /// ```
    pub const GRADIENT_X: Kernel3 = Kernel3 {
        weights: [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]],
    };
}

/// Convolve `image` with `kernel`, output cropped to the input size.
///
/// `out[r][c] = Σ k[m][n] · in[r+1-m][c+1-n]`, pixels outside the image
/// count as zero.
pub fn convolve_same<T: Pixel>(image: &Image<T>, kernel: &Kernel3) -> Array2<f64> {
    let (rows, cols) = image.shape();
    let px = image.view();
    let mut out = Array2::zeros((rows, cols));

    for ((r, c), v) in out.indexed_iter_mut() {
        let mut acc = 0.0;
        for (m, krow) in kernel.weights.iter().enumerate() {
            for (n, &w) in krow.iter().enumerate() {
                if w == 0.0 {
                    continue;
                }
                let sr = r as isize + 1 - m as isize;
                let sc = c as isize + 1 - n as isize;
                if sr < 0 || sc < 0 || sr >= rows as isize || sc >= cols as isize {
                    continue;
                }
                acc += w * px[[sr as usize, sc as usize]].intensity();
            }
        }
        *v = acc;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_kernel_is_identity() {
        let data: Vec<u8> = (0..12).collect();
        let image = Image::from_vec(data, 3, 4).unwrap();
        let out = convolve_same(&image, &Kernel3::CENTER);
        assert_eq!(out, image.to_f64().into_array());
    }

    #[test]
    fn test_excitation_flat_interior_is_zero() {
        let image = Image::filled(5, 5, 10u8);
        let out = convolve_same(&image, &Kernel3::EXCITATION);
        assert_eq!(out[[2, 2]], 0.0);
        // Corner loses five neighbours to zero padding
        assert_eq!(out[[0, 0]], 3.0 * 10.0 - 80.0);
    }

    #[test]
    fn test_gradient_is_flipped() {
        // Intensity grows downwards: row index * 10
        let data: Vec<u8> = (0..9).map(|k| (k / 3 * 10) as u8).collect();
        let image = Image::from_vec(data, 3, 3).unwrap();

        let gy = convolve_same(&image, &Kernel3::GRADIENT_Y);
        // Flipped kernel weights the row below positively: 4*20 - 4*0
        assert_eq!(gy[[1, 1]], 80.0);

        let gx = convolve_same(&image, &Kernel3::GRADIENT_X);
        assert_eq!(gx[[1, 1]], 0.0);
    }
}
