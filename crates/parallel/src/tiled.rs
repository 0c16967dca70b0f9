//! Non-overlapping tiling of images into square sub-images

use texeval_core::image::{Image, Pixel};
use texeval_core::Result;

/// A square tile inside an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Row offset in the source image
    pub row_offset: usize,
    /// Column offset in the source image
    pub col_offset: usize,
    /// Side length of the tile
    pub size: usize,
}

impl Tile {
    /// Create a new tile
    pub fn new(row_offset: usize, col_offset: usize, size: usize) -> Self {
        Self {
            row_offset,
            col_offset,
            size,
        }
    }

    /// Convert tile-local coordinates to source image coordinates
    pub fn to_source_coords(&self, local_row: usize, local_col: usize) -> (usize, usize) {
        (self.row_offset + local_row, self.col_offset + local_col)
    }
}

/// Iterator over the full tiles of an image, row-major.
///
/// Offsets advance by the tile size; a tile is emitted only when it fits
/// entirely inside the image, so trailing partial tiles are dropped.
pub struct TileIterator {
    total_rows: usize,
    total_cols: usize,
    tile_size: usize,
    current_row: usize,
    current_col: usize,
}

impl TileIterator {
    /// Create a new tile iterator
    pub fn new(total_rows: usize, total_cols: usize, tile_size: usize) -> Self {
        Self {
            total_rows,
            total_cols,
            tile_size,
            current_row: 0,
            current_col: 0,
        }
    }

    /// Number of tiles the iterator yields in total
    pub fn tile_count(&self) -> usize {
        if self.tile_size == 0 {
            return 0;
        }
        (self.total_rows / self.tile_size) * (self.total_cols / self.tile_size)
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tile_size == 0 || self.current_row + self.tile_size > self.total_rows {
            return None;
        }

        // Wrap to the next tile row once the current one is exhausted
        if self.current_col + self.tile_size > self.total_cols {
            self.current_col = 0;
            self.current_row += self.tile_size;
            if self.current_row + self.tile_size > self.total_rows
                || self.tile_size > self.total_cols
            {
                return None;
            }
        }

        let tile = Tile::new(self.current_row, self.current_col, self.tile_size);
        self.current_col += self.tile_size;
        Some(tile)
    }
}

/// Split an image into `window x window` sub-images in row-major tile order.
///
/// A window larger than the image (or zero) yields no sub-images.
pub fn split_tiles<T: Pixel>(image: &Image<T>, window: usize) -> Result<Vec<Image<T>>> {
    let (rows, cols) = image.shape();
    TileIterator::new(rows, cols, window)
        .map(|tile| image.crop(tile.row_offset, tile.col_offset, tile.size, tile.size))
        .collect()
}
