//! On-disk layout of the benchmark dataset

use std::path::{Path, PathBuf};

/// Number of images in the Brodatz album
pub const BRODATZ_IMAGES: usize = 112;

/// Flat directory of images named `D1.<ext>`, `D2.<ext>`, ...
///
/// The numbering defines the dataset order, and with it the class of every
/// descriptor, so paths are always produced in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLayout {
    /// Directory holding the images
    pub root: PathBuf,
    /// Number of images, numbered from 1
    pub num_images: usize,
    /// File extension without the dot
    pub extension: String,
}

impl DatasetLayout {
    /// Brodatz layout: `D1.gif` .. `D112.gif` under `root`
    pub fn brodatz<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            num_images: BRODATZ_IMAGES,
            extension: "gif".to_string(),
        }
    }

    /// Use only the first `num_images` images
    pub fn with_num_images(mut self, num_images: usize) -> Self {
        self.num_images = num_images;
        self
    }

    /// File name of the image at 1-based position `number`
    pub fn file_name(&self, number: usize) -> String {
        format!("D{}.{}", number, self.extension)
    }

    /// All image paths in dataset order
    pub fn paths(&self) -> Vec<PathBuf> {
        (1..=self.num_images)
            .map(|number| self.root.join(self.file_name(number)))
            .collect()
    }
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self::brodatz(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brodatz_paths() {
        let layout = DatasetLayout::brodatz("/data/brodatz");
        let paths = layout.paths();

        assert_eq!(paths.len(), 112);
        assert_eq!(paths[0], PathBuf::from("/data/brodatz/D1.gif"));
        assert_eq!(paths[111], PathBuf::from("/data/brodatz/D112.gif"));
    }

    #[test]
    fn test_with_num_images() {
        let layout = DatasetLayout::default().with_num_images(3);
        let names: Vec<String> = (1..=layout.num_images).map(|n| layout.file_name(n)).collect();
        assert_eq!(names, vec!["D1.gif", "D2.gif", "D3.gif"]);
    }
}
