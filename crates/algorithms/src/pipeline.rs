//! Benchmark orchestration
//!
//! Images are processed one at a time: each is split into sub-images, the
//! whole batch is described on the worker pool, and the ordered results are
//! appended to the dataset's [`DescriptorSet`]. Once every image is done the
//! set is optionally column-normalized and handed to the retrieval
//! evaluator.

use std::fmt;

use ndarray::Array2;
use texeval_core::{DescriptorSet, Error, FeatureVector, GrayImage, Result, TextureDescriptor};
use texeval_parallel::{split_tiles, Dispatcher, ProcessingMode};
use tracing::{debug, warn};

use crate::retrieval::{PrecisionCurve, RetrievalEvaluator};
use crate::statistics::normalize_columns;
use crate::texture::Descriptor;

/// Side length of the Brodatz images
pub const NATIVE_RESOLUTION: usize = 640;

/// Default sub-image side length
pub const DEFAULT_WINDOW: usize = 320;

/// Parameters of one benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkParams {
    /// Texture descriptor to evaluate
    pub descriptor: Descriptor,
    /// Sub-image side length in pixels
    pub window: usize,
    /// Side length every dataset image is expected to have
    pub native_size: usize,
    /// How each image's sub-images are scheduled
    pub mode: ProcessingMode,
}

impl Default for BenchmarkParams {
    fn default() -> Self {
        Self {
            descriptor: Descriptor::Lbp,
            window: DEFAULT_WINDOW,
            native_size: NATIVE_RESOLUTION,
            mode: ProcessingMode::Parallel,
        }
    }
}

impl BenchmarkParams {
    /// Sub-images per source image, `(native / window)²`.
    ///
    /// Every source image is its own class, so this is also the class size.
    pub fn num_classes(&self) -> usize {
        let per_side = self.native_size / self.window.max(1);
        per_side * per_side
    }

    /// Reject a zero window or one larger than the native resolution
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::InvalidParameter {
                name: "window",
                value: self.window.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.window > self.native_size {
            return Err(Error::InvalidParameter {
                name: "window",
                value: self.window.to_string(),
                reason: format!("exceeds native resolution {}", self.native_size),
            });
        }
        Ok(())
    }
}

/// Outcome of a benchmark run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub descriptor: Descriptor,
    pub num_classes: usize,
    pub num_descriptors: usize,
    pub curve: PrecisionCurve,
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}| Average Precision x Recall:",
            self.descriptor.name().to_uppercase()
        )?;
        write!(f, "{}", self.curve)
    }
}

/// Descriptor extraction and retrieval evaluation over a dataset
pub struct TextureBenchmark {
    params: BenchmarkParams,
    dispatcher: Dispatcher,
    evaluator: RetrievalEvaluator,
}

impl TextureBenchmark {
    /// Validate `params` and set up the worker pool
    pub fn new(params: BenchmarkParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            dispatcher: Dispatcher::new(params.mode)?,
            evaluator: RetrievalEvaluator::new(params.num_classes()),
            params,
        })
    }

    pub fn num_classes(&self) -> usize {
        self.params.num_classes()
    }

    /// Describe every sub-image of one image, in tile order
    pub fn describe_image(&self, image: &GrayImage) -> Result<Vec<FeatureVector>> {
        let (rows, cols) = image.shape();
        let native = self.params.native_size;
        if rows != native || cols != native {
            warn!(
                "Image is {}x{}, expected {}x{}; class size assumes the native resolution",
                rows, cols, native, native
            );
        }

        let tiles = split_tiles(image, self.params.window)?;
        if tiles.len() != self.num_classes() {
            warn!(
                "Image yields {} sub-images but the class size is {}",
                tiles.len(),
                self.num_classes()
            );
        }
        debug!("Describing {} sub-images with {}", tiles.len(), self.params.descriptor);

        let descriptor = self.params.descriptor;
        self.dispatcher
            .dispatch(&tiles, |tile| descriptor.describe(tile))
    }

    /// Describe a sequence of images in order.
    ///
    /// `on_image` is called with the 0-based position after each image's
    /// batch has been appended. The first load or worker error aborts.
    pub fn describe_dataset<I, F>(&self, images: I, mut on_image: F) -> Result<DescriptorSet>
    where
        I: IntoIterator<Item = Result<GrayImage>>,
        F: FnMut(usize),
    {
        let mut set = DescriptorSet::new(self.params.descriptor.feature_len());
        for (position, image) in images.into_iter().enumerate() {
            let batch = self.describe_image(&image?)?;
            set.extend_batch(batch)?;
            on_image(position);
        }
        debug!("Collected {} descriptors", set.len());
        Ok(set)
    }

    /// Normalize the set if the descriptor requires it
    pub fn prepare_matrix(&self, set: &DescriptorSet) -> Result<Array2<f64>> {
        let mut matrix = set.to_matrix()?;
        if self.params.descriptor.needs_normalization() {
            normalize_columns(&mut matrix);
        }
        Ok(matrix)
    }

    /// Averaged precision/recall curve of a described dataset
    pub fn evaluate(&self, set: &DescriptorSet) -> Result<PrecisionCurve> {
        let matrix = self.prepare_matrix(set)?;
        self.dispatcher.install(|| self.evaluator.evaluate(&matrix))
    }

    /// Summarize an evaluated set
    pub fn report(&self, set: &DescriptorSet, curve: PrecisionCurve) -> BenchmarkReport {
        BenchmarkReport {
            descriptor: self.params.descriptor,
            num_classes: self.num_classes(),
            num_descriptors: set.len(),
            curve,
        }
    }

    /// Describe and evaluate a whole dataset
    pub fn run<I>(&self, images: I) -> Result<BenchmarkReport>
    where
        I: IntoIterator<Item = Result<GrayImage>>,
    {
        let set = self.describe_dataset(images, |_| {})?;
        let curve = self.evaluate(&set)?;
        Ok(self.report(&set, curve))
    }
}
