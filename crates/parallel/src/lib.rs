//! # texeval Parallel
//!
//! Parallel processing for the descriptor pipeline.
//!
//! This crate provides:
//! - Non-overlapping tiling of images into square sub-images
//! - Processing modes backed by Rayon (sequential, all cores, bounded pool)
//! - An order-preserving dispatcher for per-tile work

pub mod dispatch;
pub mod strategy;
pub mod tiled;

pub use dispatch::Dispatcher;
pub use strategy::{num_cpus, ProcessingMode};
pub use tiled::{split_tiles, Tile, TileIterator};
