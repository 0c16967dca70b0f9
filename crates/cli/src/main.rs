//! texeval CLI - texture descriptor retrieval benchmark

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use texeval_algorithms::pipeline::{
    BenchmarkParams, TextureBenchmark, DEFAULT_WINDOW, NATIVE_RESOLUTION,
};
use texeval_algorithms::texture::Descriptor;
use texeval_core::io::{read_gray, DatasetLayout, BRODATZ_IMAGES};
use texeval_core::TextureDescriptor;
use texeval_parallel::ProcessingMode;

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "texeval")]
#[command(
    author,
    version,
    about = "Average precision x recall of a texture descriptor (LBP|GLCM|WLD) over the Brodatz dataset",
    long_about = None
)]
struct Cli {
    /// Algorithm to use: lbp, glcm, wld
    #[arg(short, long, default_value = "lbp")]
    algorithm: String,

    /// Sub-image side length in pixels (320, 160, ...)
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    window: usize,

    /// Directory holding D1.gif .. D<n>.gif
    #[arg(short, long, default_value = ".")]
    dataset: PathBuf,

    /// Number of dataset images to use
    #[arg(short = 'n', long, default_value_t = BRODATZ_IMAGES)]
    images: usize,

    /// Native side length of the dataset images
    #[arg(long, default_value_t = NATIVE_RESOLUTION)]
    resolution: usize,

    /// Worker threads (default: all cores, 1 = sequential)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")
}

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}] {msg}")?
            .progress_chars("=> "),
    );
    Ok(pb)
}

fn parse_descriptor(name: &str) -> Result<Descriptor> {
    match name.parse::<Descriptor>() {
        Ok(descriptor) => Ok(descriptor),
        Err(_) => bail!("Invalid algorithm: {}.", name),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let descriptor = parse_descriptor(&cli.algorithm)?;
    let params = BenchmarkParams {
        descriptor,
        window: cli.window,
        native_size: cli.resolution,
        mode: ProcessingMode::from_threads(cli.threads),
    };
    let bench = TextureBenchmark::new(params).context("Invalid benchmark parameters")?;

    println!("Number of classes: {}", bench.num_classes());
    info!(
        "{} on {} workers: {}",
        descriptor,
        params.mode.concurrency(),
        descriptor.description()
    );

    let layout = DatasetLayout::brodatz(&cli.dataset).with_num_images(cli.images);
    let paths = layout.paths();

    let start = Instant::now();
    let pb = progress_bar(paths.len())?;
    let images = paths.iter().map(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        debug!("Reading {}", path.display());
        read_gray(path)
    });
    let set = bench
        .describe_dataset(images, |_| pb.inc(1))
        .with_context(|| format!("Failed to describe dataset in {}", cli.dataset.display()))?;
    pb.finish_and_clear();
    info!(
        "Extracted {} descriptors in {:.2?}",
        set.len(),
        start.elapsed()
    );

    let start = Instant::now();
    let pb = spinner("Evaluating retrieval...")?;
    let curve = bench.evaluate(&set).context("Retrieval evaluation failed")?;
    pb.finish_and_clear();
    info!("Evaluated in {:.2?}", start.elapsed());

    let report = bench.report(&set, curve);
    println!("{}", report);
    info!("Mean precision: {:.6}", report.curve.mean_precision());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["texeval"]).unwrap();
        assert_eq!(cli.algorithm, "lbp");
        assert_eq!(cli.window, 320);
        assert_eq!(cli.images, 112);
        assert_eq!(cli.resolution, 640);
        assert!(cli.threads.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["texeval", "-a", "wld", "-w", "160", "-t", "4"]).unwrap();
        assert_eq!(parse_descriptor(&cli.algorithm).unwrap(), Descriptor::Wld);
        assert_eq!(cli.window, 160);
        assert_eq!(cli.threads, Some(4));
    }

    #[test]
    fn test_invalid_algorithm_message() {
        let err = parse_descriptor("sift").unwrap_err();
        assert_eq!(err.to_string(), "Invalid algorithm: sift.");
    }
}
