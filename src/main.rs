use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use badcrop::dataset::{self, DownloadConfig, Downloader};
use badcrop::pipeline::{CropPipeline, DEFAULT_PREFIX, PipelineConfig};
use badcrop::{CropStrategy, UnknownStrategy};

#[derive(Debug, Parser)]
#[command(name = "badcrop", about = "Build a small image dataset and generate bad crops")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Copy local images and download placeholders into the dataset directory
    Fetch {
        /// Local images to copy first
        #[arg(long, default_value = "GoodImages")]
        source: PathBuf,
        /// Dataset directory
        #[arg(long, default_value = "my_100_images")]
        dataset: PathBuf,
        /// Placeholder image service
        #[arg(long, default_value = dataset::DEFAULT_PLACEHOLDER_HOST)]
        base_url: String,
        /// Number of placeholder images to download
        #[arg(long, default_value_t = 100)]
        count: usize,
        /// Pause between downloads, in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
        /// Per-request timeout, in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
        /// Skip the download step
        #[arg(long)]
        no_download: bool,
        /// Skip the local copy step
        #[arg(long)]
        no_copy: bool,
    },
    /// Write one bad crop per image
    Crop {
        #[arg(long, default_value = "my_100_images")]
        input: PathBuf,
        #[arg(long, default_value = "bad_crops")]
        output: PathBuf,
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// Use one strategy for every image (e.g. cut_top)
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<CropStrategy>,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_strategy(s: &str) -> Result<CropStrategy, String> {
    s.parse().map_err(|e: UnknownStrategy| e.to_string())
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("badcrop=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match Cli::parse().command {
        Commands::Fetch {
            source,
            dataset,
            base_url,
            count,
            delay_ms,
            timeout_secs,
            no_download,
            no_copy,
        } => {
            if !no_copy {
                let report = dataset::copy_local_images(&source, &dataset)
                    .with_context(|| format!("copying images from {}", source.display()))?;
                println!(
                    "Copied {} local images ({} failed)",
                    report.copied.len(),
                    report.failed.len()
                );
            }
            if !no_download {
                let config = DownloadConfig::default()
                    .base_url(base_url)
                    .count(count)
                    .delay(Duration::from_millis(delay_ms))
                    .timeout(Duration::from_secs(timeout_secs));
                let report = Downloader::new(config)?.download_all(&dataset)?;
                println!(
                    "Downloaded {} images ({} failed)",
                    report.saved.len(),
                    report.failed.len()
                );
            }
            let available = dataset::count_summary_images(&dataset);
            println!("{} images in {}", available, dataset.display());
            if available > 0 {
                println!("Next step: badcrop crop --input {}", dataset.display());
            }
        }
        Commands::Crop {
            input,
            output,
            prefix,
            strategy,
            seed,
        } => {
            if !input.is_dir() {
                eprintln!("Input directory '{}' not found", input.display());
                eprintln!("Run `badcrop fetch` first to get images");
                process::exit(1);
            }
            let config = PipelineConfig::new()
                .input_dir(input)
                .output_dir(output)
                .prefix(prefix)
                .strategy(strategy)
                .seed(seed);
            info!("Cropping {:?} -> {:?}", config.input_dir, config.output_dir);
            let mut pipeline = CropPipeline::new(config);
            let report = pipeline.run()?;
            println!(
                "Created {} bad crops in '{}' ({} of {} failed)",
                report.created.len(),
                pipeline.config().output_dir.display(),
                report.failed.len(),
                report.processed()
            );
        }
    }
    Ok(())
}
