//! Dataset assembly: copy local images and download placeholders.
//!
//! Everything here is sequential. A failure on one file is logged and
//! recorded in the report; only a dataset directory that cannot be created
//! stops a run.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::PipelineError;

/// File suffixes treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "webp"];

/// Suffixes counted in the final dataset summary.
pub const SUMMARY_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Placeholder sizes, cycled by image index.
pub const PLACEHOLDER_SIZES: [(u32, u32); 6] = [
    (800, 600),
    (600, 800),
    (1000, 600),
    (600, 1000),
    (900, 700),
    (700, 900),
];

/// Default placeholder image service.
pub const DEFAULT_PLACEHOLDER_HOST: &str = "https://picsum.photos";

/// Whether `path` has one of `extensions` as its suffix.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|known| e.eq_ignore_ascii_case(known)))
}

/// Regular files directly inside `dir` with an image suffix, sorted by name.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    list_with_extensions(dir, &IMAGE_EXTENSIONS)
}

fn list_with_extensions(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::MissingDirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Number of JPEG/PNG files in the dataset directory, or 0 if it is missing.
pub fn count_summary_images(dir: &Path) -> usize {
    list_with_extensions(dir, &SUMMARY_EXTENSIONS)
        .map(|files| files.len())
        .unwrap_or(0)
}

fn ensure_dir(dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))
}

/// A file that could not be copied or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub item: String,
    pub reason: String,
}

/// Outcome of [`copy_local_images`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// `(source, destination)` pairs that were copied.
    pub copied: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<FailedItem>,
}

/// Name given to the `index`-th (1-based) copied local image.
pub fn local_copy_name(index: usize, source: &Path) -> String {
    match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("good_image_{index:03}.{ext}"),
        None => format!("good_image_{index:03}"),
    }
}

/// Copy every image in `source_dir` into `dataset_dir` under normalized names.
///
/// A missing source directory yields an empty report.
pub fn copy_local_images(
    source_dir: &Path,
    dataset_dir: &Path,
) -> Result<CopyReport, PipelineError> {
    ensure_dir(dataset_dir)?;
    let mut report = CopyReport::default();

    let images = match list_images(source_dir) {
        Ok(images) => images,
        Err(PipelineError::MissingDirectory(_)) => {
            info!("No local image directory at {:?}", source_dir);
            return Ok(report);
        }
        Err(e) => return Err(e),
    };
    if images.is_empty() {
        info!("No images found in {:?}", source_dir);
        return Ok(report);
    }

    info!("Copying {} images from {:?} to {:?}", images.len(), source_dir, dataset_dir);
    for (i, source) in images.into_iter().enumerate() {
        let dest = dataset_dir.join(local_copy_name(i + 1, &source));
        match fs::copy(&source, &dest) {
            Ok(_) => {
                debug!("Copied {:?} -> {:?}", source, dest);
                report.copied.push((source, dest));
            }
            Err(e) => {
                warn!("Failed to copy {:?}: {}", source, e);
                report.failed.push(FailedItem {
                    item: source.display().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}

/// One placeholder image to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderImage {
    pub url: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// Placeholder URLs under `base_url` for images `1..=count`, cycling
/// through [`PLACEHOLDER_SIZES`].
pub fn placeholder_urls(base_url: &str, count: usize) -> Vec<PlaceholderImage> {
    let base_url = base_url.trim_end_matches('/');
    (1..=count)
        .map(|i| {
            let (width, height) = PLACEHOLDER_SIZES[i % PLACEHOLDER_SIZES.len()];
            PlaceholderImage {
                url: format!("{base_url}/{width}/{height}?random={i}"),
                file_name: format!("sample_image_{i:03}.jpg"),
                width,
                height,
            }
        })
        .collect()
}

/// Download settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Image service root, e.g. `https://picsum.photos`.
    pub base_url: String,
    /// How many placeholder images to request.
    pub count: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Pause after each successful download.
    pub delay: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PLACEHOLDER_HOST.to_string(),
            count: 100,
            timeout: Duration::from_secs(10),
            delay: Duration::from_millis(500),
        }
    }
}

impl DownloadConfig {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Outcome of [`Downloader::download_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub saved: Vec<PathBuf>,
    pub failed: Vec<FailedItem>,
}

/// Sequential placeholder downloader.
pub struct Downloader {
    client: reqwest::blocking::Client,
    config: DownloadConfig,
}

impl Downloader {
    pub fn new(config: DownloadConfig) -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Fetch one URL and return its body.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, PipelineError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    /// Download every placeholder into `dataset_dir`, one at a time.
    pub fn download_all(&self, dataset_dir: &Path) -> Result<DownloadReport, PipelineError> {
        ensure_dir(dataset_dir)?;
        let images = placeholder_urls(&self.config.base_url, self.config.count);
        let total = images.len();
        let mut report = DownloadReport::default();

        info!("Downloading {} placeholder images to {:?}", total, dataset_dir);
        for (i, image) in images.into_iter().enumerate() {
            let dest = dataset_dir.join(&image.file_name);
            let result = self.fetch(&image.url).and_then(|body| {
                fs::write(&dest, body).map_err(|e| PipelineError::io(&dest, e))
            });
            match result {
                Ok(()) => {
                    info!("[{}/{}] Saved {}", i + 1, total, image.file_name);
                    report.saved.push(dest);
                    if !self.config.delay.is_zero() {
                        thread::sleep(self.config.delay);
                    }
                }
                Err(e) => {
                    warn!("[{}/{}] Failed {}: {}", i + 1, total, image.url, e);
                    report.failed.push(FailedItem {
                        item: image.url,
                        reason: e.to_string(),
                    });
                }
            }
        }
        info!("Downloaded {} of {} images", report.saved.len(), total);
        Ok(report)
    }
}
