//! Directory-to-directory bad-crop pipeline.
//!
//! Decodes each image in the input directory, asks the generator for a
//! region, and writes the crop as `<prefix><stem><ext>`. One image failing
//! never stops the run.

use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::dataset::{FailedItem, list_images};
use crate::error::PipelineError;
use crate::generate::{BadCrop, bad_crop_for};
use crate::random::CropRandom;
use crate::region::Size;
use crate::strategy::CropStrategy;

/// Default output file prefix.
pub const DEFAULT_PREFIX: &str = "Badcrop";

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory holding the source images.
    pub input_dir: PathBuf,
    /// Directory the crops are written to. Created if missing.
    pub output_dir: PathBuf,
    /// Prepended to each output file name.
    pub prefix: String,
    /// Use this strategy for every image instead of picking at random.
    pub strategy: Option<CropStrategy>,
    /// Seed for a reproducible run. Unseeded runs use the thread RNG.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("my_100_images"),
            output_dir: PathBuf::from("bad_crops"),
            prefix: DEFAULT_PREFIX.to_string(),
            strategy: None,
            seed: None,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn strategy(mut self, strategy: Option<CropStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// One written crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropOutput {
    pub source: PathBuf,
    pub output: PathBuf,
    pub crop: BadCrop,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub created: Vec<CropOutput>,
    pub failed: Vec<FailedItem>,
}

impl PipelineReport {
    /// Number of images the run looked at.
    pub fn processed(&self) -> usize {
        self.created.len() + self.failed.len()
    }
}

/// Output file name for `source`: prefix, original stem, original extension.
pub fn output_name(prefix: &str, source: &Path) -> Option<String> {
    let stem = source.file_stem()?.to_str()?;
    Some(match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{prefix}{stem}.{ext}"),
        None => format!("{prefix}{stem}"),
    })
}

/// Crop a decoded image with a generated bad-crop region.
pub fn crop_image<R: CropRandom + ?Sized>(
    image: &DynamicImage,
    forced: Option<CropStrategy>,
    rng: &mut R,
) -> Result<(DynamicImage, BadCrop), PipelineError> {
    let size = Size::new(image.width(), image.height())?;
    let crop = bad_crop_for(size, forced, rng);
    let r = crop.rect;
    Ok((image.crop_imm(r.x, r.y, r.width, r.height), crop))
}

/// Sequential crop pipeline over one directory.
pub struct CropPipeline {
    config: PipelineConfig,
    rng: StdRng,
}

impl CropPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Crop every image in the input directory.
    ///
    /// Fails only if the input directory is missing or the output directory
    /// cannot be created.
    pub fn run(&mut self) -> Result<PipelineReport, PipelineError> {
        let images = list_images(&self.config.input_dir)?;
        let output_dir = self.config.output_dir.clone();
        fs::create_dir_all(&output_dir).map_err(|e| PipelineError::io(&output_dir, e))?;

        let mut report = PipelineReport::default();
        if images.is_empty() {
            warn!("No image files found in {:?}", self.config.input_dir);
            return Ok(report);
        }

        info!("Found {} images to process", images.len());
        for source in images {
            match self.process_one(&source) {
                Ok(created) => {
                    info!(
                        strategy = %created.crop.strategy,
                        rect = %created.crop.rect,
                        "Created {:?}",
                        created.output
                    );
                    report.created.push(created);
                }
                Err(e) => {
                    warn!("Error processing {:?}: {}", source, e);
                    report.failed.push(FailedItem {
                        item: source.display().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Created {} bad crops in {:?} ({} failed)",
            report.created.len(),
            output_dir,
            report.failed.len()
        );
        Ok(report)
    }

    /// Decode, crop, and save a single image.
    pub fn process_one(&mut self, source: &Path) -> Result<CropOutput, PipelineError> {
        let name = output_name(&self.config.prefix, source)
            .ok_or_else(|| PipelineError::UnnamedFile(source.to_path_buf()))?;
        let output = self.config.output_dir.join(name);

        let image = image::open(source)?;
        let (cropped, crop) = crop_image(&image, self.config.strategy, &mut self.rng)?;
        cropped.save(&output)?;

        Ok(CropOutput {
            source: source.to_path_buf(),
            output,
            crop,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    #[test]
    fn output_name_prefixes_stem() {
        assert_eq!(
            output_name("Badcrop", Path::new("in/sample_image_001.jpg")).as_deref(),
            Some("Badcropsample_image_001.jpg")
        );
        assert_eq!(
            output_name("neg_", Path::new("photo.PNG")).as_deref(),
            Some("neg_photo.PNG")
        );
        assert_eq!(output_name("x", Path::new("/")), None);
    }

    #[test]
    fn crop_image_matches_rect() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(120, 80, |x, y| {
            Rgb([x as u8, y as u8, 0])
        }));
        let mut rng = StdRng::seed_from_u64(5);
        let (cropped, crop) = crop_image(&img, Some(CropStrategy::CutSide), &mut rng).unwrap();
        assert_eq!(cropped.dimensions(), (crop.rect.width, crop.rect.height));
        let corner = cropped.get_pixel(0, 0);
        assert_eq!(corner[0], crop.rect.x as u8);
        assert_eq!(corner[1], crop.rect.y as u8);
    }

    #[test]
    fn crop_image_rejects_empty() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(0, 4));
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            crop_image(&img, None, &mut rng),
            Err(PipelineError::Crop(_))
        ));
    }

    #[test]
    fn config_defaults_and_builder() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("my_100_images"));
        assert_eq!(config.output_dir, PathBuf::from("bad_crops"));
        assert_eq!(config.prefix, "Badcrop");

        let config = PipelineConfig::new()
            .input_dir("a")
            .output_dir("b")
            .prefix("neg")
            .strategy(Some(CropStrategy::CutTop))
            .seed(Some(1));
        assert_eq!(config.strategy, Some(CropStrategy::CutTop));
        assert_eq!(config.seed, Some(1));
    }
}
