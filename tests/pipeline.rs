//! End-to-end pipeline runs over temporary directories.

use std::fs;
use std::path::Path;

use badcrop::pipeline::{CropPipeline, PipelineConfig};
use badcrop::{CropStrategy, PipelineError};
use image::{GenericImageView, Rgb, RgbImage};

fn write_png(path: &Path, w: u32, h: u32) {
    RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
        .save(path)
        .unwrap();
}

fn config(root: &Path) -> PipelineConfig {
    PipelineConfig::new()
        .input_dir(root.join("my_100_images"))
        .output_dir(root.join("bad_crops"))
}

#[test]
fn one_crop_per_image() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("my_100_images");
    fs::create_dir(&input).unwrap();
    write_png(&input.join("sample_image_001.png"), 80, 60);
    write_png(&input.join("sample_image_002.png"), 60, 80);
    write_png(&input.join("tiny.png"), 10, 10);
    fs::write(input.join("notes.txt"), "not an image").unwrap();

    let mut pipeline = CropPipeline::new(config(root.path()).seed(Some(9)));
    let report = pipeline.run().unwrap();

    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert_eq!(report.created.len(), 3);
    assert_eq!(report.processed(), 3);

    for created in &report.created {
        let name = created.output.file_name().unwrap().to_str().unwrap();
        let source = created.source.file_name().unwrap().to_str().unwrap();
        assert_eq!(name, format!("Badcrop{source}"));

        let written = image::open(&created.output).unwrap();
        assert_eq!(
            written.dimensions(),
            (created.crop.rect.width, created.crop.rect.height)
        );
    }
    assert!(root.path().join("bad_crops/Badcroptiny.png").is_file());
}

#[test]
fn corrupt_file_is_skipped() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("my_100_images");
    fs::create_dir(&input).unwrap();
    write_png(&input.join("a_good.png"), 40, 30);
    fs::write(input.join("b_broken.jpg"), b"definitely not a jpeg").unwrap();
    write_png(&input.join("c_good.png"), 30, 40);

    let report = CropPipeline::new(config(root.path())).run().unwrap();

    assert_eq!(report.created.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].item.ends_with("b_broken.jpg"));
    assert!(!root.path().join("bad_crops/Badcropb_broken.jpg").exists());
}

#[test]
fn seeded_runs_are_reproducible() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("my_100_images");
    fs::create_dir(&input).unwrap();
    for i in 0..4 {
        write_png(&input.join(format!("img_{i}.png")), 90 + i * 7, 70);
    }

    let rects = |seed| {
        CropPipeline::new(config(root.path()).seed(Some(seed)))
            .run()
            .unwrap()
            .created
            .into_iter()
            .map(|c| c.crop)
            .collect::<Vec<_>>()
    };
    assert_eq!(rects(123), rects(123));
}

#[test]
fn forced_strategy_and_prefix() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("my_100_images");
    fs::create_dir(&input).unwrap();
    write_png(&input.join("p.png"), 50, 50);

    let report = CropPipeline::new(
        config(root.path())
            .prefix("neg_")
            .strategy(Some(CropStrategy::CutBottom)),
    )
    .run()
    .unwrap();

    let created = &report.created[0];
    assert_eq!(created.crop.strategy, CropStrategy::CutBottom);
    assert_eq!(created.crop.rect.y, 0);
    assert!(created.output.ends_with("neg_p.png"));
}

#[test]
fn empty_input_creates_output_dir() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("my_100_images")).unwrap();

    let report = CropPipeline::new(config(root.path())).run().unwrap();

    assert_eq!(report.processed(), 0);
    assert!(root.path().join("bad_crops").is_dir());
}

#[test]
fn missing_input_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let err = CropPipeline::new(config(root.path())).run().unwrap_err();
    assert!(matches!(err, PipelineError::MissingDirectory(_)));
}
