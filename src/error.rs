//! Error types.

use thiserror::Error;

/// Crop region computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CropError {
    /// Width or height is zero, negative, or does not fit in `u32`.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
}

/// Error from the dataset and crop pipeline glue.
#[cfg(feature = "dataset")]
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {}", .0.display())]
    MissingDirectory(std::path::PathBuf),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error("file has no usable name: {}", .0.display())]
    UnnamedFile(std::path::PathBuf),
}

#[cfg(feature = "dataset")]
impl PipelineError {
    pub(crate) fn io(path: impl Into<std::path::PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
