use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while scanning a document.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("no contours found in edge map")]
    NoContours,

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
