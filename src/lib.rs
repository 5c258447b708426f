pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;

pub use config::ScanConfig;
pub use detection::{DocumentScanner, ScanResult, build_standard_pipeline};
pub use error::{Result, ScanError};
pub use models::{Polygon, Quad};
pub use pipeline::{
    DebugConfig, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep,
};

#[cfg(feature = "gui")]
pub mod gui;

use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Decode an image file, reporting the path on failure
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    ImageReader::open(path)
        .map_err(|e| ScanError::ImageLoad {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?
        .decode()
        .map_err(|source| ScanError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })
}
