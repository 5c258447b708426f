pub mod preprocessing;
pub mod geometry;
pub mod contours;
pub mod corners;
pub mod rectify;
pub mod present;
pub mod steps;

use image::{DynamicImage, GrayImage};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::ScanConfig;
use crate::error::Result;
use crate::models::Quad;
use crate::pipeline::Pipeline;

/// Number of leading steps in the standard pipeline that produce the edge map
const EDGE_MAP_STEPS: usize = 5;
/// Number of leading steps that end with the reordered corners
const CORNER_STEPS: usize = 7;

/// Outcome of a successful scan
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Rectified document, oriented for display
    pub image: DynamicImage,
    /// Document corners in canonical order, in resized-input coordinates
    pub corners: Quad,
    /// Size of the rectified document
    pub size: (u32, u32),
}

/// Main document scanning orchestrator
pub struct DocumentScanner {
    pipeline: Pipeline,
}

impl DocumentScanner {
    /// Build a scanner after checking the configuration
    pub fn new(config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: build_standard_pipeline(config),
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.pipeline = self.pipeline.with_verbose(verbose);
        self
    }

    /// Save each stage's image into `output_dir` (must be empty or missing)
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        self.pipeline = self.pipeline.with_debug(output_dir)?;
        Ok(self)
    }

    /// Run the full scan: detect, rectify and orient the document
    #[instrument(skip_all, fields(width = img.width(), height = img.height()))]
    pub fn scan(&self, img: &DynamicImage) -> Result<ScanResult> {
        let data = self.pipeline.run(img.clone())?;
        let corners = data.require_corners()?;
        let size = (data.image.width(), data.image.height());
        info!(
            width = size.0,
            height = size.1,
            corners = ?corners.points(),
            "Document scanned"
        );
        Ok(ScanResult {
            image: data.image,
            corners,
            size,
        })
    }

    /// Edge map after resizing and preprocessing (for debugging)
    pub fn edge_map(&self, img: &DynamicImage) -> Result<GrayImage> {
        let data = self.pipeline.run_partial(img.clone(), EDGE_MAP_STEPS)?;
        Ok(data.image.to_luma8())
    }

    /// Canonical document corners without rectifying (for debugging)
    pub fn detect_corners(&self, img: &DynamicImage) -> Result<Quad> {
        let data = self.pipeline.run_partial(img.clone(), CORNER_STEPS)?;
        data.require_corners()
    }
}

/// Build the standard scan pipeline using the composable pipeline system
pub fn build_standard_pipeline(config: &ScanConfig) -> Pipeline {
    use crate::detection::steps::*;

    Pipeline::new()
        .add_step(Arc::new(ResizeStep {
            factor: config.resize_factor,
        }))
        .add_step(Arc::new(GrayscaleStep))
        .add_step(Arc::new(BlurStep {
            kernel_size: config.blur_kernel_size,
            sigma: config.blur_sigma,
        }))
        .add_step(Arc::new(EdgeDetectionStep {
            low_threshold: config.canny_low,
            high_threshold: config.canny_high,
        }))
        .add_step(Arc::new(DilateStep {
            kernel_size: config.dilate_kernel_size,
        }))
        .add_step(Arc::new(DocumentContourStep {
            epsilon_factor: config.epsilon_factor,
        }))
        .add_step(Arc::new(CornerReorderStep))
        .add_step(Arc::new(RectifyStep))
        .add_step(Arc::new(OrientStep))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_stage_order() {
        let pipeline = build_standard_pipeline(&ScanConfig::default());
        let names = pipeline.step_names();
        assert_eq!(
            names,
            vec![
                "Resize",
                "Grayscale Conversion",
                "Gaussian Blur",
                "Edge Detection",
                "Dilation",
                "Contour Detection",
                "Corner Reorder",
                "Perspective Warp",
                "Orientation",
            ]
        );
        assert_eq!(names[EDGE_MAP_STEPS - 1], "Dilation");
        assert_eq!(names[CORNER_STEPS - 1], "Corner Reorder");
    }
}
