use image::{DynamicImage, Rgb};
use imageproc::drawing::draw_line_segment_mut;
use std::sync::Arc;
use tracing::{debug, info};

use crate::detection::{contours, corners, preprocessing, present, rectify};
use crate::error::Result;
use crate::models::Quad;
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};

/// Scale the input; the scaled image also becomes the rectification source
pub struct ResizeStep {
    pub factor: f32,
}

impl PipelineStep for ResizeStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        preprocessing::ensure_non_empty(&data.image)?;
        let resized = preprocessing::resize(&data.image, self.factor)?;
        debug!(
            width = resized.width(),
            height = resized.height(),
            factor = self.factor,
            "Input resized"
        );
        Ok(PipelineData {
            original: Arc::new(resized.clone()),
            ..data.with_image(resized)
        })
    }

    fn name(&self) -> &str {
        "Resize"
    }
}

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        preprocessing::ensure_non_empty(&data.image)?;
        let gray = preprocessing::to_grayscale(&data.image);
        Ok(data.with_image(DynamicImage::ImageLuma8(gray)))
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Apply Gaussian blur
pub struct BlurStep {
    pub kernel_size: u32,
    pub sigma: f32,
}

impl PipelineStep for BlurStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let blurred = preprocessing::apply_blur(&gray, self.kernel_size, self.sigma);
        Ok(data.with_image(DynamicImage::ImageLuma8(blurred)))
    }

    fn name(&self) -> &str {
        "Gaussian Blur"
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.image.to_luma8();
        let edges = preprocessing::detect_edges(&gray, self.low_threshold, self.high_threshold);
        Ok(data.with_image(DynamicImage::ImageLuma8(edges)))
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Close small gaps in the edge map
pub struct DilateStep {
    pub kernel_size: u32,
}

impl PipelineStep for DilateStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let edges = data.image.to_luma8();
        let dilated = preprocessing::dilate_edges(&edges, self.kernel_size);
        Ok(data.with_image(DynamicImage::ImageLuma8(dilated)))
    }

    fn name(&self) -> &str {
        "Dilation"
    }
}

/// Pick the largest simplified external contour as the document outline.
///
/// The step's image is the source with the outline drawn on it, so debug
/// output shows what was detected.
pub struct DocumentContourStep {
    pub epsilon_factor: f64,
}

impl PipelineStep for DocumentContourStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let edges = data.image.to_luma8();
        let candidates = contours::document_candidates(&edges, self.epsilon_factor);
        let candidate_count = candidates.len();

        let polygon = contours::largest_polygon(candidates)?;
        let area = polygon.area();
        let vertex_count = polygon.points.len();

        if context.verbose {
            info!(candidate_count, area, vertex_count, "Selected document contour");
        }

        let quad = Quad::try_from(&polygon)?;

        let mut outlined = data.original.to_rgb8();
        let pts = quad.as_f32();
        for i in 0..pts.len() {
            let next = pts[(i + 1) % pts.len()];
            draw_line_segment_mut(&mut outlined, pts[i], next, Rgb([0u8, 255, 0]));
        }

        let mut result = data
            .with_image(DynamicImage::ImageRgb8(outlined))
            .with_metadata("contour_count", MetadataValue::Int(candidate_count as i64))
            .with_metadata("polygon_area", MetadataValue::Float(area))
            .with_metadata("vertex_count", MetadataValue::Int(vertex_count as i64));
        result.corners = Some(quad);
        Ok(result)
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Sort the detected corners into canonical order
pub struct CornerReorderStep;

impl PipelineStep for CornerReorderStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let quad = data.require_corners()?;
        let ordered = corners::reorder(&quad);
        debug!(corners = ?ordered.points(), "Corners reordered");
        Ok(PipelineData {
            corners: Some(ordered),
            ..data
        })
    }

    fn name(&self) -> &str {
        "Corner Reorder"
    }
}

/// Warp the document region of the source into a top-down view
pub struct RectifyStep;

impl PipelineStep for RectifyStep {
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData> {
        let quad = data.require_corners()?;
        let warped = rectify::rectify(&data.original, &quad)?;
        let (width, height) = warped.dimensions();

        if context.verbose {
            info!(width, height, "Document rectified");
        }

        Ok(data
            .with_image(DynamicImage::ImageRgb8(warped))
            .with_metadata("rectified_width", MetadataValue::Int(width as i64))
            .with_metadata("rectified_height", MetadataValue::Int(height as i64)))
    }

    fn name(&self) -> &str {
        "Perspective Warp"
    }
}

/// Apply the fixed orientation correction before presentation
pub struct OrientStep;

impl PipelineStep for OrientStep {
    fn process(&self, data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let oriented = present::orient(&data.image);
        Ok(data.with_image(oriented))
    }

    fn name(&self) -> &str {
        "Orientation"
    }
}
