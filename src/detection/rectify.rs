use image::{DynamicImage, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, instrument};

use crate::error::{Result, ScanError};
use crate::models::Quad;

/// Below this, three of the corners are effectively collinear
const MIN_TRIANGLE_AREA: f64 = 1.0;

/// Output size of the rectified document, measured between reordered corners 1 and 2.
///
/// This is exact only for documents that are close to axis-aligned in the
/// photo. A non-positive size means the corners were not in the expected
/// arrangement.
pub fn target_size(quad: &Quad) -> Result<(u32, u32)> {
    let pts = quad.points();
    let width = pts[2].x - pts[1].x;
    let height = pts[2].y - pts[1].y;
    if width <= 0 || height <= 0 {
        return Err(ScanError::InvalidGeometry(format!(
            "rectified size must be positive, got {}x{}",
            width, height
        )));
    }
    Ok((width as u32, height as u32))
}

/// Projection taking the reordered corners to the corners of a `width x height` rectangle
pub fn document_projection(quad: &Quad, width: u32, height: u32) -> Result<Projection> {
    let min_area = quad.min_triangle_area();
    if min_area < MIN_TRIANGLE_AREA {
        return Err(ScanError::DegenerateTransform(format!(
            "corners are collinear or coincident (min triangle area {:.2})",
            min_area
        )));
    }

    let (w, h) = (width as f32, height as f32);
    let dest: [(f32, f32); 4] = [(0.0, 0.0), (0.0, h), (w, 0.0), (w, h)];

    Projection::from_control_points(quad.as_f32(), dest).ok_or_else(|| {
        ScanError::DegenerateTransform("no projection maps the corners onto a rectangle".into())
    })
}

/// Warp the document bounded by `quad` into an axis-aligned image
#[instrument(skip(img), fields(corners = ?quad.points()))]
pub fn rectify(img: &DynamicImage, quad: &Quad) -> Result<RgbImage> {
    let (width, height) = target_size(quad)?;
    let projection = document_projection(quad, width, height)?;

    let source = img.to_rgb8();
    let mut output = RgbImage::new(width, height);
    warp_into(
        &source,
        &projection,
        Interpolation::Bilinear,
        Rgb([0u8, 0, 0]),
        &mut output,
    );

    debug!(width, height, "Document rectified");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::point::Point;

    fn upright_quad() -> Quad {
        // canonical order: bottom-left, top-left, bottom-right, top-right
        Quad::new([
            Point::new(10, 40),
            Point::new(10, 10),
            Point::new(50, 40),
            Point::new(50, 10),
        ])
    }

    #[test]
    fn size_from_reordered_corners() {
        assert_eq!(target_size(&upright_quad()).unwrap(), (40, 30));
    }

    #[test]
    fn inverted_corners_are_rejected() {
        let quad = Quad::new([
            Point::new(50, 10),
            Point::new(50, 40),
            Point::new(10, 10),
            Point::new(10, 40),
        ]);
        assert!(matches!(
            target_size(&quad),
            Err(ScanError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn collinear_corners_are_degenerate() {
        let quad = Quad::new([
            Point::new(0, 0),
            Point::new(10, 10),
            Point::new(20, 20),
            Point::new(30, 30),
        ]);
        assert!(matches!(
            document_projection(&quad, 10, 10),
            Err(ScanError::DegenerateTransform(_))
        ));
    }

    #[test]
    fn rectify_flips_rows() {
        // source: top band red, bottom band blue
        let mut img = RgbImage::from_pixel(60, 50, Rgb([0, 0, 0]));
        for y in 10..=40 {
            for x in 10..=50 {
                let colour = if y < 25 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) };
                img.put_pixel(x, y, colour);
            }
        }
        let out = rectify(&DynamicImage::ImageRgb8(img), &upright_quad()).unwrap();
        assert_eq!(out.dimensions(), (40, 30));
        // the bottom-left corner maps to the origin, so rows come out upside down
        assert_eq!(out.get_pixel(20, 5), &Rgb([0, 0, 255]));
        assert_eq!(out.get_pixel(20, 25), &Rgb([255, 0, 0]));
    }
}
