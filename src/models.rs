use imageproc::geometry::{arc_length, contour_area};
use imageproc::point::Point;

use crate::error::{Result, ScanError};

/// A simplified closed contour.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point<i32>>,
}

impl Polygon {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Enclosed area (absolute shoelace area).
    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }

    /// Closed perimeter.
    pub fn perimeter(&self) -> f64 {
        arc_length(&self.points, true)
    }
}

/// Exactly four document corners.
///
/// The only way to build one from a detected polygon is through `TryFrom`,
/// which checks the vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad([Point<i32>; 4]);

impl Quad {
    pub fn new(points: [Point<i32>; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Point<i32>; 4] {
        &self.0
    }

    /// Control points in the form expected by `Projection::from_control_points`.
    pub fn as_f32(&self) -> [(f32, f32); 4] {
        self.0.map(|p| (p.x as f32, p.y as f32))
    }

    /// Smallest area of any triangle spanned by three of the corners.
    ///
    /// Zero means at least three corners are collinear (or two coincide), in
    /// which case no homography maps the quad onto a rectangle.
    pub fn min_triangle_area(&self) -> f64 {
        const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
        TRIPLES
            .iter()
            .map(|t| contour_area(&[self.0[t[0]], self.0[t[1]], self.0[t[2]]]))
            .fold(f64::INFINITY, f64::min)
    }
}

impl TryFrom<&[Point<i32>]> for Quad {
    type Error = ScanError;

    fn try_from(points: &[Point<i32>]) -> Result<Self> {
        let corners: [Point<i32>; 4] = points.try_into().map_err(|_| {
            ScanError::InvalidGeometry(format!(
                "expected 4 document corners, found {}",
                points.len()
            ))
        })?;
        Ok(Self(corners))
    }
}

impl TryFrom<&Polygon> for Quad {
    type Error = ScanError;

    fn try_from(polygon: &Polygon) -> Result<Self> {
        Quad::try_from(polygon.points.as_slice())
    }
}
