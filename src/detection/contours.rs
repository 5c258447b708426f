use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use tracing::debug;

use crate::detection::geometry;
use crate::error::{Result, ScanError};
use crate::models::Polygon;

/// Outer borders that are not nested inside any other border
pub fn find_external_contours(edges: &GrayImage) -> Vec<Polygon> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Polygon::new(c.points))
        .collect()
}

/// Simplify each contour with an epsilon proportional to its perimeter
pub fn approximate_contours(contours: &[Polygon], epsilon_factor: f64) -> Vec<Polygon> {
    contours
        .iter()
        .map(|c| {
            let epsilon = c.perimeter() * epsilon_factor;
            Polygon::new(geometry::approximate_closed(&c.points, epsilon))
        })
        .collect()
}

/// Sort polygons by enclosed area, largest first. Equal areas keep their order.
pub fn sort_by_area_desc(polygons: &mut [Polygon]) {
    polygons.sort_by(|a, b| b.area().total_cmp(&a.area()));
}

/// Find, simplify and rank the external contours of an edge map.
///
/// Returns every candidate polygon, largest first.
pub fn document_candidates(edges: &GrayImage, epsilon_factor: f64) -> Vec<Polygon> {
    let contours = find_external_contours(edges);
    debug!(count = contours.len(), "External contours found");
    let mut polygons = approximate_contours(&contours, epsilon_factor);
    sort_by_area_desc(&mut polygons);
    polygons
}

/// The document outline: the first of the ranked candidates from [`document_candidates`]
pub fn largest_polygon(candidates: Vec<Polygon>) -> Result<Polygon> {
    candidates.into_iter().next().ok_or(ScanError::NoContours)
}
