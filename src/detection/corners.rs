use crate::models::Quad;

/// Index of the first smallest key
fn first_min(keys: &[i32; 4]) -> usize {
    (1..4).fold(0, |best, i| if keys[i] < keys[best] { i } else { best })
}

/// Index of the first largest key
fn first_max(keys: &[i32; 4]) -> usize {
    (1..4).fold(0, |best, i| if keys[i] > keys[best] { i } else { best })
}

/// Put four corners into canonical order using coordinate sum/difference extremes.
///
/// With `sum = x + y` and `diff = x - y` the output is
/// `[min diff, min sum, max sum, max diff]`; for an upright document that is
/// bottom-left, top-left, bottom-right, top-right. Ties go to the corner that
/// came first in the input. Only meaningful for near axis-aligned documents.
pub fn reorder(quad: &Quad) -> Quad {
    let pts = quad.points();
    let sums = pts.map(|p| p.x + p.y);
    let diffs = pts.map(|p| p.x - p.y);

    Quad::new([
        pts[first_min(&diffs)],
        pts[first_min(&sums)],
        pts[first_max(&sums)],
        pts[first_max(&diffs)],
    ])
}
