//! Contour simplification.
//!
//! Area and perimeter come from `imageproc::geometry`. Its `approximate_polygon_dp`
//! panics on a zero epsilon (single-pixel contours have no perimeter) and splits
//! closed curves at their first point, so simplification is done here.

use imageproc::point::Point;

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    (dx * dx + dy * dy).sqrt()
}

fn distance_sq(a: Point<i32>, b: Point<i32>) -> i64 {
    let dx = (b.x - a.x) as i64;
    let dy = (b.y - a.y) as i64;
    dx * dx + dy * dy
}

/// Distance from `p` to the line through `a` and `b` (or to `a` when they coincide).
fn point_to_line_distance(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return distance(p, a);
    }
    (dy * (p.x - a.x) as f64 - dx * (p.y - a.y) as f64).abs() / len
}

/// Ramer–Douglas–Peucker simplification of a closed contour.
///
/// The contour is split at two mutually distant points and each half is
/// simplified as an open chain, so corners survive regardless of where
/// tracing started.
pub fn approximate_closed(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let farthest_from = |origin: Point<i32>| {
        points
            .iter()
            .enumerate()
            .max_by_key(|(_, p)| distance_sq(origin, **p))
            .map(|(i, _)| i)
            .unwrap_or(0)
    };
    let a = farthest_from(points[0]);
    let b = farthest_from(points[a]);
    if a == b {
        return vec![points[a]];
    }
    let (start, end) = (a.min(b), a.max(b));

    // start..=end, then end..=start wrapping around
    let first: Vec<Point<i32>> = points[start..=end].to_vec();
    let second: Vec<Point<i32>> = points[end..]
        .iter()
        .chain(points[..=start].iter())
        .copied()
        .collect();

    let mut result = approximate_open(&first, epsilon);
    let tail = approximate_open(&second, epsilon);
    // both halves share their endpoints
    result.pop();
    result.extend_from_slice(&tail[..tail.len() - 1]);
    result
}

/// Ramer–Douglas–Peucker simplification of an open chain. Keeps both endpoints.
pub fn approximate_open(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end - start <= 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_index = start;
        for i in (start + 1)..end {
            let dist = point_to_line_distance(points[i], points[start], points[end]);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        if max_dist > epsilon {
            keep[max_index] = true;
            stack.push((start, max_index));
            stack.push((max_index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::geometry::arc_length;

    /// Trace the border of an axis-aligned rectangle pixel by pixel, starting
    /// at the top-left corner and walking clockwise.
    fn rectangle_border(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point<i32>> {
        let mut pts = Vec::new();
        for x in x0..x1 {
            pts.push(Point::new(x, y0));
        }
        for y in y0..y1 {
            pts.push(Point::new(x1, y));
        }
        for x in (x0 + 1..=x1).rev() {
            pts.push(Point::new(x, y1));
        }
        for y in (y0 + 1..=y1).rev() {
            pts.push(Point::new(x0, y));
        }
        pts
    }

    #[test]
    fn open_chain_drops_collinear_points() {
        let pts: Vec<_> = (0..10).map(|x| Point::new(x, 0)).collect();
        assert_eq!(
            approximate_open(&pts, 1.0),
            vec![Point::new(0, 0), Point::new(9, 0)]
        );
    }

    #[test]
    fn closed_rectangle_reduces_to_corners() {
        let border = rectangle_border(10, 20, 110, 80);
        let epsilon = 0.02 * arc_length(&border, true);
        let mut corners = approximate_closed(&border, epsilon);
        corners.sort_by_key(|p| (p.x, p.y));
        assert_eq!(
            corners,
            vec![
                Point::new(10, 20),
                Point::new(10, 80),
                Point::new(110, 20),
                Point::new(110, 80),
            ]
        );
    }

    #[test]
    fn closed_result_independent_of_start() {
        let border = rectangle_border(0, 0, 50, 30);
        let mut rotated = border.clone();
        rotated.rotate_left(17);
        let epsilon = 0.02 * arc_length(&border, true);

        let mut a = approximate_closed(&border, epsilon);
        let mut b = approximate_closed(&rotated, epsilon);
        a.sort_by_key(|p| (p.x, p.y));
        b.sort_by_key(|p| (p.x, p.y));
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn single_pixel_contour_with_zero_tolerance() {
        let dot = [Point::new(4, 4)];
        assert_eq!(arc_length(&dot, true), 0.0);
        assert_eq!(approximate_closed(&dot, 0.0), vec![Point::new(4, 4)]);

        let dash: Vec<_> = (0..6).map(|x| Point::new(x, 2)).collect();
        let simplified = approximate_closed(&dash, 0.0);
        assert!(simplified.contains(&Point::new(0, 2)));
        assert!(simplified.contains(&Point::new(5, 2)));
    }
}
