mod common;

use common::*;
use docscan::detection::corners::reorder;
use docscan::detection::rectify::target_size;
use imageproc::point::Point;

fn permutations(points: [Point<i32>; 4]) -> Vec<[Point<i32>; 4]> {
    let mut out = Vec::new();
    for a in 0..4 {
        for b in 0..4 {
            for c in 0..4 {
                for d in 0..4 {
                    let idx = [a, b, c, d];
                    let distinct = (0..4).all(|i| (i + 1..4).all(|j| idx[i] != idx[j]));
                    if distinct {
                        out.push(idx.map(|i| points[i]));
                    }
                }
            }
        }
    }
    out
}

#[test]
fn reorder_ignores_input_order() {
    let corners = [
        Point::new(52, 48),
        Point::new(251, 55),
        Point::new(246, 203),
        Point::new(47, 198),
    ];
    let expected = [
        Point::new(47, 198),
        Point::new(52, 48),
        Point::new(246, 203),
        Point::new(251, 55),
    ];

    let all = permutations(corners);
    assert_eq!(all.len(), 24);
    for perm in all {
        let ordered = reorder(&Quad::new(perm));
        assert_eq!(ordered.points(), &expected, "input {:?}", perm);
    }
}

#[test]
fn reorder_is_idempotent() {
    let quad = Quad::new([
        Point::new(10, 10),
        Point::new(90, 12),
        Point::new(88, 70),
        Point::new(8, 66),
    ]);
    let once = reorder(&quad);
    assert_eq!(reorder(&once), once);
}

#[test]
fn size_of_reordered_upright_rectangle() -> anyhow::Result<()> {
    let quad = Quad::try_from(
        &[
            Point::new(50, 50),
            Point::new(250, 50),
            Point::new(250, 200),
            Point::new(50, 200),
        ][..],
    )?;
    assert_eq!(target_size(&reorder(&quad))?, (200, 150));
    Ok(())
}

#[test]
fn document_rotated_120_degrees_is_rejected() {
    // 200x40 page rotated by 120°: the max-sum corner ends up left of the min-sum corner
    let quad = Quad::new([
        Point::new(200, 200),
        Point::new(100, 373),
        Point::new(165, 180),
        Point::new(65, 353),
    ]);
    let ordered = reorder(&quad);
    assert!(matches!(
        target_size(&ordered),
        Err(ScanError::InvalidGeometry(_))
    ));
}
