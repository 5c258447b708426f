use image::DynamicImage;

/// Undo the row inversion introduced by the rectifier's corner convention.
///
/// Rotating by 180° and mirroring horizontally amounts to a vertical flip.
pub fn orient(img: &DynamicImage) -> DynamicImage {
    img.rotate180().fliph()
}
