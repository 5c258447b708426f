use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use tempfile::NamedTempFile;

/// Quadrant colours of the synthetic document
pub const TOP_LEFT: Rgb<u8> = Rgb([255, 255, 255]);
pub const TOP_RIGHT: Rgb<u8> = Rgb([255, 255, 0]);
pub const BOTTOM_LEFT: Rgb<u8> = Rgb([0, 255, 255]);
pub const BOTTOM_RIGHT: Rgb<u8> = Rgb([255, 128, 255]);

/// A white document spanning `[x0, x1) x [y0, y1)` on a black background
pub fn white_document(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// A document with four differently coloured quadrants on a black background
pub fn quadrant_document(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> DynamicImage {
    let (mid_x, mid_y) = ((x0 + x1) / 2, (y0 + y1) / 2);
    let img = RgbImage::from_fn(width, height, |x, y| {
        if !(x0..x1).contains(&x) || !(y0..y1).contains(&y) {
            return Rgb([0, 0, 0]);
        }
        match (x < mid_x, y < mid_y) {
            (true, true) => TOP_LEFT,
            (false, true) => TOP_RIGHT,
            (true, false) => BOTTOM_LEFT,
            (false, false) => BOTTOM_RIGHT,
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// A filled white polygon on a black background
pub fn polygon_document(width: u32, height: u32, corners: &[Point<i32>]) -> DynamicImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([0, 0, 0]));
    draw_polygon_mut(&mut img, corners, Rgb([255, 255, 255]));
    DynamicImage::ImageRgb8(img)
}

pub fn black_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(width, height))
}

/// Save an image to a temporary PNG file that is removed on drop
pub fn save_temp_png(img: &DynamicImage) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}

/// True when every channel differs by at most `tolerance`
pub fn close_colour(a: &Rgb<u8>, b: &Rgb<u8>, tolerance: u8) -> bool {
    a.0.iter().zip(b.0.iter()).all(|(x, y)| x.abs_diff(*y) <= tolerance)
}

pub fn near(actual: Point<i32>, expected: (i32, i32), tolerance: i32) -> bool {
    (actual.x - expected.0).abs() <= tolerance && (actual.y - expected.1).abs() <= tolerance
}
