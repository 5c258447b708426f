use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::new(1000, 1000);

    // Dark gradient background
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let shade = ((x + y) * 60 / 2000) as u8;
        *pixel = Rgb([shade, shade, shade + 10]);
    }

    // Slightly skewed page
    let page = [
        Point::new(180, 170),
        Point::new(820, 190),
        Point::new(835, 660),
        Point::new(165, 645),
    ];
    draw_polygon_mut(&mut img, &page, Rgb([240, 238, 230]));

    std::fs::create_dir_all("Resources")?;
    img.save("Resources/2.jpg")?;
    println!("Created Resources/2.jpg (1000x1000 synthetic document photo)");
    Ok(())
}
