use image::{DynamicImage, GrayImage, imageops::FilterType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use imageproc::morphology;

use crate::error::{Result, ScanError};

/// Largest image the resize step will produce (width × height)
pub const MAX_RESIZED_PIXELS: u64 = 100_000_000;

/// Reject zero-sized images before any processing touches them
pub fn ensure_non_empty(img: &DynamicImage) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ScanError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }
    Ok(())
}

/// Pixel dimensions of `img` scaled by `factor`, at least 1×1.
///
/// Fails when the result would exceed [`MAX_RESIZED_PIXELS`].
pub fn scaled_dimensions(img: &DynamicImage, factor: f32) -> Result<(u32, u32)> {
    let scale = |side: u32| (side as f64 * factor as f64).round().max(1.0);
    let (width, height) = (scale(img.width()), scale(img.height()));

    let too_large = || {
        ScanError::Config(format!(
            "resize_factor {} gives a {}x{} image, above the {} pixel limit",
            factor, width, height, MAX_RESIZED_PIXELS
        ))
    };
    if !(width <= u32::MAX as f64 && height <= u32::MAX as f64) {
        return Err(too_large());
    }
    let (width, height) = (width as u32, height as u32);
    match (width as u64).checked_mul(height as u64) {
        Some(pixels) if pixels <= MAX_RESIZED_PIXELS => Ok((width, height)),
        _ => Err(too_large()),
    }
}

/// Scale an image by `factor` using bilinear filtering
pub fn resize(img: &DynamicImage, factor: f32) -> Result<DynamicImage> {
    if factor == 1.0 {
        return Ok(img.clone());
    }
    let (width, height) = scaled_dimensions(img, factor)?;
    Ok(img.resize_exact(width, height, FilterType::Triangle))
}

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Normalised 1-D Gaussian kernel with `size` taps
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let half = (size / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= sum);
    kernel
}

/// Apply a fixed-size Gaussian blur to reduce noise
pub fn apply_blur(img: &GrayImage, kernel_size: u32, sigma: f32) -> GrayImage {
    separable_filter_equal(img, &gaussian_kernel(kernel_size, sigma))
}

/// Detect edges using Canny edge detector.
///
/// imageproc's `canny` smooths with its own σ = 1.4 Gaussian first, so the
/// result is twice blurred after [`apply_blur`]. Edge positions therefore
/// differ slightly from a single-blur Canny.
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Thicken edges with a square structuring element of side `kernel_size`
pub fn dilate_edges(edges: &GrayImage, kernel_size: u32) -> GrayImage {
    let radius = (kernel_size / 2).min(u8::MAX as u32) as u8;
    if radius == 0 {
        return edges.clone();
    }
    morphology::dilate(edges, Norm::LInf, radius)
}
