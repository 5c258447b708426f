use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScanError};

/// Tunable parameters for the scan pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scale applied to the input before detection (1.0 keeps the original size).
    pub resize_factor: f32,
    /// Side length of the Gaussian kernel. Must be odd.
    pub blur_kernel_size: u32,
    /// Standard deviation of the Gaussian kernel.
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Side length of the square structuring element used to close edge gaps. Must be odd.
    pub dilate_kernel_size: u32,
    /// Polygon approximation tolerance as a fraction of each contour's perimeter.
    pub epsilon_factor: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            resize_factor: 0.3,
            blur_kernel_size: 3,
            blur_sigma: 3.0,
            canny_low: 50.0,
            canny_high: 100.0,
            dilate_kernel_size: 3,
            epsilon_factor: 0.02,
        }
    }
}

impl ScanConfig {
    /// Load a JSON config file. Missing fields take their default value.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "Loaded scan config");
        Ok(config)
    }

    pub fn with_resize_factor(mut self, factor: f32) -> Self {
        self.resize_factor = factor;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if !self.resize_factor.is_finite() || self.resize_factor <= 0.0 {
            return Err(ScanError::Config(format!(
                "resize_factor must be positive, got {}",
                self.resize_factor
            )));
        }
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(ScanError::Config(format!(
                "blur_kernel_size must be odd, got {}",
                self.blur_kernel_size
            )));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(ScanError::Config(format!(
                "blur_sigma must be positive, got {}",
                self.blur_sigma
            )));
        }
        if self.canny_low < 0.0 || self.canny_low > self.canny_high {
            return Err(ScanError::Config(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {}/{}",
                self.canny_low, self.canny_high
            )));
        }
        if self.dilate_kernel_size == 0 || self.dilate_kernel_size % 2 == 0 {
            return Err(ScanError::Config(format!(
                "dilate_kernel_size must be odd, got {}",
                self.dilate_kernel_size
            )));
        }
        // Chebyshev radius is stored as u8 by imageproc
        if self.dilate_kernel_size / 2 > u8::MAX as u32 {
            return Err(ScanError::Config(format!(
                "dilate_kernel_size too large: {}",
                self.dilate_kernel_size
            )));
        }
        if !(self.epsilon_factor > 0.0 && self.epsilon_factor < 1.0) {
            return Err(ScanError::Config(format!(
                "epsilon_factor must be in (0, 1), got {}",
                self.epsilon_factor
            )));
        }
        Ok(())
    }
}
