//! Binary raster input
//!
//! A row-major grid of foreground/background pixels. Built from plain pixel
//! data or from any image the `image` crate can decode, thresholded to two
//! levels. Rows run top to bottom, columns left to right.

use crate::error::{CamToolError, CamToolResult};
use galvokit_core::WaypointError;
use image::{GrayImage, Luma};
use std::path::Path;

/// Two-level pixel grid used as raster engraving input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRaster {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl BinaryRaster {
    /// Build from rows of intensities. Nonzero pixels are foreground.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, WaypointError> {
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut pixels = Vec::with_capacity(width * rows.len());

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(WaypointError::InvalidRaster {
                    row,
                    reason: format!("expected {} pixels, found {}", width, values.len()),
                });
            }
            pixels.extend(values.iter().map(|&v| v != 0));
        }

        Ok(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    /// Build from a flat row-major buffer. Nonzero pixels are foreground.
    pub fn from_pixels(width: usize, height: usize, data: &[u8]) -> Result<Self, WaypointError> {
        if data.len() != width * height {
            return Err(WaypointError::InvalidRaster {
                row: if width == 0 { 0 } else { data.len() / width },
                reason: format!(
                    "buffer of {} pixels does not match {}x{}",
                    data.len(),
                    width,
                    height
                ),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: data.iter().map(|&v| v != 0).collect(),
        })
    }

    /// Threshold a grayscale image: pixels brighter than `threshold` are
    /// foreground, or background when `invert` is set.
    pub fn from_gray_image(image: &GrayImage, threshold: u8, invert: bool) -> Self {
        let pixels = image
            .pixels()
            .map(|&Luma([v])| (v > threshold) != invert)
            .collect();

        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            pixels,
        }
    }

    /// Load and threshold an image file
    pub fn open<P: AsRef<Path>>(path: P, threshold: u8, invert: bool) -> CamToolResult<Self> {
        let path = path.as_ref();
        let gray = image::open(path)
            .map_err(|source| CamToolError::LoadError {
                path: path.display().to_string(),
                source,
            })?
            .to_luma8();

        tracing::debug!(
            "Loaded raster {} ({}x{}, threshold {})",
            path.display(),
            gray.width(),
            gray.height(),
            threshold
        );
        Ok(Self::from_gray_image(&gray, threshold, invert))
    }

    /// Reduce resolution by an integer factor.
    ///
    /// Each `factor x factor` block is averaged; only a fully foreground block
    /// stays foreground. Partial blocks at the right and bottom edges are
    /// dropped.
    pub fn downsample(&self, factor: u32) -> Result<Self, WaypointError> {
        if factor == 0 {
            return Err(WaypointError::invalid_scale("downsample_factor", 0.0));
        }
        if factor == 1 {
            return Ok(self.clone());
        }

        let f = factor as usize;
        let width = self.width / f;
        let height = self.height / f;
        let block_area = f * f;
        let mut pixels = Vec::with_capacity(width * height);

        for by in 0..height {
            for bx in 0..width {
                let lit = (0..f)
                    .flat_map(|dy| (0..f).map(move |dx| (bx * f + dx, by * f + dy)))
                    .filter(|&(x, y)| self.get(x, y))
                    .count();
                pixels.push(lit == block_area);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Foreground state of the pixel at (col, row); out of range is background
    pub fn get(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.pixels[row * self.width + col]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of foreground pixels
    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Render back to an 8-bit image (foreground 255, background 0)
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Luma([if self.get(x as usize, y as usize) { 255 } else { 0 }])
        })
    }
}
