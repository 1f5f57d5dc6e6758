//! PNG output for raster artwork.
//!
//! Writes rendered images to PNG files with optional integer scaling.

use std::path::Path;

use image::{ImageBuffer, RgbImage};

use crate::error::{ArtError, Result};

/// Write a rendered image to a PNG file.
///
/// # Arguments
///
/// * `image` - The rendered artwork
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(image: &RgbImage, path: &Path, scale: u32) -> Result<()> {
    let scaled;
    let image = if scale > 1 {
        scaled = upscale(image, scale);
        &scaled
    } else {
        image
    };

    image.save(path).map_err(|e| ArtError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Scale an image by an integer factor.
///
/// Uses nearest-neighbour scaling so cell edges stay crisp.
pub fn upscale(image: &RgbImage, scale: u32) -> RgbImage {
    if scale <= 1 {
        return image.clone();
    }

    let width = image.width() * scale;
    let height = image.height() * scale;

    ImageBuffer::from_fn(width, height, |x, y| *image.get_pixel(x / scale, y / scale))
}
