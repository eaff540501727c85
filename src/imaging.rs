//! Image file decoding and encoding.
//!
//! Converts between JPEG/PNG files and the engine's BGRA byte layout. The
//! engine itself never touches files; this is the collaborator the CLI uses
//! on either side of an editing session.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;

use crate::buffer::{Image, PIXEL_CONTENTS};

/// Errors from reading or writing image files.
#[derive(Debug, Error)]
pub enum ImagingError {
    /// File could not be opened or decoded
    #[error("Failed to open image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// File could not be encoded or written
    #[error("Failed to save image '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Output extension is not JPEG or PNG
    #[error("Unsupported output format for '{}'. Use .jpg, .jpeg or .png", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Output file exists and overwriting was not allowed
    #[error("'{}' already exists. Pass --force to overwrite", .0.display())]
    OutputExists(PathBuf),
}

/// A decoded image in BGRA order, not yet validated by the engine.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub bgra: Vec<u8>,
}

/// Swap the first and third byte of every pixel (RGBA <-> BGRA).
pub fn swap_red_blue(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(PIXEL_CONTENTS) {
        pixel.swap(0, 2);
    }
}

/// Decode an image file into BGRA bytes.
pub fn load_bgra(path: &Path) -> Result<DecodedImage, ImagingError> {
    let decoded = image::open(path).map_err(|source| ImagingError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut bgra = rgba.into_raw();
    swap_red_blue(&mut bgra);

    log::debug!("Decoded {} ({}x{})", path.display(), width, height);
    Ok(DecodedImage {
        width,
        height,
        bgra,
    })
}

/// Encode `image` to `path`, picking JPEG or PNG from the extension.
///
/// JPEG has no alpha channel, so it is dropped on the way out.
pub fn save_bgra(image: &Image, path: &Path, overwrite: bool) -> Result<(), ImagingError> {
    if !overwrite && path.exists() {
        return Err(ImagingError::OutputExists(path.to_path_buf()));
    }

    let format = match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => format,
        _ => return Err(ImagingError::UnsupportedFormat(path.to_path_buf())),
    };

    let mut rgba = image.pixels().as_bytes().to_vec();
    swap_red_blue(&mut rgba);
    let buffer = RgbaImage::from_raw(image.width(), image.height(), rgba)
        .ok_or_else(|| ImagingError::UnsupportedFormat(path.to_path_buf()))?;
    let dynamic = DynamicImage::ImageRgba8(buffer);

    let result = match format {
        ImageFormat::Jpeg => dynamic.to_rgb8().save_with_format(path, format),
        _ => dynamic.save_with_format(path, format),
    };
    result.map_err(|source| ImagingError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Saved {}", path.display());
    Ok(())
}
