//! Error types for the effect engine.

use thiserror::Error;

use crate::buffer::{MAX_IMAGE_SIZE, MIN_IMAGE_SIZE};
use crate::slider::SLIDER_MAX_VALUE;

/// Errors that can occur while loading an image or running an effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
    /// Image dimensions outside the supported range
    #[error(
        "Image must be between {min} and {max} pixels on each side, got {width}x{height}",
        min = MIN_IMAGE_SIZE,
        max = MAX_IMAGE_SIZE
    )]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel byte count does not match the image dimensions
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// An effect was invoked before any image was loaded
    #[error("No image loaded. Open an image first.")]
    NoImageLoaded,

    /// Slider moved to a position it cannot take
    #[error(
        "Slider position must be between 0 and {max}, got {value}",
        max = SLIDER_MAX_VALUE
    )]
    InvalidSliderPosition { value: i32 },

    /// A cursor left the pixel buffer
    #[error("Pixel index {index} is outside the buffer (length {len})")]
    IndexOutOfRange { index: isize, len: usize },
}
