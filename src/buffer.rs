//! BGRA pixel storage with bounds-checked cursor access.
//!
//! Every effect works on a flat, row-major byte buffer with four bytes per
//! pixel: blue, green, red, alpha. Effects address it through a signed byte
//! cursor, so that arithmetic which strays outside the image is reported as
//! [`EffectError::IndexOutOfRange`] instead of touching a neighbouring pixel
//! row or wrapping around.

use crate::error::EffectError;

/// Bytes per pixel (blue, green, red, alpha)
pub const PIXEL_CONTENTS: usize = 4;

/// Color channels per pixel (alpha excluded)
pub const COLOR_CHANNELS: usize = 3;

/// Offset of the alpha byte within a pixel
pub const ALPHA_LANE: usize = 3;

/// Smallest accepted width or height
pub const MIN_IMAGE_SIZE: u32 = 4;

/// Largest accepted width or height. Larger images slow the brush passes down considerably.
pub const MAX_IMAGE_SIZE: u32 = 1500;

/// Owned BGRA byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Read the byte at `index`.
    pub fn get(&self, index: usize) -> Result<u8, EffectError> {
        self.data
            .get(index)
            .copied()
            .ok_or(EffectError::IndexOutOfRange {
                index: index as isize,
                len: self.data.len(),
            })
    }

    /// Write `value` at `index`, alpha lanes included.
    pub fn set(&mut self, index: usize, value: u8) -> Result<(), EffectError> {
        let len = self.data.len();
        let slot = self.data.get_mut(index).ok_or(EffectError::IndexOutOfRange {
            index: index as isize,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Read the byte under a signed cursor.
    pub fn read(&self, cursor: isize) -> Result<u8, EffectError> {
        let index = self.resolve(cursor)?;
        Ok(self.data[index])
    }

    /// Write a color byte under a signed cursor.
    ///
    /// The cursor is bounds-checked like [`read`](Self::read). When it lands on
    /// an alpha lane the write is dropped, so effects whose cursor drifts off
    /// pixel alignment never change transparency.
    pub fn set_color(&mut self, cursor: isize, value: u8) -> Result<(), EffectError> {
        let index = self.resolve(cursor)?;
        if index % PIXEL_CONTENTS != ALPHA_LANE {
            self.data[index] = value;
        }
        Ok(())
    }

    /// Read three consecutive bytes starting at `cursor`.
    pub fn read_triple(&self, cursor: isize) -> Result<[u8; COLOR_CHANNELS], EffectError> {
        Ok([
            self.read(cursor)?,
            self.read(cursor + 1)?,
            self.read(cursor + 2)?,
        ])
    }

    /// Copy three consecutive bytes from `from` to `to`, one byte at a time in
    /// ascending order. Overlapping ranges therefore see their own writes.
    pub fn copy_triple(&mut self, from: isize, to: isize) -> Result<(), EffectError> {
        for lane in 0..COLOR_CHANNELS as isize {
            let value = self.read(from + lane)?;
            self.set_color(to + lane, value)?;
        }
        Ok(())
    }

    fn resolve(&self, cursor: isize) -> Result<usize, EffectError> {
        usize::try_from(cursor)
            .ok()
            .filter(|&index| index < self.data.len())
            .ok_or(EffectError::IndexOutOfRange {
                index: cursor,
                len: self.data.len(),
            })
    }
}

/// A decoded image held by the engine.
///
/// Fields are private so the pixel buffer always holds exactly
/// `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    /// BGRA pixel data, row-major
    pixels: PixelBuffer,
}

impl Image {
    /// Build an image from decoded BGRA bytes.
    ///
    /// Dimensions are checked before the byte count, so an oversized image is
    /// reported as such even when its buffer is also wrong.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, EffectError> {
        validate_dimensions(width, height)?;

        let expected = width as usize * height as usize * PIXEL_CONTENTS;
        if data.len() != expected {
            return Err(EffectError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels: PixelBuffer::from_bytes(data),
        })
    }

    /// Build an image where every pixel has the same BGRA value.
    pub fn filled(width: u32, height: u32, bgra: [u8; PIXEL_CONTENTS]) -> Result<Self, EffectError> {
        validate_dimensions(width, height)?;
        let data = bgra.repeat(width as usize * height as usize);
        Self::new(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Effects write through this; the buffer's length never changes.
    pub(crate) fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * PIXEL_CONTENTS
    }

    /// Byte index of the blue channel of pixel (`x`, `y`).
    pub fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * PIXEL_CONTENTS
    }

    /// BGRA value of pixel (`x`, `y`), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; PIXEL_CONTENTS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.pixel_index(x, y);
        let mut bgra = [0u8; PIXEL_CONTENTS];
        bgra.copy_from_slice(&self.pixels.as_bytes()[start..start + PIXEL_CONTENTS]);
        Some(bgra)
    }
}

/// Check that both sides are within [`MIN_IMAGE_SIZE`]..=[`MAX_IMAGE_SIZE`].
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), EffectError> {
    let valid = MIN_IMAGE_SIZE..=MAX_IMAGE_SIZE;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(())
    } else {
        Err(EffectError::InvalidDimensions { width, height })
    }
}
