//! Neighbor brush engine.
//!
//! Every interior pixel is compared with a few of its neighbours. When a
//! neighbour is close enough in color, one of the brush mutations runs. The
//! mutations write through a cursor that starts at the pixel and may be moved
//! by each match, so a match changes where the next neighbour's mutation
//! lands. That drift is what gives zombie, strié, diamond, dust and metal
//! their look.

use std::fmt;

use crate::buffer::{Image, PixelBuffer, COLOR_CHANNELS, PIXEL_CONTENTS};
use crate::error::EffectError;

/// Largest per-channel difference for two pixels to count as similar
pub const SIMILARITY_RANGE: i32 = 15;

/// Cursor moves performed between the three copies of a dust match
pub const DUST_HOPS: [isize; 3] = [4, -20, 8];

/// Mutation applied when a neighbour is similar to the center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushEffect {
    /// Center takes the neighbour's color
    Wash,
    /// Like wash, cursor creeps forward one byte per match
    Zombie,
    /// Neighbour takes the center's color, cursor skips two pixels per match
    Strie,
    /// Neighbour takes the center's color, cursor creeps forward one byte per match
    Diamond,
    /// Chained copies smearing color across several pixels
    Dust,
    /// Center takes the neighbour's color with channels rotated, cursor steps back
    Metal,
}

impl BrushEffect {
    /// Net cursor movement caused by one match.
    pub fn cursor_advance(self) -> isize {
        match self {
            Self::Wash => 0,
            Self::Zombie => 1,
            Self::Strie => 8,
            Self::Diamond => 1,
            Self::Dust => DUST_HOPS.iter().sum(),
            Self::Metal => -5,
        }
    }

    /// Run this mutation for one similar neighbour and move the cursor.
    pub fn stamp(
        self,
        pixels: &mut PixelBuffer,
        cursor: &mut isize,
        neighbor: isize,
    ) -> Result<(), EffectError> {
        match self {
            Self::Wash => {
                pixels.copy_triple(neighbor, *cursor)?;
            }
            Self::Zombie => {
                pixels.copy_triple(neighbor, *cursor)?;
                *cursor += 1;
            }
            Self::Strie => {
                pixels.copy_triple(*cursor, neighbor)?;
                *cursor += 8;
            }
            Self::Diamond => {
                pixels.copy_triple(*cursor, neighbor)?;
                *cursor += 1;
            }
            Self::Dust => {
                let [forward, back, resume] = DUST_HOPS;
                pixels.copy_triple(neighbor, *cursor)?;
                *cursor += forward;
                pixels.copy_triple(*cursor, neighbor)?;
                *cursor += back;
                pixels.copy_triple(*cursor, neighbor)?;
                *cursor += resume;
            }
            Self::Metal => {
                // blue <- green, green <- red, red <- blue
                let blue = pixels.read(neighbor + 1)?;
                pixels.set_color(*cursor, blue)?;
                let green = pixels.read(neighbor + 2)?;
                pixels.set_color(*cursor + 1, green)?;
                let red = pixels.read(neighbor)?;
                pixels.set_color(*cursor + 2, red)?;
                *cursor -= 5;
            }
        }
        Ok(())
    }
}

impl fmt::Display for BrushEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wash => write!(f, "wash"),
            Self::Zombie => write!(f, "zombie"),
            Self::Strie => write!(f, "strie"),
            Self::Diamond => write!(f, "diamond"),
            Self::Dust => write!(f, "dust"),
            Self::Metal => write!(f, "metal"),
        }
    }
}

/// Which neighbours of a pixel are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Top, right, bottom, left
    Cross,
    /// Bottom-left, top-right
    Diagonal,
}

impl Pattern {
    /// Push the byte indices of the sampled neighbours of `center` into `out`.
    pub fn collect_neighbors(self, center: isize, stride: isize, out: &mut Vec<isize>) {
        let px = PIXEL_CONTENTS as isize;
        match self {
            Self::Cross => {
                out.push(center - stride);
                out.push(center + px);
                out.push(center + stride);
                out.push(center - px);
            }
            Self::Diagonal => {
                out.push(center + stride - px);
                out.push(center - stride + px);
            }
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cross => write!(f, "cross"),
            Self::Diagonal => write!(f, "diagonal"),
        }
    }
}

/// True when every color channel of `neighbor` is within
/// [`SIMILARITY_RANGE`] of `center`.
fn is_similar(
    pixels: &PixelBuffer,
    neighbor: isize,
    center: [u8; COLOR_CHANNELS],
) -> Result<bool, EffectError> {
    let sample = pixels.read_triple(neighbor)?;
    Ok(sample
        .iter()
        .zip(center)
        .all(|(&n, c)| (i32::from(n) - i32::from(c)).abs() <= SIMILARITY_RANGE))
}

/// Run `effect` over every interior pixel, sampling neighbours with `pattern`.
///
/// The center color is sampled once per pixel before its neighbours are
/// visited; neighbour colors are read at comparison time and so reflect
/// earlier matches.
pub fn apply_brush(
    image: &mut Image,
    effect: BrushEffect,
    pattern: Pattern,
) -> Result<(), EffectError> {
    let stride = image.stride() as isize;
    let px = PIXEL_CONTENTS as isize;
    let total_rows = image.height().saturating_sub(2);
    let pixels = image.pixels_mut();

    let mut row_start = stride + px;
    let mut row_end = stride * 2 - px;
    let mut neighbors = Vec::with_capacity(4);
    let mut matches = 0usize;

    for _ in 0..total_rows {
        for base in (row_start..row_end).step_by(PIXEL_CONTENTS) {
            pattern.collect_neighbors(base, stride, &mut neighbors);
            let center = pixels.read_triple(base)?;
            let mut cursor = base;

            for &neighbor in &neighbors {
                if is_similar(pixels, neighbor, center)? {
                    effect.stamp(pixels, &mut cursor, neighbor)?;
                    matches += 1;
                }
            }

            neighbors.clear();
        }

        row_start += stride;
        row_end += stride;
    }

    log::debug!("{} brush ({}) matched {} neighbours", effect, pattern, matches);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Image {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let v = ((x * 40 + y * 7) % 256) as u8;
                data.extend_from_slice(&[v, v / 2, 255 - v, 255]);
            }
        }
        Image::new(width, height, data).unwrap()
    }

    #[test]
    fn test_cursor_advance_per_effect() {
        assert_eq!(BrushEffect::Wash.cursor_advance(), 0);
        assert_eq!(BrushEffect::Zombie.cursor_advance(), 1);
        assert_eq!(BrushEffect::Strie.cursor_advance(), 8);
        assert_eq!(BrushEffect::Diamond.cursor_advance(), 1);
        assert_eq!(BrushEffect::Dust.cursor_advance(), -8);
        assert_eq!(BrushEffect::Metal.cursor_advance(), -5);
    }

    #[test]
    fn test_stamp_moves_cursor_by_advance() {
        let effects = [
            BrushEffect::Wash,
            BrushEffect::Zombie,
            BrushEffect::Strie,
            BrushEffect::Diamond,
            BrushEffect::Dust,
            BrushEffect::Metal,
        ];
        for effect in effects {
            let mut image = Image::filled(8, 8, [9, 9, 9, 255]).unwrap();
            let start = image.pixel_index(4, 4) as isize;
            let neighbor = image.pixel_index(4, 3) as isize;
            let mut cursor = start;
            effect.stamp(image.pixels_mut(), &mut cursor, neighbor).unwrap();
            assert_eq!(cursor - start, effect.cursor_advance(), "{}", effect);
        }
    }

    #[test]
    fn test_wash_copies_neighbor_into_center() {
        let mut pixels = PixelBuffer::from_bytes(vec![1, 2, 3, 255, 7, 8, 9, 255]);
        let mut cursor = 0;
        BrushEffect::Wash.stamp(&mut pixels, &mut cursor, 4).unwrap();
        assert_eq!(pixels.as_bytes(), &[7, 8, 9, 255, 7, 8, 9, 255]);
    }

    #[test]
    fn test_diamond_copies_center_into_neighbor() {
        let mut pixels = PixelBuffer::from_bytes(vec![1, 2, 3, 255, 7, 8, 9, 255]);
        let mut cursor = 0;
        BrushEffect::Diamond.stamp(&mut pixels, &mut cursor, 4).unwrap();
        assert_eq!(pixels.as_bytes(), &[1, 2, 3, 255, 1, 2, 3, 255]);
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_zombie_second_match_is_misaligned() {
        let mut pixels = PixelBuffer::from_bytes(vec![1, 2, 3, 255, 7, 8, 9, 255]);
        let mut cursor = 0;
        BrushEffect::Zombie.stamp(&mut pixels, &mut cursor, 4).unwrap();
        BrushEffect::Zombie.stamp(&mut pixels, &mut cursor, 4).unwrap();
        // Second copy lands on bytes 1..=3; the alpha byte is kept
        assert_eq!(pixels.as_bytes(), &[7, 7, 8, 255, 7, 8, 9, 255]);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_metal_rotates_channels() {
        let mut pixels = PixelBuffer::from_bytes(vec![0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30, 255]);
        let mut cursor = 4;
        BrushEffect::Metal.stamp(&mut pixels, &mut cursor, 8).unwrap();
        assert_eq!(&pixels.as_bytes()[4..8], &[20, 30, 10, 255]);
        assert_eq!(cursor, -1);
    }

    #[test]
    fn test_dust_smears_across_pixels() {
        // Seven pixels, center at pixel 5 (byte 20), neighbour pixel 6 (byte 24)
        let mut data = Vec::new();
        for i in 0..7u8 {
            data.extend_from_slice(&[i * 10, i * 10, i * 10, 255]);
        }
        let mut pixels = PixelBuffer::from_bytes(data);
        let mut cursor = 20;
        BrushEffect::Dust.stamp(&mut pixels, &mut cursor, 24).unwrap();

        let bytes = pixels.as_bytes();
        // center <- neighbour (60)
        assert_eq!(&bytes[20..24], &[60, 60, 60, 255]);
        // neighbour <- pixel at cursor 24 (itself), then <- pixel at cursor 4 (10)
        assert_eq!(&bytes[24..28], &[10, 10, 10, 255]);
        assert_eq!(cursor, 12);
    }

    #[test]
    fn test_metal_fails_past_buffer_start() {
        let mut pixels = PixelBuffer::from_bytes(vec![0; 16]);
        let mut cursor = -1;
        assert_eq!(
            BrushEffect::Metal.stamp(&mut pixels, &mut cursor, 4),
            Err(EffectError::IndexOutOfRange { index: -1, len: 16 })
        );
    }

    #[test]
    fn test_collect_neighbors() {
        let mut out = Vec::new();
        Pattern::Cross.collect_neighbors(100, 40, &mut out);
        assert_eq!(out, vec![60, 104, 140, 96]);
        out.clear();
        Pattern::Diagonal.collect_neighbors(100, 40, &mut out);
        assert_eq!(out, vec![136, 64]);
    }

    #[test]
    fn test_uniform_image_is_unchanged() {
        let effects = [
            BrushEffect::Wash,
            BrushEffect::Zombie,
            BrushEffect::Strie,
            BrushEffect::Diamond,
            BrushEffect::Dust,
            BrushEffect::Metal,
        ];
        for effect in effects {
            for pattern in [Pattern::Cross, Pattern::Diagonal] {
                // Opaque white: misaligned cursors that pick up an alpha byte
                // still copy the same value
                let mut image = Image::filled(16, 12, [255, 255, 255, 255]).unwrap();
                let before = image.clone();
                apply_brush(&mut image, effect, pattern).unwrap();
                assert_eq!(image, before, "{} {}", effect, pattern);
            }
        }
    }

    #[test]
    fn test_uniform_gray_unchanged_by_aligned_reads() {
        let effects = [
            BrushEffect::Wash,
            BrushEffect::Zombie,
            BrushEffect::Strie,
            BrushEffect::Dust,
            BrushEffect::Metal,
        ];
        for effect in effects {
            let mut image = Image::filled(16, 12, [40, 40, 40, 255]).unwrap();
            let before = image.clone();
            apply_brush(&mut image, effect, Pattern::Cross).unwrap();
            assert_eq!(image, before, "{}", effect);
        }
    }

    #[test]
    fn test_dissimilar_neighbours_are_left_alone() {
        // Checkerboard of black and white: nothing is ever similar
        let mut data = Vec::new();
        for y in 0..6u32 {
            for x in 0..6u32 {
                let v = if (x + y) % 2 == 0 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let mut image = Image::new(6, 6, data).unwrap();
        let before = image.clone();
        apply_brush(&mut image, BrushEffect::Wash, Pattern::Cross).unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_wash_spreads_similar_color() {
        // Single slightly different pixel in a flat field gets washed over
        let mut image = Image::filled(6, 6, [100, 100, 100, 255]).unwrap();
        let center = image.pixel_index(2, 2);
        image.pixels_mut().set(center, 110).unwrap();
        apply_brush(&mut image, BrushEffect::Wash, Pattern::Cross).unwrap();
        assert_eq!(image.pixel(2, 2), Some([100, 100, 100, 255]));
    }

    #[test]
    fn test_strie_runs_off_narrow_image() {
        // On a 4 pixel wide flat image strié jumps 8 bytes per match and
        // eventually reads past the last row
        let mut image = Image::filled(4, 4, [5, 5, 5, 255]).unwrap();
        let result = apply_brush(&mut image, BrushEffect::Strie, Pattern::Cross);
        assert!(matches!(result, Err(EffectError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_alpha_never_changes() {
        let mut image = gradient(20, 20);
        for effect in [BrushEffect::Zombie, BrushEffect::Diamond, BrushEffect::Metal] {
            apply_brush(&mut image, effect, Pattern::Diagonal).unwrap();
        }
        assert!(image
            .pixels()
            .as_bytes()
            .chunks_exact(4)
            .all(|pixel| pixel[3] == 255));
    }
}
