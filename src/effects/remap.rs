//! Per-channel color remaps.
//!
//! Zeus, mint, brighter and sketch depend only on each channel's own value and
//! are applied pixel by pixel. Neon, wild west and pattern walk a byte cursor
//! whose writes run ahead of later reads, so they must run in forward order
//! to give the same picture every time.

use crate::buffer::{Image, COLOR_CHANNELS, PIXEL_CONTENTS};
use crate::error::EffectError;

const MAX_RGB_VALUE: i32 = 255;
const MIN_RGB_VALUE: i32 = 0;

/// Offset added before bucketing in zeus
const ZEUS_VALUE: i32 = 100;

/// Offset added before bucketing in mint
const MINT_VALUE: i32 = 1;

/// Brightness step
const BRIGHTER_VALUE: i32 = 5;

/// Offsets of the two neon passes, in order
const NEON_OFFSETS: [i32; 2] = [-100, 70];

/// Shift applied by wild west and pattern
const WRAP_VALUE: i32 = 100;

/// Sketch thresholds: above goes black, below goes white
const SKETCH_HIGH: u8 = 200;
const SKETCH_LOW: u8 = 50;

/// Apply `f` to the blue, green and red bytes of every pixel.
fn map_colors(image: &mut Image, f: impl Fn(u8) -> u8) {
    for pixel in image.pixels_mut().as_bytes_mut().chunks_exact_mut(PIXEL_CONTENTS) {
        for channel in &mut pixel[..COLOR_CHANNELS] {
            *channel = f(*channel);
        }
    }
}

/// Wrap a shifted channel value back into 0..=255.
pub fn wrap_channel(value: i32) -> u8 {
    let wrapped = if value < MIN_RGB_VALUE {
        value + 256
    } else if value > MAX_RGB_VALUE {
        value - 256
    } else {
        value
    };
    wrapped as u8
}

/// Zeus bucket for a single channel.
pub fn zeus_level(channel: u8) -> u8 {
    match i32::from(channel) + ZEUS_VALUE {
        0..=50 => 70,
        51..=100 => 120,
        101..=150 => 170,
        151..=200 => 225,
        _ => 45,
    }
}

/// Mint bucket for a single channel. Levels descend as the input rises.
pub fn mint_level(channel: u8) -> u8 {
    match i32::from(channel) + MINT_VALUE {
        0..=50 => 225,
        51..=100 => 170,
        101..=150 => 120,
        151..=200 => 70,
        _ => 30,
    }
}

/// Brighter step for a single channel. Channels that would overflow are
/// darkened by the same amount instead of clamped.
pub fn brighter_level(channel: u8) -> u8 {
    let raised = i32::from(channel) + BRIGHTER_VALUE;
    if raised > MAX_RGB_VALUE {
        (i32::from(channel) - BRIGHTER_VALUE) as u8
    } else {
        raised as u8
    }
}

/// Sketch threshold for a single channel.
pub fn sketch_level(channel: u8) -> u8 {
    if channel > SKETCH_HIGH {
        0
    } else if channel < SKETCH_LOW {
        255
    } else {
        channel
    }
}

/// Quantize every channel into five bright levels.
pub fn zeus(image: &mut Image) {
    map_colors(image, zeus_level);
}

/// Quantize every channel into five levels, dark inputs becoming light.
pub fn mint(image: &mut Image) {
    map_colors(image, mint_level);
}

/// Raise every channel by five.
pub fn brighter(image: &mut Image) {
    map_colors(image, brighter_level);
}

/// Push the extremes of every channel to the opposite pole.
pub fn sketch(image: &mut Image) {
    map_colors(image, sketch_level);
}

/// Two shifting passes over the bytes following each pixel's blue channel.
///
/// The cursor starts at byte 1 and covers the three bytes after it. A value
/// that would drop below zero takes the next byte instead, one that would
/// exceed 255 takes the previous byte. The last pixel is never visited.
pub fn neon(image: &mut Image) -> Result<(), EffectError> {
    let pixels = image.pixels_mut();
    let end = pixels.len().saturating_sub(PIXEL_CONTENTS);

    for offset in NEON_OFFSETS {
        for base in (1..end).step_by(PIXEL_CONTENTS) {
            let base = base as isize;
            let colors = pixels.read_triple(base)?;

            for (cursor, color) in (base..).zip(colors) {
                let shifted = i32::from(color) + offset;
                let value = if shifted < MIN_RGB_VALUE {
                    pixels.read(cursor + 1)?
                } else if shifted > MAX_RGB_VALUE {
                    pixels.read(cursor - 1)?
                } else {
                    shifted as u8
                };
                pixels.set_color(cursor, value)?;
            }
        }
    }

    Ok(())
}

/// Shift blue, red and green by 100, writing every second byte.
///
/// The channels are read as (blue, red, green) and written to `p`, `p+2` and
/// `p+4`: blue, red, then the following pixel's blue, which that pixel then
/// reads back as its own blue.
pub fn wild_west(image: &mut Image) -> Result<(), EffectError> {
    let pixels = image.pixels_mut();
    let end = pixels.len().saturating_sub(PIXEL_CONTENTS);

    for base in (0..end).step_by(PIXEL_CONTENTS) {
        let base = base as isize;
        let colors = [
            pixels.read(base)?,
            pixels.read(base + 2)?,
            pixels.read(base + 1)?,
        ];

        for (cursor, color) in (base..).step_by(2).zip(colors) {
            pixels.set_color(cursor, wrap_channel(i32::from(color) + WRAP_VALUE))?;
        }
    }

    Ok(())
}

/// Derive each pixel from the three bytes before it, shifted by 100.
///
/// Writes step three bytes at a time (`p`, `p+3`, `p+6`), so they run across
/// pixel boundaries; the middle one always lands on an alpha lane and is
/// dropped. The first pixel has nothing before it and is left alone.
pub fn pattern(image: &mut Image) -> Result<(), EffectError> {
    let pixels = image.pixels_mut();
    let end = pixels.len().saturating_sub(PIXEL_CONTENTS);

    for base in (PIXEL_CONTENTS..end).step_by(PIXEL_CONTENTS) {
        let base = base as isize;
        let colors = pixels.read_triple(base - 3)?;

        for (cursor, color) in (base..).step_by(3).zip(colors) {
            pixels.set_color(cursor, wrap_channel(i32::from(color) + WRAP_VALUE))?;
        }
    }

    Ok(())
}
