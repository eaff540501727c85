//! Melt: drag blocks of pixels up or down the image.

use crate::buffer::{Image, PIXEL_CONTENTS};
use crate::error::EffectError;

/// Which way the melt runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeltDirection {
    Up,
    Down,
}

impl MeltDirection {
    /// Slider moved up for a positive delta; no movement counts as down.
    pub fn from_delta(delta: i32) -> Self {
        if delta > 0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

/// Copy each pixel into the `rows` pixels above or below it.
///
/// The cursor points at the last byte of a pixel. It walks one pixel at a
/// time (forward when melting up, backward when melting down) and, each time
/// a full row width of pixels has been visited, jumps a block of `rows` rows
/// instead of one pixel. Because the walk starts at the end of a row, the
/// blocks drift one row per pass, which gives the ragged drip edge. The walk
/// ends when the cursor leaves the buffer.
///
/// Melting up starts on the last byte of row `rows`, i.e. at
/// `(rows + 1) * stride - 1`. Starting one row higher would put the first
/// copy target `rows` rows above row `rows - 1`, before the start of the
/// buffer, so every upward melt would fail.
pub fn melt(image: &mut Image, direction: MeltDirection, rows: u32) -> Result<(), EffectError> {
    if rows == 0 || rows >= image.height() {
        return Ok(());
    }

    let stride = image.stride() as isize;
    let px = PIXEL_CONTENTS as isize;
    let rows = rows as isize;
    let block = rows * stride;
    let pixels = image.pixels_mut();
    let len = pixels.len() as isize;

    let (mut cursor, step, jump, reach) = match direction {
        MeltDirection::Up => ((rows + 1) * stride - 1, px, block, -stride),
        MeltDirection::Down => (len - block - 1, -px, -block, stride),
    };

    let mut column = 0;
    let mut copied = 0usize;

    while (0..len).contains(&cursor) {
        for k in 1..=rows {
            let target = cursor + reach * k;
            for lane in 0..px {
                let value = pixels.read(cursor - lane)?;
                pixels.set_color(target - lane, value)?;
            }
            copied += 1;
        }

        column += px;
        if column == stride {
            column = 0;
            cursor += jump;
        } else {
            cursor += step;
        }
    }

    log::debug!("melt {:?} by {} rows copied {} pixels", direction, rows, copied);
    Ok(())
}
