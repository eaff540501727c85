//! Confetti: stamp random squares of color onto the image.

use rand::Rng;

use crate::buffer::Image;
use crate::error::EffectError;

/// Pixels per unit of confetti area. Keeps the squares in proportion with the
/// image regardless of its size.
pub const CONFETTI_PROPORTION: f64 = 14899.0;

/// Side length, in pixels, of one confetti square for an image of this size.
pub fn confetti_side(width: u32, height: u32) -> u32 {
    let total = f64::from(width) * f64::from(height);
    ((total / CONFETTI_PROPORTION).sqrt() as u32).max(1)
}

/// Stamp `count` confetti squares.
///
/// Each square takes the color of a random pixel and covers the
/// `side × side` block whose top-left corner is that pixel. Candidates are kept
/// `side` pixels clear of the left and top edges and leave room for a whole
/// square to their right and below, so no square crosses a row boundary.
///
/// A side-1 square is just the chosen pixel recolored with itself, so confetti
/// leaves images of up to about 244×244 pixels unchanged.
pub fn confetti<R: Rng + ?Sized>(
    image: &mut Image,
    count: u32,
    rng: &mut R,
) -> Result<(), EffectError> {
    let side = confetti_side(image.width(), image.height());
    if image.width() <= side * 2 || image.height() <= side * 2 {
        log::warn!(
            "{}x{} image too small for {}px confetti",
            image.width(),
            image.height(),
            side
        );
        return Ok(());
    }

    for _ in 0..count {
        let x = rng.gen_range(side..image.width() - side);
        let y = rng.gen_range(side..image.height() - side);
        let origin = image.pixel_index(x, y) as isize;
        let color = image.pixels().read_triple(origin)?;

        for row in 0..side {
            for col in 0..side {
                let cell = image.pixel_index(x + col, y + row) as isize;
                for (lane, &value) in color.iter().enumerate() {
                    image.pixels_mut().set_color(cell + lane as isize, value)?;
                }
            }
        }
    }

    log::debug!("stamped {} confetti squares of side {}", count, side);
    Ok(())
}
