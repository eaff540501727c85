//! Editing session: the loaded image, its original snapshot, and slider state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::buffer::Image;
use crate::effects::{self, BrushEffect, Effect, MeltDirection, Pattern, Step};
use crate::error::EffectError;
use crate::slider::{magnitude, validate_position, SliderDelta};

/// Holds everything one user editing session needs.
///
/// Effects mutate the current image in place. The original is copied at load
/// time and only ever read back by [`restore_snapshot`](Self::restore_snapshot).
#[derive(Debug)]
pub struct EffectSession {
    image: Option<Image>,
    original: Option<Image>,
    melt: SliderDelta,
    wash: SliderDelta,
    confetti: SliderDelta,
    rng: StdRng,
}

impl Default for EffectSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectSession {
    /// New session with an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// New session whose confetti placement is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            image: None,
            original: None,
            melt: SliderDelta::new(),
            wash: SliderDelta::new(),
            confetti: SliderDelta::new(),
            rng,
        }
    }

    /// Load a decoded BGRA image, replacing any previous one.
    ///
    /// On error the session keeps whatever it held before.
    pub fn load(&mut self, width: u32, height: u32, data: Vec<u8>) -> Result<(), EffectError> {
        let image = Image::new(width, height, data)?;
        self.original = Some(image.clone());
        self.image = Some(image);
        self.reset_sliders();
        log::info!("Loaded {}x{} image", width, height);
        Ok(())
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Current image, for saving or display.
    pub fn image(&self) -> Result<&Image, EffectError> {
        self.image.as_ref().ok_or(EffectError::NoImageLoaded)
    }

    /// Hand the current image over and end the session.
    pub fn into_image(self) -> Result<Image, EffectError> {
        self.image.ok_or(EffectError::NoImageLoaded)
    }

    /// Last recorded positions of the melt, wash and confetti sliders.
    pub fn slider_positions(&self) -> (i32, i32, i32) {
        (self.melt.last(), self.wash.last(), self.confetti.last())
    }

    fn image_mut(&mut self) -> Result<&mut Image, EffectError> {
        self.image.as_mut().ok_or(EffectError::NoImageLoaded)
    }

    fn reset_sliders(&mut self) {
        self.melt.reset();
        self.wash.reset();
        self.confetti.reset();
    }

    /// Run a button effect.
    pub fn apply(&mut self, effect: Effect) -> Result<(), EffectError> {
        let image = self.image_mut()?;
        log::debug!("Applying {}", effect);
        effect.apply(image)
    }

    /// Melt slider moved to `value`.
    ///
    /// Slider methods reject positions outside `0..=99` with
    /// [`EffectError::InvalidSliderPosition`] and leave the slider untouched.
    pub fn melt(&mut self, value: i32) -> Result<(), EffectError> {
        let value = validate_position(value)?;
        let image = self.image.as_mut().ok_or(EffectError::NoImageLoaded)?;
        let direction = MeltDirection::from_delta(self.melt.direction(value));
        effects::melt(image, direction, magnitude(value))
    }

    /// Wash slider moved to `value`. Moving up washes diagonally, otherwise
    /// in a cross.
    pub fn wash(&mut self, value: i32) -> Result<(), EffectError> {
        let value = validate_position(value)?;
        let image = self.image.as_mut().ok_or(EffectError::NoImageLoaded)?;
        let pattern = if self.wash.direction(value) > 0 {
            Pattern::Diagonal
        } else {
            Pattern::Cross
        };
        effects::apply_brush(image, BrushEffect::Wash, pattern)
    }

    /// Confetti slider moved to `value`; stamps one square per step away from rest.
    pub fn confetti(&mut self, value: i32) -> Result<(), EffectError> {
        let value = validate_position(value)?;
        let image = self.image.as_mut().ok_or(EffectError::NoImageLoaded)?;
        self.confetti.direction(value);
        effects::confetti(image, magnitude(value), &mut self.rng)
    }

    /// Put the original pixels back and return the sliders to rest.
    pub fn restore_snapshot(&mut self) -> Result<(), EffectError> {
        let original = self.original.as_ref().ok_or(EffectError::NoImageLoaded)?;
        let image = self.image.as_mut().ok_or(EffectError::NoImageLoaded)?;
        image
            .pixels_mut()
            .as_bytes_mut()
            .copy_from_slice(original.pixels().as_bytes());
        self.reset_sliders();
        log::debug!("Restored original image");
        Ok(())
    }

    /// Replay one user action.
    pub fn run(&mut self, step: Step) -> Result<(), EffectError> {
        match step {
            Step::Effect(effect) => self.apply(effect),
            Step::Melt(value) => self.melt(value),
            Step::Wash(value) => self.wash(value),
            Step::Confetti(value) => self.confetti(value),
            Step::Reset => self.restore_snapshot(),
        }
    }
}
