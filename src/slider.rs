//! Slider position bookkeeping for the slider-driven effects.

use crate::error::EffectError;

/// Resting position of every slider.
pub const SLIDER_DEFAULT_VALUE: i32 = 49;

/// Highest position a slider can take (positions run from 0).
pub const SLIDER_MAX_VALUE: i32 = 99;

/// Tracks the last position of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderDelta {
    last: i32,
}

impl Default for SliderDelta {
    fn default() -> Self {
        Self {
            last: SLIDER_DEFAULT_VALUE,
        }
    }
}

impl SliderDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last position seen.
    pub fn last(&self) -> i32 {
        self.last
    }

    /// Signed distance moved since the last call, recording `value` as the new position.
    ///
    /// Positive means the slider moved up.
    pub fn direction(&mut self, value: i32) -> i32 {
        let delta = value.saturating_sub(self.last);
        self.last = value;
        delta
    }

    /// Back to the resting position.
    pub fn reset(&mut self) {
        self.last = SLIDER_DEFAULT_VALUE;
    }
}

/// Check that `value` is a position a slider can take.
pub fn validate_position(value: i32) -> Result<i32, EffectError> {
    if (0..=SLIDER_MAX_VALUE).contains(&value) {
        Ok(value)
    } else {
        Err(EffectError::InvalidSliderPosition { value })
    }
}

/// Absolute distance of `value` from the resting position.
pub fn magnitude(value: i32) -> u32 {
    value.abs_diff(SLIDER_DEFAULT_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tracks_last_value() {
        let mut slider = SliderDelta::new();
        assert_eq!(slider.direction(60), 11);
        assert_eq!(slider.last(), 60);
        assert_eq!(slider.direction(55), -5);
        assert_eq!(slider.direction(55), 0);
    }

    #[test]
    fn test_direction_saturates_on_extreme_values() {
        let mut slider = SliderDelta::new();
        assert_eq!(slider.direction(i32::MIN), i32::MIN);
        assert_eq!(slider.direction(i32::MAX), i32::MAX);
        assert_eq!(slider.last(), i32::MAX);
    }

    #[test]
    fn test_validate_position() {
        assert_eq!(validate_position(0), Ok(0));
        assert_eq!(validate_position(SLIDER_MAX_VALUE), Ok(99));
        assert_eq!(
            validate_position(100),
            Err(EffectError::InvalidSliderPosition { value: 100 })
        );
        assert_eq!(
            validate_position(i32::MIN),
            Err(EffectError::InvalidSliderPosition { value: i32::MIN })
        );
    }

    #[test]
    fn test_magnitude_is_symmetric() {
        assert_eq!(magnitude(49), 0);
        assert_eq!(magnitude(0), 49);
        assert_eq!(magnitude(99), 50);
        assert_eq!(magnitude(40), 9);
        assert_eq!(magnitude(58), 9);
    }

    #[test]
    fn test_reset_restores_baseline() {
        let mut slider = SliderDelta::new();
        slider.direction(10);
        slider.reset();
        assert_eq!(slider.last(), SLIDER_DEFAULT_VALUE);
    }
}
