//! Effect catalog.
//!
//! Effects fall into four families:
//!
//! 1. **Color remaps** - per-channel transforms ([`remap`])
//! 2. **Brushes** - neighbour-similarity smearing ([`brush`])
//! 3. **Melt** - vertical block drag driven by a slider ([`melt`])
//! 4. **Confetti** - random square stamping driven by a slider ([`confetti`])
//!
//! Button effects are named by [`Effect`]; a replayed user action, button or
//! slider, is a [`Step`].

pub mod brush;
pub mod confetti;
pub mod melt;
pub mod remap;

use std::fmt;
use std::str::FromStr;

pub use brush::{apply_brush, BrushEffect, Pattern, SIMILARITY_RANGE};
pub use confetti::{confetti, confetti_side};
pub use melt::{melt, MeltDirection};
pub use remap::{brighter, mint, neon, pattern, sketch, wild_west, wrap_channel, zeus};

use crate::buffer::Image;
use crate::error::EffectError;
use crate::slider::SLIDER_MAX_VALUE;

/// A one-shot effect triggered by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Quantize colors into five bright levels
    Zeus,
    /// Quantize colors into five inverted levels
    Mint,
    /// Raise every channel by five
    Brighter,
    /// Shift channels in two passes for neon colors
    Neon,
    /// Wrap-around color shift on alternate bytes
    WildWest,
    /// Wrap-around shift taken from the previous pixel
    Pattern,
    /// Push extremes to the opposite pole
    Sketch,
    /// Pale smear, cross neighbours
    Zombie,
    /// Sideways streaks, cross neighbours
    Strie,
    /// Few-color diamond pattern, cross neighbours
    Diamond,
    /// Windblown dust, diagonal neighbours
    Dust,
    /// Neon lines with gray flakes, diagonal neighbours
    NeonMetal,
}

impl Effect {
    /// Every button effect, in menu order.
    pub const ALL: [Effect; 12] = [
        Effect::Zeus,
        Effect::Mint,
        Effect::Brighter,
        Effect::Neon,
        Effect::WildWest,
        Effect::Pattern,
        Effect::Sketch,
        Effect::Zombie,
        Effect::Strie,
        Effect::Diamond,
        Effect::Dust,
        Effect::NeonMetal,
    ];

    /// Parse effect name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "zeus" => Some(Self::Zeus),
            "mint" => Some(Self::Mint),
            "brighter" => Some(Self::Brighter),
            "neon" => Some(Self::Neon),
            "wild_west" | "wildwest" | "wild-west" => Some(Self::WildWest),
            "pattern" => Some(Self::Pattern),
            "sketch" => Some(Self::Sketch),
            "zombie" => Some(Self::Zombie),
            "strie" | "strié" => Some(Self::Strie),
            "diamond" => Some(Self::Diamond),
            "dust" => Some(Self::Dust),
            "neon_metal" | "neonmetal" | "neon-metal" | "metal" => Some(Self::NeonMetal),
            _ => None,
        }
    }

    /// Short description for listings
    pub fn description(self) -> &'static str {
        match self {
            Self::Zeus => "quantize colors into five bright levels",
            Self::Mint => "quantize colors into five levels, dark becomes light",
            Self::Brighter => "raise every channel by five",
            Self::Neon => "two shifting passes for neon colors",
            Self::WildWest => "wrap-around color shift on alternate bytes",
            Self::Pattern => "wrap-around shift taken from the previous pixel",
            Self::Sketch => "push dark and light extremes to the opposite pole",
            Self::Zombie => "pale smear of similar neighbours",
            Self::Strie => "spread colors sideways into streaks",
            Self::Diamond => "reduce colors into a diamond pattern",
            Self::Dust => "smear colors like dust in the wind",
            Self::NeonMetal => "neon lines with gray flakes",
        }
    }

    /// Brush and neighbour pattern, for the effects run by the brush engine.
    pub fn brush(self) -> Option<(BrushEffect, Pattern)> {
        match self {
            Self::Zombie => Some((BrushEffect::Zombie, Pattern::Cross)),
            Self::Strie => Some((BrushEffect::Strie, Pattern::Cross)),
            Self::Diamond => Some((BrushEffect::Diamond, Pattern::Cross)),
            Self::Dust => Some((BrushEffect::Dust, Pattern::Diagonal)),
            Self::NeonMetal => Some((BrushEffect::Metal, Pattern::Diagonal)),
            _ => None,
        }
    }

    /// Run this effect on `image`.
    pub fn apply(self, image: &mut Image) -> Result<(), EffectError> {
        match self {
            Self::Zeus => zeus(image),
            Self::Mint => mint(image),
            Self::Brighter => brighter(image),
            Self::Sketch => sketch(image),
            Self::Neon => neon(image)?,
            Self::WildWest => wild_west(image)?,
            Self::Pattern => pattern(image)?,
            Self::Zombie => apply_brush(image, BrushEffect::Zombie, Pattern::Cross)?,
            Self::Strie => apply_brush(image, BrushEffect::Strie, Pattern::Cross)?,
            Self::Diamond => apply_brush(image, BrushEffect::Diamond, Pattern::Cross)?,
            Self::Dust => apply_brush(image, BrushEffect::Dust, Pattern::Diagonal)?,
            Self::NeonMetal => apply_brush(image, BrushEffect::Metal, Pattern::Diagonal)?,
        }
        Ok(())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zeus => write!(f, "zeus"),
            Self::Mint => write!(f, "mint"),
            Self::Brighter => write!(f, "brighter"),
            Self::Neon => write!(f, "neon"),
            Self::WildWest => write!(f, "wild-west"),
            Self::Pattern => write!(f, "pattern"),
            Self::Sketch => write!(f, "sketch"),
            Self::Zombie => write!(f, "zombie"),
            Self::Strie => write!(f, "strie"),
            Self::Diamond => write!(f, "diamond"),
            Self::Dust => write!(f, "dust"),
            Self::NeonMetal => write!(f, "neon-metal"),
        }
    }
}

/// One replayed user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Button effect
    Effect(Effect),
    /// Melt slider moved to this position
    Melt(i32),
    /// Wash slider moved to this position
    Wash(i32),
    /// Confetti slider moved to this position
    Confetti(i32),
    /// Reset button
    Reset,
}

impl FromStr for Step {
    type Err = String;

    /// Parse `name` or `slider=position`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((name, value)) = s.split_once('=') {
            let position: i32 = value
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a valid slider position", value))?;
            if !(0..=SLIDER_MAX_VALUE).contains(&position) {
                return Err(format!(
                    "Slider position must be between 0 and {}, got {}",
                    SLIDER_MAX_VALUE, position
                ));
            }
            return match name.trim().to_lowercase().as_str() {
                "melt" => Ok(Self::Melt(position)),
                "wash" => Ok(Self::Wash(position)),
                "confetti" => Ok(Self::Confetti(position)),
                other => Err(format!(
                    "Unknown slider '{}'. Available sliders: melt, wash, confetti",
                    other
                )),
            };
        }

        if s.eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }

        Effect::parse(s).map(Self::Effect).ok_or_else(|| {
            format!(
                "Unknown effect '{}'. Run `abstract-fx list-effects` to see available effects",
                s
            )
        })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Effect(effect) => write!(f, "{}", effect),
            Self::Melt(position) => write!(f, "melt={}", position),
            Self::Wash(position) => write!(f, "wash={}", position),
            Self::Confetti(position) => write!(f, "confetti={}", position),
            Self::Reset => write!(f, "reset"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_parse_aliases() {
        assert_eq!(Effect::parse("zeus"), Some(Effect::Zeus));
        assert_eq!(Effect::parse("Wild-West"), Some(Effect::WildWest));
        assert_eq!(Effect::parse("wild_west"), Some(Effect::WildWest));
        assert_eq!(Effect::parse("strié"), Some(Effect::Strie));
        assert_eq!(Effect::parse("metal"), Some(Effect::NeonMetal));
        assert_eq!(Effect::parse("wash"), None);
        assert_eq!(Effect::parse("bogus"), None);
    }

    #[test]
    fn test_effect_display_round_trips_through_parse() {
        for effect in Effect::ALL {
            assert_eq!(Effect::parse(&effect.to_string()), Some(effect));
        }
    }

    #[test]
    fn test_brush_assignment() {
        assert_eq!(
            Effect::NeonMetal.brush(),
            Some((BrushEffect::Metal, Pattern::Diagonal))
        );
        assert_eq!(
            Effect::Strie.brush(),
            Some((BrushEffect::Strie, Pattern::Cross))
        );
        assert_eq!(Effect::Zeus.brush(), None);
    }

    #[test]
    fn test_apply_runs_the_listed_brush() {
        let data: Vec<u8> = (0..24u32 * 24)
            .flat_map(|i| {
                let v = (i % 24 * 3 + i / 24 * 2) as u8;
                [v, v / 2 + 40, 200 - v / 3, 255]
            })
            .collect();
        let source = Image::new(24, 24, data).unwrap();

        let mut brushes = 0;
        for effect in Effect::ALL {
            let Some((brush, pattern)) = effect.brush() else {
                continue;
            };
            brushes += 1;

            let mut applied = source.clone();
            effect.apply(&mut applied).unwrap();
            let mut expected = source.clone();
            apply_brush(&mut expected, brush, pattern).unwrap();
            assert_eq!(applied, expected, "{}", effect);
            assert_ne!(applied, source, "{} left the image unchanged", effect);
        }
        assert_eq!(brushes, 5);
    }

    #[test]
    fn test_step_parse() {
        assert_eq!("zeus".parse::<Step>(), Ok(Step::Effect(Effect::Zeus)));
        assert_eq!("melt=70".parse::<Step>(), Ok(Step::Melt(70)));
        assert_eq!(" Wash = 10 ".parse::<Step>(), Ok(Step::Wash(10)));
        assert_eq!("confetti=99".parse::<Step>(), Ok(Step::Confetti(99)));
        assert_eq!("RESET".parse::<Step>(), Ok(Step::Reset));
    }

    #[test]
    fn test_step_parse_errors() {
        assert!("melt=100".parse::<Step>().is_err());
        assert!("melt=-1".parse::<Step>().is_err());
        assert!("melt=high".parse::<Step>().is_err());
        assert!("blur=10".parse::<Step>().unwrap_err().contains("Unknown slider"));
        assert!("blur".parse::<Step>().unwrap_err().contains("Unknown effect"));
    }

    #[test]
    fn test_zeus_on_black_image() {
        let mut image = Image::filled(4, 4, [0, 0, 0, 255]).unwrap();
        Effect::Zeus.apply(&mut image).unwrap();
        for pixel in image.pixels().as_bytes().chunks_exact(4) {
            assert_eq!(pixel, &[120, 120, 120, 255]);
        }
    }
}
