//! abstract-fx library crate.
//!
//! A pixel-transform engine for stylized image effects. The engine works on a
//! decoded BGRA buffer ([`buffer::Image`]) owned by an [`session::EffectSession`];
//! decoding and encoding files is left to [`imaging`].

pub mod buffer;
pub mod cli;
pub mod config;
pub mod effects;
pub mod error;
pub mod imaging;
pub mod logger;
pub mod session;
pub mod slider;

pub use buffer::{Image, PixelBuffer};
pub use effects::{Effect, Step};
pub use error::EffectError;
pub use session::EffectSession;
