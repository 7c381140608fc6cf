//! Driver for the PCD8544 84x48 monochrome LCD (Nokia 5110) with a 5x7 text renderer.
//!
//! See [`pcd8544`] for the protocol details.

pub mod pcd8544;

pub use crate::pcd8544::backend::{configure, GpioBackend};
pub use crate::pcd8544::bitbang::BitBangSpi;
pub use crate::pcd8544::driver::{open, Pcd8544, Position};
pub use crate::pcd8544::error::{
    Axis, BackendError, DisplayError, Error, RangeError, ShutdownError,
};
pub use crate::pcd8544::font::{Font, Glyph, FONT_5X7};
pub use crate::pcd8544::interface::DisplayInterface;
pub use crate::pcd8544::pins::{Config, Pins, DEFAULT_CONTRAST};

#[cfg(feature = "rpi")]
pub use crate::pcd8544::backend::RppalBackend;
