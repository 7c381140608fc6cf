//! PCD8544 LCD Driver
//!
//! Used in the Nokia 5110 / 3310 84x48 monochrome modules, wired to a Raspberry Pi
//! and clocked by bit-banging GPIO lines.
//!
//! ### Addressing
//! The controller RAM is organised in 6 banks of 8 pixel rows. Each data byte fills
//! one column of one bank (bit 0 on top), after which the controller moves on to the
//! next segment by itself, wrapping into the next bank after segment 83.
//!
//! ### Usage
//! 1. build a [`interface::DisplayInterface`], either by hand from `embedded-hal`
//!    parts or through [`backend::configure`]
//! 1. hand it to [`driver::Pcd8544::new`], which resets the panel, sets the contrast
//!    and clears the screen
//! 1. draw text with [`driver::Pcd8544::draw_text`] using [`font::FONT_5X7`]
//!
#![deny(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod backend;
pub mod bitbang;
pub mod driver;
pub mod error;
pub mod font;
pub mod interface;
pub mod pins;

pub(crate) mod cmd;
pub(crate) mod flag;

/// Display width, pixels horizontally (segments)
pub const WIDTH: u8 = 84;

/// Display height, pixels vertically
pub const HEIGHT: u8 = 48;

/// Pixel rows covered by one data byte
pub const BANK_HEIGHT: u8 = 8;

/// Number of banks (text rows)
pub const BANKS: u8 = HEIGHT / BANK_HEIGHT;

/// Horizontal advance of one character: glyph plus one blank spacing column
pub const CHAR_WIDTH: u8 = font::GLYPH_WIDTH as u8 + 1;

/// Character cells per text row
pub const COLUMNS: u8 = WIDTH / CHAR_WIDTH;

/// Text rows, one per bank
pub const ROWS: u8 = BANKS;

/// Bytes of display RAM, one per segment per bank
pub const BUFFER_SIZE: usize = WIDTH as usize * HEIGHT as usize / BANK_HEIGHT as usize;

const _: () = assert!(
    (WIDTH as usize * HEIGHT as usize) % BANK_HEIGHT as usize == 0,
    "frame must be a whole number of bank bytes"
);
const _: () = assert!(HEIGHT % BANK_HEIGHT == 0);
