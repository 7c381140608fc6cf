//! PCD8544 Display Driver Implementation
//!
//! The driver owns one initialized panel. It is created by [`Pcd8544::new`] (or
//! [`open`]), which resets the controller, programs the contrast and clears
//! the RAM, so a handle that exists is always ready to draw.
//!
//! ## Addressing
//!
//! The RAM pointer is set with two command bytes, `0x80 | bank` followed by
//! `0x40 + segment`. After that every data byte lands in the current segment and the
//! controller advances the segment on its own. The driver remembers only the last
//! position it set explicitly; it does not follow the auto-increment, so after any
//! error the caller should position again before drawing.
//!
//! ## Text
//!
//! Characters are drawn on a 14x6 grid. Each cell is 6 segments wide: 5 glyph
//! columns and one blank spacing column.
//!
//! ## Validation
//!
//! Everything that can be checked up front (positions, row overflow) is checked before
//! the first byte goes out. A character missing from the font is only noticed when it
//! is reached, so the characters before it stay on screen.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::pcd8544::backend::{self, BackendSpi, GpioBackend};
use crate::pcd8544::error::{Axis, Error, RangeError, ShutdownError};
use crate::pcd8544::font::{Font, Glyph, GLYPH_WIDTH};
use crate::pcd8544::interface::DisplayInterface;
use crate::pcd8544::pins::Config;
use crate::pcd8544::{cmd::Cmd, flag::Flag, BANKS, BUFFER_SIZE, CHAR_WIDTH, COLUMNS, ROWS, WIDTH};

/// A RAM address of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Pixel column, 0..84
    pub segment: u8,
    /// Group of 8 pixel rows, 0..6
    pub bank: u8,
}

/// PCD8544 LCD Driver
///
/// ## Type Parameters
///
/// - `SPI` - SPI device for communication
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `LIGHT` - Backlight output pin (active low)
pub struct Pcd8544<SPI, DC, RST, LIGHT> {
    interface: DisplayInterface<SPI, DC, RST, LIGHT>,
    contrast: u8,
    backlight: Option<bool>,
    position: Position,
}

/// Claim the pins of `config` from `backend` and initialize the panel
///
/// `spi_delay` paces the serial clock, `delay` serves the reset pulse.
pub fn open<B, DELAY>(
    backend: &mut B,
    config: &Config,
    spi_delay: DELAY,
    delay: &mut impl DelayNs,
) -> Result<Pcd8544<BackendSpi<B, DELAY>, B::Output, B::Output, B::Output>, Error>
where
    B: GpioBackend,
    DELAY: DelayNs,
{
    let interface = backend::configure(backend, config, spi_delay)?;
    Pcd8544::new(interface, config.contrast, delay)
}

impl<SPI, DC, RST, LIGHT> Pcd8544<SPI, DC, RST, LIGHT>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    LIGHT: OutputPin,
{
    /// Reset and initialize the display: reset pulse, contrast, blank RAM
    ///
    /// The backlight pin is left alone.
    pub fn new(
        interface: DisplayInterface<SPI, DC, RST, LIGHT>,
        contrast: u8,
        delay: &mut impl DelayNs,
    ) -> Result<Self, Error> {
        let mut pcd8544 = Pcd8544 {
            interface,
            contrast,
            backlight: None,
            position: Position::default(),
        };
        pcd8544.init(delay)?;
        Ok(pcd8544)
    }

    fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        log::info!("Initializing PCD8544, contrast 0x{:02X}", self.contrast);

        // Hardware reset first, the controller RAM and registers are undefined before it
        self.interface.reset(delay)?;
        self.set_contrast(self.contrast)?;
        self.clear()?;

        log::info!("PCD8544 ready");
        Ok(())
    }

    /// Command sequence programming the operating voltage and returning to normal mode
    fn contrast_sequence(value: u8) -> [u8; 5] {
        [
            Cmd::FUNCTION_SET | Flag::FUNCTION_EXTENDED,
            Cmd::BIAS_SYSTEM | Flag::BIAS_1_48,
            value,
            Cmd::FUNCTION_SET | Flag::FUNCTION_BASIC,
            Cmd::DISPLAY_CONTROL | Flag::DISPLAY_NORMAL,
        ]
    }

    /// Set the contrast (Vop register), any value is accepted
    pub fn set_contrast(&mut self, value: u8) -> Result<(), Error> {
        log::debug!("Setting contrast to 0x{:02X}", value);
        self.interface.cmd(&Self::contrast_sequence(value))?;
        self.contrast = value;
        Ok(())
    }

    /// Turn the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        log::debug!("Backlight {}", if on { "on" } else { "off" });
        self.interface.set_backlight(on)?;
        self.backlight = Some(on);
        Ok(())
    }

    /// Point the RAM address at `segment` (0..84) in `bank` (0..6)
    pub fn set_position(&mut self, segment: u8, bank: u8) -> Result<(), Error> {
        RangeError::check(Axis::Segment, segment.into(), WIDTH.into())?;
        RangeError::check(Axis::Bank, bank.into(), BANKS.into())?;
        self.write_position(Position { segment, bank })
    }

    /// Move to text cell `col` (0..14) of text row `row` (0..6)
    pub fn locate(&mut self, row: u8, col: u8) -> Result<(), Error> {
        let target = Self::cell(row, col)?;
        self.write_position(target)
    }

    /// Blank the whole RAM and return to the top left corner
    pub fn clear(&mut self) -> Result<(), Error> {
        log::debug!("Clearing {} bytes of display RAM", BUFFER_SIZE);
        self.write_position(Position::default())?;
        self.interface.data(&[0x00; BUFFER_SIZE])?;
        self.write_position(Position::default())
    }

    /// Draw `text` starting at text cell (`row`, `col`)
    ///
    /// The text has to fit the rest of the row; it never wraps. Fails with
    /// [`Error::UnsupportedCharacter`] at the first character `font` has no glyph for,
    /// leaving the preceding characters drawn.
    pub fn draw_text(&mut self, text: &str, font: &Font, row: u8, col: u8) -> Result<(), Error> {
        let start = Self::cell(row, col)?;
        let end = usize::from(start.segment) + text.chars().count() * usize::from(CHAR_WIDTH);
        RangeError::check_end(Axis::Segment, end, WIDTH.into())?;

        log::debug!("Drawing {:?} at row {}, column {}", text, row, col);
        self.write_position(start)?;
        for c in text.chars() {
            let glyph = font.glyph(c).ok_or(Error::UnsupportedCharacter(c))?;
            self.write_glyph(glyph)?;
        }
        Ok(())
    }

    /// Write raw column bytes starting at `segment` in `bank`
    ///
    /// Every byte is one 8 pixel column, bit 0 on top. The run must end on the
    /// same bank.
    pub fn draw_bitmap(&mut self, columns: &[u8], segment: u8, bank: u8) -> Result<(), Error> {
        RangeError::check(Axis::Segment, segment.into(), WIDTH.into())?;
        RangeError::check(Axis::Bank, bank.into(), BANKS.into())?;
        RangeError::check_end(
            Axis::Segment,
            usize::from(segment) + columns.len(),
            WIDTH.into(),
        )?;

        self.write_position(Position { segment, bank })?;
        if !columns.is_empty() {
            self.interface.data(columns)?;
        }
        Ok(())
    }

    /// Put the controller into power-down mode, RAM contents are kept
    pub fn power_down(&mut self) -> Result<(), Error> {
        log::info!("Powering down display");
        self.interface
            .cmd(&[Cmd::FUNCTION_SET | Flag::FUNCTION_POWER_DOWN])?;
        Ok(())
    }

    /// Leave power-down mode, restoring the last contrast
    pub fn wake(&mut self) -> Result<(), Error> {
        log::info!("Waking up display");
        self.set_contrast(self.contrast)
    }

    /// Switch the backlight off and hand back the bus
    ///
    /// The bus comes back inside the error as well, see [`ShutdownError::into_interface`].
    pub fn shutdown(
        mut self,
    ) -> Result<
        DisplayInterface<SPI, DC, RST, LIGHT>,
        ShutdownError<DisplayInterface<SPI, DC, RST, LIGHT>>,
    > {
        log::info!("Shutting down display");
        match self.set_backlight(false) {
            Ok(()) => Ok(self.interface),
            Err(error) => Err(ShutdownError::new(error, self.interface)),
        }
    }

    /// Last contrast sent to the controller
    pub fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Backlight state, `None` until it was first set
    pub fn backlight(&self) -> Option<bool> {
        self.backlight
    }

    /// Last position set explicitly, the controller may have moved on since
    pub fn position(&self) -> Position {
        self.position
    }

    /// Hand back the bus without touching the panel
    pub fn release(self) -> DisplayInterface<SPI, DC, RST, LIGHT> {
        self.interface
    }

    fn cell(row: u8, col: u8) -> Result<Position, RangeError> {
        RangeError::check(Axis::Row, row.into(), ROWS.into())?;
        RangeError::check(Axis::Column, col.into(), COLUMNS.into())?;
        Ok(Position {
            segment: col * CHAR_WIDTH,
            bank: row,
        })
    }

    fn write_position(&mut self, position: Position) -> Result<(), Error> {
        log::debug!(
            "Position: segment {}, bank {}",
            position.segment,
            position.bank
        );
        self.interface.cmd(&[
            Cmd::SET_BANK | position.bank,
            Cmd::SET_SEGMENT + position.segment,
        ])?;
        self.position = position;
        Ok(())
    }

    fn write_glyph(&mut self, glyph: &Glyph) -> Result<(), Error> {
        let mut cell = [0x00; GLYPH_WIDTH + 1];
        cell[..GLYPH_WIDTH].copy_from_slice(glyph);
        self.interface.data(&cell)?;
        Ok(())
    }
}
