//! Pin definitions for the PCD8544 display
//!
//! Defaults match the usual Raspberry Pi wiring of a Nokia 5110 breakout, BCM numbering.

/// Default pin assignment, BCM GPIO numbers
pub struct Pins;

impl Pins {
    /// Serial clock
    pub const CLK: u8 = 11;
    /// Serial data in (MOSI)
    pub const DIN: u8 = 10;
    /// Data/Command control pin (High for data, Low for command)
    pub const DC: u8 = 22;
    /// Reset pin for display
    pub const RST: u8 = 24;
    /// Backlight, active low
    pub const LIGHT: u8 = 18;
    /// Chip enable, active low
    pub const CE: u8 = 8;
}

/// Contrast (Vop register value) used unless configured otherwise
pub const DEFAULT_CONTRAST: u8 = 0xB0;

/// Wiring and startup settings for one display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Serial clock pin
    pub clock: u8,
    /// Serial data pin
    pub data: u8,
    /// Data/command select pin
    pub data_command: u8,
    /// Reset pin
    pub reset: u8,
    /// Backlight pin
    pub backlight: u8,
    /// Chip enable pin
    pub chip_enable: u8,
    /// Contrast applied during initialization
    pub contrast: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clock: Pins::CLK,
            data: Pins::DIN,
            data_command: Pins::DC,
            reset: Pins::RST,
            backlight: Pins::LIGHT,
            chip_enable: Pins::CE,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl Config {
    /// Every pin the driver claims, in the order they are set up
    pub fn pins(&self) -> [u8; 6] {
        [
            self.clock,
            self.data,
            self.data_command,
            self.reset,
            self.backlight,
            self.chip_enable,
        ]
    }

    /// Same wiring with a different contrast
    pub const fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }
}
