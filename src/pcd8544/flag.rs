/// Flags and constants used with the PCD8544 instruction set.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Function set (0x20) flags
    pub const FUNCTION_EXTENDED: u8 = 0x01; // H=1, extended instruction set
    pub const FUNCTION_BASIC: u8 = 0x00; // H=0
    pub const FUNCTION_POWER_DOWN: u8 = 0x04; // PD=1, chip is powered down

    // Bias system (0x10) flags
    pub const BIAS_1_48: u8 = 0x04; // BS=100, 1:48 mux rate

    // Display control (0x08) flags
    pub const DISPLAY_NORMAL: u8 = 0x04;

    // Hardware reset, RST held low for at least this long
    pub const RESET_HOLD_MS: u32 = 100;

    // SCLK runs at 4 MHz at most, high and low phases each need 100 ns
    pub const CLOCK_HALF_PERIOD_NS: u32 = 125;
}
