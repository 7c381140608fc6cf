//! Bit-banged serial channel
//!
//! Write-only SPI mode 0 over three plain GPIO outputs. CE is pulled low for the
//! duration of a transaction, bytes are shifted out MSB first, the panel samples
//! DIN on the rising edge of CLK. Every clock phase is held for 125 ns, which keeps
//! fast GPIO below the 4 MHz limit of the panel.
use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{self, ErrorKind, ErrorType, Operation, SpiDevice},
};

use crate::pcd8544::flag::Flag;

/// Failure of the software SPI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBangError {
    /// One of the GPIO writes failed
    Pin,
    /// Reads are impossible, the channel has no MISO line
    WriteOnly,
}

impl spi::Error for BitBangError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// [`SpiDevice`] that toggles GPIO lines instead of using a SPI peripheral
pub struct BitBangSpi<CE, DIN, CLK, DELAY> {
    ce: CE,
    din: DIN,
    clk: CLK,
    delay: DELAY,
}

impl<CE, DIN, CLK, DELAY> BitBangSpi<CE, DIN, CLK, DELAY>
where
    CE: OutputPin,
    DIN: OutputPin,
    CLK: OutputPin,
    DELAY: DelayNs,
{
    /// Take over the three lines, only [`spi::MODE_0`] is supported
    pub fn new(ce: CE, din: DIN, clk: CLK, delay: DELAY) -> Self {
        BitBangSpi {
            ce,
            din,
            clk,
            delay,
        }
    }

    /// Give back the pins and the delay
    pub fn release(self) -> (CE, DIN, CLK, DELAY) {
        (self.ce, self.din, self.clk, self.delay)
    }

    fn shift_out(&mut self, byte: u8) -> Result<(), BitBangError> {
        for bit in (0..8).rev() {
            let level = (byte >> bit) & 1 == 1;
            self.din.set_state(level.into()).map_err(|_| BitBangError::Pin)?;
            self.delay.delay_ns(Flag::CLOCK_HALF_PERIOD_NS);
            self.clk.set_high().map_err(|_| BitBangError::Pin)?;
            self.delay.delay_ns(Flag::CLOCK_HALF_PERIOD_NS);
            self.clk.set_low().map_err(|_| BitBangError::Pin)?;
            self.delay.delay_ns(Flag::CLOCK_HALF_PERIOD_NS);
        }
        Ok(())
    }

    fn run(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), BitBangError> {
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        self.shift_out(byte)?;
                    }
                }
                Operation::DelayNs(ns) => self.delay.delay_ns(*ns),
                Operation::Read(_) | Operation::Transfer(..) | Operation::TransferInPlace(_) => {
                    return Err(BitBangError::WriteOnly)
                }
            }
        }
        Ok(())
    }
}

impl<CE, DIN, CLK, DELAY> ErrorType for BitBangSpi<CE, DIN, CLK, DELAY> {
    type Error = BitBangError;
}

impl<CE, DIN, CLK, DELAY> SpiDevice for BitBangSpi<CE, DIN, CLK, DELAY>
where
    CE: OutputPin,
    DIN: OutputPin,
    CLK: OutputPin,
    DELAY: DelayNs,
{
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        self.ce.set_low().map_err(|_| BitBangError::Pin)?;
        let result = self.run(operations);
        // deselect even after a failed shift so the panel resyncs on the next frame
        let deselect = self.ce.set_high().map_err(|_| BitBangError::Pin);
        result.and(deselect)
    }
}
