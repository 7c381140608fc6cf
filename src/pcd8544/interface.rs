//! Display interface using SPI
use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::pcd8544::error::Error;
use crate::pcd8544::flag::Flag;

/// The connection to one PCD8544: serial channel plus the three control lines
///
/// Every call is one blocking transfer, nothing is buffered.
pub struct DisplayInterface<SPI, DC, RST, LIGHT> {
    /// SPI device, write only
    spi: SPI,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Backlight, the panel lights up while this is LOW
    light: LIGHT,
}

impl<SPI, DC, RST, LIGHT> DisplayInterface<SPI, DC, RST, LIGHT> {
    /// Wrap already configured parts
    pub fn new(spi: SPI, dc: DC, rst: RST, light: LIGHT) -> Self {
        DisplayInterface { spi, dc, rst, light }
    }

    /// Give back the parts
    pub fn release(self) -> (SPI, DC, RST, LIGHT) {
        (self.spi, self.dc, self.rst, self.light)
    }
}

impl<SPI, DC, RST, LIGHT> DisplayInterface<SPI, DC, RST, LIGHT>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    LIGHT: OutputPin,
{
    /// Send command bytes
    pub(crate) fn cmd(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(commands) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command {:02X?}: {:?}", commands, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Send pixel bytes
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi.write(data).map_err(|e| {
            log::error!("SPI write error for {} data bytes: {:?}", data.len(), e);
            DisplayError::BusWriteError
        })
    }

    /// Switch the backlight; the pin is active low so the level is inverted here
    pub(crate) fn set_backlight(&mut self, on: bool) -> Result<(), Error> {
        self.light.set_state((!on).into()).map_err(|e| {
            log::error!("Backlight pin error: {:?}", e);
            Error::Backlight
        })
    }

    /// Pulse RST low, blocking for [`Flag::RESET_HOLD_MS`]
    pub(crate) fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(Flag::RESET_HOLD_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    /// Sums every requested delay
    #[derive(Default)]
    struct TotalDelay(u64);

    impl DelayNs for TotalDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0 += u64::from(ns);
        }
    }

    fn write(bytes: &[u8]) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(bytes.to_vec()),
            SpiTransaction::transaction_end(),
        ]
    }

    struct Parts {
        spi: SpiMock<u8>,
        dc: PinMock,
        rst: PinMock,
        light: PinMock,
    }

    impl Parts {
        fn new(
            spi: &[SpiTransaction<u8>],
            dc: &[PinTransaction],
            rst: &[PinTransaction],
            light: &[PinTransaction],
        ) -> Self {
            Parts {
                spi: SpiMock::new(spi),
                dc: PinMock::new(dc),
                rst: PinMock::new(rst),
                light: PinMock::new(light),
            }
        }

        fn interface(&self) -> DisplayInterface<SpiMock<u8>, PinMock, PinMock, PinMock> {
            DisplayInterface::new(
                self.spi.clone(),
                self.dc.clone(),
                self.rst.clone(),
                self.light.clone(),
            )
        }

        fn done(mut self) {
            self.spi.done();
            self.dc.done();
            self.rst.done();
            self.light.done();
        }
    }

    #[test]
    fn command_pulls_dc_low() {
        let parts = Parts::new(
            &write(&[0x80, 0x40]),
            &[PinTransaction::set(PinState::Low)],
            &[],
            &[],
        );
        parts.interface().cmd(&[0x80, 0x40]).unwrap();
        parts.done();
    }

    #[test]
    fn data_pulls_dc_high() {
        let parts = Parts::new(
            &write(&[0x7e, 0x11, 0x11, 0x11, 0x7e, 0x00]),
            &[PinTransaction::set(PinState::High)],
            &[],
            &[],
        );
        parts
            .interface()
            .data(&[0x7e, 0x11, 0x11, 0x11, 0x7e, 0x00])
            .unwrap();
        parts.done();
    }

    #[test]
    fn backlight_is_active_low() {
        let parts = Parts::new(
            &[],
            &[],
            &[],
            &[
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
        );
        let mut interface = parts.interface();
        interface.set_backlight(true).unwrap();
        interface.set_backlight(false).unwrap();
        parts.done();
    }

    #[test]
    fn reset_holds_line_low_for_100ms() {
        let parts = Parts::new(
            &[],
            &[],
            &[
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
            &[],
        );
        let mut delay = TotalDelay::default();
        parts.interface().reset(&mut delay).unwrap();
        assert!(delay.0 >= 100_000_000, "held for {} ns", delay.0);
        parts.done();
    }

    #[test]
    fn spi_failure_is_bus_write_error() {
        use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

        struct BrokenSpi;

        impl ErrorType for BrokenSpi {
            type Error = ErrorKind;
        }

        impl SpiDevice for BrokenSpi {
            fn transaction(&mut self, _: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
                Err(ErrorKind::Other)
            }
        }

        let mut dc = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut rst = PinMock::new(&[]);
        let mut light = PinMock::new(&[]);
        let mut interface =
            DisplayInterface::new(BrokenSpi, dc.clone(), rst.clone(), light.clone());

        assert!(matches!(
            interface.cmd(&[0x0c]),
            Err(DisplayError::BusWriteError)
        ));
        dc.done();
        rst.done();
        light.done();
    }

    #[test]
    fn backlight_pin_failure_is_reported_as_backlight() {
        use embedded_hal::digital::{ErrorKind, ErrorType};

        struct BrokenPin;

        impl ErrorType for BrokenPin {
            type Error = ErrorKind;
        }

        impl OutputPin for BrokenPin {
            fn set_low(&mut self) -> Result<(), ErrorKind> {
                Err(ErrorKind::Other)
            }

            fn set_high(&mut self) -> Result<(), ErrorKind> {
                Err(ErrorKind::Other)
            }
        }

        let mut spi = SpiMock::<u8>::new(&[]);
        let mut dc = PinMock::new(&[]);
        let mut rst = PinMock::new(&[]);
        let mut interface =
            DisplayInterface::new(spi.clone(), dc.clone(), rst.clone(), BrokenPin);

        assert!(matches!(interface.set_backlight(true), Err(Error::Backlight)));
        assert!(matches!(interface.set_backlight(false), Err(Error::Backlight)));
        spi.done();
        dc.done();
        rst.done();
    }
}
