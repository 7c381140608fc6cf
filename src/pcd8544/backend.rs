//! GPIO backends
//!
//! A backend hands out output pins by number. [`configure`] turns those pins into
//! a ready [`DisplayInterface`] on top of a [`BitBangSpi`] channel.
use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::pcd8544::bitbang::BitBangSpi;
use crate::pcd8544::error::{BackendError, Error};
use crate::pcd8544::interface::DisplayInterface;
use crate::pcd8544::pins::Config;

/// Source of GPIO output pins
pub trait GpioBackend {
    /// Pin type handed out by this backend
    type Output: OutputPin;

    /// Claim the GPIO peripheral, called once before any pin is requested
    fn setup_gpio(&mut self) -> Result<(), BackendError>;

    /// Configure `pin` (BCM number) as a push-pull output
    fn output_pin(&mut self, pin: u8) -> Result<Self::Output, BackendError>;
}

/// Bit-banged channel built from backend pins
pub type BackendSpi<B, DELAY> = BitBangSpi<
    <B as GpioBackend>::Output,
    <B as GpioBackend>::Output,
    <B as GpioBackend>::Output,
    DELAY,
>;

/// Bus adapter built from backend pins
pub type BackendInterface<B, DELAY> = DisplayInterface<
    BackendSpi<B, DELAY>,
    <B as GpioBackend>::Output,
    <B as GpioBackend>::Output,
    <B as GpioBackend>::Output,
>;

/// Claim every pin of `config` as output and wire them into a bus adapter
///
/// The chip enable, data and clock lines make up the serial channel; data/command,
/// reset and backlight stay plain outputs. Nothing is written to the panel.
pub fn configure<B, DELAY>(
    backend: &mut B,
    config: &Config,
    delay: DELAY,
) -> Result<BackendInterface<B, DELAY>, Error>
where
    B: GpioBackend,
    DELAY: DelayNs,
{
    log::info!("Setting up GPIO for PCD8544, pins {:?}", config.pins());
    backend.setup_gpio()?;

    let clk = backend.output_pin(config.clock)?;
    let din = backend.output_pin(config.data)?;
    let dc = backend.output_pin(config.data_command)?;
    let rst = backend.output_pin(config.reset)?;
    let light = backend.output_pin(config.backlight)?;
    let ce = backend.output_pin(config.chip_enable)?;

    let spi = BitBangSpi::new(ce, din, clk, delay);
    Ok(DisplayInterface::new(spi, dc, rst, light))
}

#[cfg(feature = "rpi")]
pub use self::rpi::RppalBackend;

#[cfg(feature = "rpi")]
mod rpi {
    use rppal::gpio::{Gpio, OutputPin};

    use super::GpioBackend;
    use crate::pcd8544::error::BackendError;

    /// Raspberry Pi GPIO through `/dev/gpiomem`
    #[derive(Default)]
    pub struct RppalBackend {
        gpio: Option<Gpio>,
    }

    impl RppalBackend {
        /// Backend that has not touched the hardware yet
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl GpioBackend for RppalBackend {
        type Output = OutputPin;

        fn setup_gpio(&mut self) -> Result<(), BackendError> {
            let gpio = Gpio::new().map_err(|e| BackendError::Gpio(e.to_string()))?;
            self.gpio = Some(gpio);
            Ok(())
        }

        fn output_pin(&mut self, pin: u8) -> Result<OutputPin, BackendError> {
            let gpio = self
                .gpio
                .as_ref()
                .ok_or_else(|| BackendError::Gpio("setup_gpio was not called".into()))?;
            let pin_out = gpio
                .get(pin)
                .map_err(|e| BackendError::Pin {
                    pin,
                    reason: e.to_string(),
                })?
                .into_output();
            Ok(pin_out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::SpiDevice;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::collections::HashMap;

    /// Hands out pin mocks and records what was asked for
    #[derive(Default)]
    struct MockBackend {
        gpio_fails: bool,
        refused: Option<u8>,
        ready: bool,
        pins: HashMap<u8, PinMock>,
        claimed: Vec<u8>,
    }

    impl MockBackend {
        fn expect(&mut self, pin: u8, transactions: &[PinTransaction]) -> PinMock {
            let mock = PinMock::new(transactions);
            self.pins.insert(pin, mock.clone());
            mock
        }

        fn done(&mut self) {
            for pin in self.pins.values_mut() {
                pin.done();
            }
        }
    }

    impl GpioBackend for MockBackend {
        type Output = PinMock;

        fn setup_gpio(&mut self) -> Result<(), BackendError> {
            if self.gpio_fails {
                return Err(BackendError::Gpio("permission denied".into()));
            }
            self.ready = true;
            Ok(())
        }

        fn output_pin(&mut self, pin: u8) -> Result<PinMock, BackendError> {
            assert!(self.ready, "pin requested before setup_gpio");
            if self.refused == Some(pin) {
                return Err(BackendError::Pin {
                    pin,
                    reason: "in use".into(),
                });
            }
            self.claimed.push(pin);
            Ok(self
                .pins
                .entry(pin)
                .or_insert_with(|| PinMock::new(&[]))
                .clone())
        }
    }

    #[test]
    fn claims_every_configured_pin() {
        let mut backend = MockBackend::default();
        let interface = configure(&mut backend, &Config::default(), NoopDelay::new()).unwrap();
        assert_eq!(backend.claimed, vec![11, 10, 22, 24, 18, 8]);

        drop(interface);
        backend.done();
    }

    #[test]
    fn gpio_failure_is_bus_init_error() {
        let mut backend = MockBackend {
            gpio_fails: true,
            ..Default::default()
        };
        let err = configure(&mut backend, &Config::default(), NoopDelay::new())
            .err()
            .unwrap();
        assert!(matches!(err, Error::BusInit(BackendError::Gpio(_))));
        assert!(backend.claimed.is_empty());
    }

    #[test]
    fn refused_pin_is_bus_init_error() {
        let mut backend = MockBackend {
            refused: Some(24),
            ..Default::default()
        };
        let err = configure(&mut backend, &Config::default(), NoopDelay::new())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::BusInit(BackendError::Pin { pin: 24, .. })
        ));
        assert_eq!(backend.claimed, vec![11, 10, 22]);
        backend.done();
    }

    #[test]
    fn serial_lines_follow_configuration() {
        let config = Config {
            clock: 2,
            data: 3,
            chip_enable: 4,
            ..Config::default()
        };
        let mut backend = MockBackend::default();
        backend.expect(
            4,
            &[
                PinTransaction::set(PinState::Low),
                PinTransaction::set(PinState::High),
            ],
        );
        // 0x80: only the first bit is set
        let mut bits = vec![PinTransaction::set(PinState::High)];
        bits.extend((0..7).map(|_| PinTransaction::set(PinState::Low)));
        backend.expect(3, &bits);
        let pulses: Vec<_> = (0..8)
            .flat_map(|_| {
                [
                    PinTransaction::set(PinState::High),
                    PinTransaction::set(PinState::Low),
                ]
            })
            .collect();
        backend.expect(2, &pulses);

        let interface = configure(&mut backend, &config, NoopDelay::new()).unwrap();
        let (mut spi, _dc, _rst, _light) = interface.release();
        spi.write(&[0x80]).unwrap();

        drop(spi);
        backend.done();
    }
}
