//! Error types of the driver
use core::fmt;

pub use display_interface::DisplayError;

/// Everything that can go wrong talking to the display
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The GPIO subsystem or one of the pins could not be claimed
    #[error("failed to initialize the display bus: {0}")]
    BusInit(#[from] BackendError),
    /// A D/C or reset write, or a serial transfer failed; the cursor position is unknown
    /// afterwards
    #[error("display transfer failed: {0:?}")]
    Transfer(DisplayError),
    /// Position or draw region outside the 84x48 panel, nothing was written
    #[error(transparent)]
    Range(#[from] RangeError),
    /// The backlight pin could not be driven
    #[error("failed to switch the backlight")]
    Backlight,
    /// The font has no glyph for this character
    #[error("no glyph for character {0:?}")]
    UnsupportedCharacter(char),
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Transfer(e)
    }
}

/// Failure reported by a [`crate::pcd8544::backend::GpioBackend`]
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The GPIO peripheral itself is unavailable
    #[error("GPIO subsystem unavailable: {0}")]
    Gpio(String),
    /// A single pin could not be configured as output
    #[error("GPIO {pin} could not be claimed: {reason}")]
    Pin {
        /// BCM pin number
        pin: u8,
        /// Backend description of the failure
        reason: String,
    },
}

/// [`crate::Pcd8544::shutdown`] failed, the bus `I` is handed back regardless
pub struct ShutdownError<I> {
    error: Error,
    interface: I,
}

impl<I> ShutdownError<I> {
    pub(crate) fn new(error: Error, interface: I) -> Self {
        ShutdownError { error, interface }
    }

    /// What went wrong
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Take the bus back, dropping the error
    pub fn into_interface(self) -> I {
        self.interface
    }

    /// Split into the error and the bus
    pub fn into_parts(self) -> (Error, I) {
        (self.error, self.interface)
    }
}

impl<I> fmt::Debug for ShutdownError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<I> fmt::Display for ShutdownError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "display shutdown failed: {}", self.error)
    }
}

impl<I> std::error::Error for ShutdownError<I> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Which coordinate was out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal pixel column, 0..84
    Segment,
    /// Vertical 8 pixel bank, 0..6
    Bank,
    /// Text row, 0..6
    Row,
    /// Text column, 0..14
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Segment => write!(f, "segment"),
            Axis::Bank => write!(f, "bank"),
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// A request that does not fit the display grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{axis} {value} out of range, limit is {limit}")]
pub struct RangeError {
    /// Offending coordinate
    pub axis: Axis,
    /// Requested value; for a run of bytes or characters, where the run would end
    pub value: usize,
    /// First value that is no longer valid
    pub limit: usize,
}

impl RangeError {
    /// Ok when `value < limit`
    pub(crate) fn check(axis: Axis, value: usize, limit: usize) -> Result<(), RangeError> {
        if value < limit {
            Ok(())
        } else {
            Err(RangeError { axis, value, limit })
        }
    }

    /// Ok when a run ending (exclusive) at `end` still fits below `limit`
    pub(crate) fn check_end(axis: Axis, end: usize, limit: usize) -> Result<(), RangeError> {
        if end <= limit {
            Ok(())
        } else {
            Err(RangeError {
                axis,
                value: end,
                limit,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_bounds() {
        assert!(RangeError::check(Axis::Segment, 83, 84).is_ok());
        assert_eq!(
            RangeError::check(Axis::Segment, 84, 84),
            Err(RangeError {
                axis: Axis::Segment,
                value: 84,
                limit: 84
            })
        );
        assert!(RangeError::check_end(Axis::Column, 84, 84).is_ok());
        assert!(RangeError::check_end(Axis::Column, 85, 84).is_err());
    }

    #[test]
    fn error_messages() {
        let err = Error::from(RangeError {
            axis: Axis::Bank,
            value: 6,
            limit: 6,
        });
        assert_eq!(err.to_string(), "bank 6 out of range, limit is 6");
        assert_eq!(
            Error::UnsupportedCharacter('é').to_string(),
            "no glyph for character 'é'"
        );
        assert_eq!(
            Error::from(DisplayError::BusWriteError).to_string(),
            "display transfer failed: BusWriteError"
        );
        assert_eq!(
            Error::Backlight.to_string(),
            "failed to switch the backlight"
        );
        let err = Error::from(BackendError::Pin {
            pin: 22,
            reason: "busy".into(),
        });
        assert_eq!(
            err.to_string(),
            "failed to initialize the display bus: GPIO 22 could not be claimed: busy"
        );
    }

    #[test]
    fn shutdown_error_keeps_the_interface() {
        use std::error::Error as _;

        let err = ShutdownError::new(Error::Backlight, "bus");
        assert_eq!(
            err.to_string(),
            "display shutdown failed: failed to switch the backlight"
        );
        assert_eq!(
            format!("{:?}", err),
            "ShutdownError { error: Backlight, .. }"
        );
        assert!(err.source().is_some());
        assert!(matches!(err.error(), Error::Backlight));
        let (error, bus) = err.into_parts();
        assert!(matches!(error, Error::Backlight));
        assert_eq!(bus, "bus");
    }
}
