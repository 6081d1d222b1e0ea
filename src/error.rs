use core::fmt;

use crate::level::MAX_STEP;

/// Error returned while driving the IC.
///
/// `E` is the error type of the output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError<E> {
    /// Requested level is above [`MAX_STEP`]. Nothing was written to the line.
    InvalidTarget(i32),
    /// Writing to the output line failed.
    Line(E),
}

impl<E: fmt::Debug> fmt::Display for DriverError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(target) => {
                write!(f, "brightness {} is out of range 0..={}", target, MAX_STEP)
            }
            Self::Line(err) => write!(f, "failed to drive level line: {:?}", err),
        }
    }
}

/// Error returned when the device can't be attached.
///
/// `C` is the line provider's claim error, `E` the line's write error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError<C, E> {
    /// The output line could not be claimed.
    LineUnavailable(C),
    /// The configuration has no default level.
    MissingDefaultLevel,
    /// Applying the default level failed.
    Driver(DriverError<E>),
}

impl<C, E> From<DriverError<E>> for AttachError<C, E> {
    fn from(err: DriverError<E>) -> Self {
        Self::Driver(err)
    }
}

impl<C: fmt::Debug, E: fmt::Debug> fmt::Display for AttachError<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineUnavailable(err) => write!(f, "failed to request level line: {:?}", err),
            Self::MissingDefaultLevel => f.write_str("can't read the default level"),
            Self::Driver(err) => write!(f, "failed to apply default level: {}", err),
        }
    }
}
