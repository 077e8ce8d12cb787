use core::fmt;

use embedded_time::{clock, ConversionError};

/// A bridge error, generic over the analog input's error type.
#[derive(Debug)]
pub enum Error<E> {
    /// Reading the analog command failed.
    Analog(E),
    Clock(clock::Error),
    Time(ConversionError),
}

impl<E> From<clock::Error> for Error<E> {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl<E> From<ConversionError> for Error<E> {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Analog(e) => write!(f, "analog read failed: {:?}", e),
            Error::Clock(e) => write!(f, "clock error: {:?}", e),
            Error::Time(e) => write!(f, "time conversion error: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Error<E> {}
