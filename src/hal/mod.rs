//! Hardware capabilities used by the bridge.
//!
//! The control loop only sees these three traits, so it can run against
//! real peripherals (see [`adc`], [`esc`], [`tone`]) or test doubles.

use crate::pulse::PulseWidth;
use crate::tone::Tone;

pub mod adc;
pub use adc::OneShotInput;

pub mod esc;
pub use esc::{ServoEsc, ESC};

pub mod tone;
pub use tone::PwmTone;

/// Source of the host's analog speed command.
pub trait AnalogInput {
    type Error;

    /// Sample the command, returning a value in `[0, adc_max]`.
    fn read_analog(&mut self) -> Result<u16, Self::Error>;
}

/// Servo-format pulse output to the ESC.
pub trait PulseOutput {
    fn set_pulse_width(&mut self, width: PulseWidth);
}

/// Tone output to the host.
pub trait ToneOutput {
    fn set_tone(&mut self, tone: Tone);
}

impl<T> AnalogInput for &mut T
where
    T: AnalogInput + ?Sized,
{
    type Error = T::Error;

    fn read_analog(&mut self) -> Result<u16, Self::Error> {
        (**self).read_analog()
    }
}

impl<T> PulseOutput for &mut T
where
    T: PulseOutput + ?Sized,
{
    fn set_pulse_width(&mut self, width: PulseWidth) {
        (**self).set_pulse_width(width)
    }
}

impl<T> ToneOutput for &mut T
where
    T: ToneOutput + ?Sized,
{
    fn set_tone(&mut self, tone: Tone) {
        (**self).set_tone(tone)
    }
}
