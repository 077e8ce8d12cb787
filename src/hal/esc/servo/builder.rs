use embedded_hal::PwmPin;
use log::warn;

use super::{ServoEsc, FRAME_MICROS};
use crate::pulse::PulseWidth;

pub struct Builder {
    arm: PulseWidth,
    min: PulseWidth,
    max: PulseWidth,
    frame_micros: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            arm: PulseWidth::MIN,
            min: PulseWidth::MIN,
            max: PulseWidth::MAX,
            frame_micros: FRAME_MICROS,
        }
    }
}

impl Builder {
    pub fn arm(mut self, arm: PulseWidth) -> Self {
        self.arm = arm;
        self
    }

    pub fn min(mut self, min: PulseWidth) -> Self {
        self.min = min;
        self
    }

    pub fn max(mut self, max: PulseWidth) -> Self {
        self.max = max;
        self
    }

    /// PWM period of the pin in microseconds.
    ///
    /// A frame shorter than the `max` pulse is lengthened to it on build.
    pub fn frame(mut self, micros: u32) -> Self {
        self.frame_micros = micros;
        self
    }

    pub fn build<P>(self, pin: P) -> ServoEsc<P>
    where
        P: PwmPin,
    {
        let (min, max) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };

        let max_micros = u32::from(max.micros());
        let frame_micros = if self.frame_micros < max_micros {
            warn!(
                "esc frame {}us shorter than max pulse {}, using {}us",
                self.frame_micros, max, max_micros
            );
            max_micros
        } else {
            self.frame_micros
        };

        ServoEsc {
            arm: self.arm,
            min,
            max,
            frame_micros,
            width: self.arm,
            pin,
        }
    }
}
