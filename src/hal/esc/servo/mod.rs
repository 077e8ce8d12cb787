mod builder;
pub use builder::Builder;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::PwmPin;
use log::{debug, warn};
use num_traits::{NumCast, ToPrimitive};

use super::ESC;
use crate::hal::PulseOutput;
use crate::pulse::PulseWidth;

/// Length of one 50 Hz servo frame in microseconds.
pub const FRAME_MICROS: u32 = 20_000;

/// An ESC driven by a hobby-servo signal on a 50 Hz PWM pin.
pub struct ServoEsc<P: PwmPin> {
    arm: PulseWidth,
    min: PulseWidth,
    max: PulseWidth,
    frame_micros: u32,
    width: PulseWidth,
    pin: P,
}

impl<P> ServoEsc<P>
where
    P: PwmPin,
    P::Duty: NumCast + Copy,
{
    /// Create an ESC with the default 1000-2000 µs range.
    pub fn new(pin: P) -> Self {
        Builder::default().build(pin)
    }

    /// Teach the ESC its throttle range: full for 2 s, zero for 2 s, then arm.
    pub fn calibrate<D>(&mut self, delay: &mut D)
    where
        D: DelayMs<u16>,
    {
        debug!("calibrating esc {}..{}", self.min, self.max);
        self.pin.enable();

        self.write(self.max);
        delay.delay_ms(2000);

        self.write(self.min);
        delay.delay_ms(2000);

        self.arm_inner();
    }

    /// The last pulse width written to the pin.
    pub fn pulse_width(&self) -> PulseWidth {
        self.width
    }

    pub fn release(self) -> P {
        self.pin
    }

    fn arm_inner(&mut self) {
        debug!("arming esc at {}", self.arm);
        self.pin.enable();
        self.write(self.arm)
    }

    /// Duty for `width`, at most the pin's maximum.
    fn duty(&self, width: PulseWidth) -> Option<P::Duty> {
        let max_duty = self.pin.get_max_duty().to_u64()?;
        let frame = <u64 as From<u32>>::from(self.frame_micros.max(1));
        let micros = <u64 as From<u16>>::from(width.micros());

        <P::Duty as NumCast>::from((micros * max_duty / frame).min(max_duty))
    }

    fn write(&mut self, width: PulseWidth) {
        match self.duty(width) {
            Some(duty) => self.pin.set_duty(duty),
            None => {
                // No signal rather than a constant-high one
                warn!("esc duty for {} out of range, disabling output", width);
                self.pin.disable();
            }
        }
        self.width = width;
    }
}

impl<P> PulseOutput for ServoEsc<P>
where
    P: PwmPin,
    P::Duty: NumCast + Copy,
{
    fn set_pulse_width(&mut self, width: PulseWidth) {
        self.write(width.clamp(self.min, self.max))
    }
}

impl<P> ESC for ServoEsc<P>
where
    P: PwmPin,
    P::Duty: NumCast + Copy,
{
    fn arm(&mut self) {
        self.arm_inner()
    }
}
