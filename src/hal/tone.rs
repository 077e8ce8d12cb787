//! Tone output on a timer whose period can be changed at runtime.

use embedded_hal::Pwm;
use embedded_time::rate::Hertz;
use num_traits::{Num, One};

use super::ToneOutput;
use crate::tone::Tone;

/// A 50 % duty square wave on one channel of a [`Pwm`] timer.
///
/// The timer is only reconfigured when the tone changes,
/// so a steady tone is not glitched on every tick.
pub struct PwmTone<T: Pwm> {
    pwm: T,
    channel: T::Channel,
    tone: Tone,
}

impl<T> PwmTone<T>
where
    T: Pwm,
    T::Channel: Copy,
    T::Duty: Num + Copy,
    Hertz<u32>: Into<T::Time>,
{
    /// Wrap `channel` of `pwm`, starting silent.
    pub fn new(mut pwm: T, channel: T::Channel) -> Self {
        pwm.disable(channel);
        Self {
            pwm,
            channel,
            tone: Tone::Silence,
        }
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn release(self) -> T {
        self.pwm
    }
}

impl<T> ToneOutput for PwmTone<T>
where
    T: Pwm,
    T::Channel: Copy,
    T::Duty: Num + Copy,
    Hertz<u32>: Into<T::Time>,
{
    fn set_tone(&mut self, tone: Tone) {
        if tone == self.tone {
            return;
        }

        match tone {
            Tone::Silence => self.pwm.disable(self.channel),
            Tone::Frequency(hz) => {
                self.pwm.set_period(hz);

                let two = <T::Duty as One>::one() + <T::Duty as One>::one();
                let half = self.pwm.get_max_duty() / two;
                self.pwm.set_duty(self.channel, half);
                self.pwm.enable(self.channel);
            }
        }
        self.tone = tone;
    }
}

#[cfg(test)]
mod tests {
    use super::PwmTone;
    use crate::hal::ToneOutput;
    use crate::tone::Tone;
    use embedded_hal::Pwm;
    use embedded_time::rate::Hertz;

    struct MockTimer {
        period: Hertz<u32>,
        duty: u16,
        enabled: bool,
        reconfigured: u32,
    }

    fn timer() -> MockTimer {
        MockTimer {
            period: Hertz(0),
            duty: 0,
            enabled: true,
            reconfigured: 0,
        }
    }

    impl Pwm for MockTimer {
        type Channel = ();
        type Time = Hertz<u32>;
        type Duty = u16;

        fn disable(&mut self, _channel: ()) {
            self.enabled = false;
        }

        fn enable(&mut self, _channel: ()) {
            self.enabled = true;
        }

        fn get_period(&self) -> Hertz<u32> {
            self.period
        }

        fn get_duty(&self, _channel: ()) -> u16 {
            self.duty
        }

        fn get_max_duty(&self) -> u16 {
            1000
        }

        fn set_duty(&mut self, _channel: (), duty: u16) {
            self.duty = duty;
        }

        fn set_period<P>(&mut self, period: P)
        where
            P: Into<Hertz<u32>>,
        {
            self.period = period.into();
            self.reconfigured += 1;
        }
    }

    #[test]
    fn starts_silent() {
        let tone = PwmTone::new(timer(), ());
        assert!(tone.tone().is_silent());
        assert!(!tone.release().enabled);
    }

    #[test]
    fn frequency_sets_half_duty() {
        let mut tone = PwmTone::new(timer(), ());
        tone.set_tone(Tone::Frequency(Hertz(31)));

        assert_eq!(tone.tone(), Tone::Frequency(Hertz(31)));
        let timer = tone.release();
        assert!(timer.enabled);
        assert_eq!(timer.period.0, 31);
        assert_eq!(timer.duty, 500);
    }

    #[test]
    fn silence_disables() {
        let mut tone = PwmTone::new(timer(), ());
        tone.set_tone(Tone::Frequency(Hertz(40)));
        tone.set_tone(Tone::Silence);

        assert!(!tone.release().enabled);
    }

    #[test]
    fn steady_tone_not_reconfigured() {
        let mut tone = PwmTone::new(timer(), ());
        for _ in 0..10 {
            tone.set_tone(Tone::Frequency(Hertz(83)));
        }
        tone.set_tone(Tone::Frequency(Hertz(84)));

        assert_eq!(tone.release().reconfigured, 2);
    }
}
