//! RPM feedback to the host as a tone frequency.
//!
//! The host counts two tone pulses per revolution and can only receive
//! frequencies at or above a hardware floor. Speeds below the floor are
//! reported by accumulating the unreported RPM across ticks and releasing
//! it in a single tone once the total reaches the floor, so the host's
//! rolling average still converges to the estimate.

use core::fmt;

use embedded_time::rate::Hertz;

/// Tone pulses the host counts per motor revolution.
pub const PULSES_PER_REV: u32 = 2;

/// Output on the feedback channel for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Silence,
    Frequency(Hertz<u32>),
}

impl Tone {
    /// Tone for `rpm`, truncated to a whole frequency.
    pub fn from_rpm(rpm: u32) -> Self {
        Self::Frequency(Hertz(rpm.saturating_mul(PULSES_PER_REV) / 60))
    }

    /// Frequency in hertz, 0 for silence.
    pub fn hz(self) -> u32 {
        match self {
            Self::Silence => 0,
            Self::Frequency(hz) => hz.0,
        }
    }

    /// RPM the host reads from this tone.
    pub fn rpm(self) -> u32 {
        self.hz().saturating_mul(60) / PULSES_PER_REV
    }

    pub fn is_silent(self) -> bool {
        self == Self::Silence
    }
}

impl Default for Tone {
    fn default() -> Self {
        Self::Silence
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silence => f.write_str("silence"),
            Self::Frequency(hz) => write!(f, "{}Hz", hz.0),
        }
    }
}

/// RPM accumulated while the tone was silent.
///
/// Starts at zero and is only ever cleared by an emission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToneState {
    rpm_error: u32,
}

impl ToneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rpm_error(&self) -> u32 {
        self.rpm_error
    }
}

/// Dithering encoder from RPM estimates to tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneEncoder {
    min_rpm: u32,
    max_rpm: u32,
}

impl ToneEncoder {
    /// Create an encoder for a tone generator whose lowest frequency is `floor`.
    ///
    /// Estimates above `max_rpm` are clamped before accumulation.
    pub fn new(floor: Hertz<u32>, max_rpm: u32) -> Self {
        Self {
            min_rpm: min_rpm_for_tone(floor),
            max_rpm,
        }
    }

    /// Lowest RPM representable as a steady tone.
    pub fn min_rpm(&self) -> u32 {
        self.min_rpm
    }

    /// Encode one tick's estimate.
    ///
    /// ```
    /// use embedded_fan_bridge::tone::{Tone, ToneEncoder, ToneState};
    /// use embedded_time::rate::Hertz;
    ///
    /// let encoder = ToneEncoder::new(Hertz(31), 2500);
    /// let mut state = ToneState::new();
    ///
    /// assert_eq!(encoder.encode(&mut state, 465), Tone::Silence);
    /// assert_eq!(encoder.encode(&mut state, 465), Tone::Frequency(Hertz(31)));
    /// assert_eq!(state.rpm_error(), 0);
    /// ```
    pub fn encode(&self, state: &mut ToneState, rpm: u32) -> Tone {
        let rpm = rpm.min(self.max_rpm);
        let effective = rpm.saturating_add(state.rpm_error);

        if effective >= self.min_rpm {
            state.rpm_error = 0;
            Tone::from_rpm(effective)
        } else {
            state.rpm_error = effective;
            Tone::Silence
        }
    }
}

/// `floor_hz * 60 / 2`, the RPM at which the host sees the lowest tone.
pub fn min_rpm_for_tone(floor: Hertz<u32>) -> u32 {
    floor.0.saturating_mul(60) / PULSES_PER_REV
}

#[cfg(test)]
mod tests {
    use super::{min_rpm_for_tone, Tone, ToneEncoder, ToneState};
    use embedded_time::rate::Hertz;

    fn encoder() -> ToneEncoder {
        ToneEncoder::new(Hertz(31), 2500)
    }

    #[test]
    fn floor_to_rpm() {
        assert_eq!(min_rpm_for_tone(Hertz(31)), 930);
        assert_eq!(encoder().min_rpm(), 930);
    }

    #[test]
    fn half_floor_alternates() {
        let encoder = encoder();
        let mut state = ToneState::new();

        assert_eq!(encoder.encode(&mut state, 465), Tone::Silence);
        assert_eq!(state.rpm_error(), 465);

        assert_eq!(encoder.encode(&mut state, 465), Tone::Frequency(Hertz(31)));
        assert_eq!(state.rpm_error(), 0);

        assert_eq!(encoder.encode(&mut state, 465), Tone::Silence);
        assert_eq!(state.rpm_error(), 465);

        let reported: u32 = (0..100).map(|_| encoder.encode(&mut state, 465).rpm()).sum();
        assert_eq!(reported / 100, 465);
    }

    #[test]
    fn floor_emits() {
        let encoder = encoder();
        let mut state = ToneState::new();

        assert_eq!(encoder.encode(&mut state, 930), Tone::Frequency(Hertz(31)));
        assert_eq!(state.rpm_error(), 0);

        let mut state = ToneState::new();
        assert_eq!(encoder.encode(&mut state, 929), Tone::Silence);
        assert_eq!(encoder.encode(&mut state, 1), Tone::Frequency(Hertz(31)));
        assert_eq!(state.rpm_error(), 0);
    }

    #[test]
    fn zero_stays_silent() {
        let encoder = encoder();
        let mut state = ToneState::new();

        for _ in 0..1000 {
            assert_eq!(encoder.encode(&mut state, 0), Tone::Silence);
            assert_eq!(state.rpm_error(), 0);
        }
    }

    #[test]
    fn max_emits_every_tick() {
        let encoder = encoder();
        let mut state = ToneState::new();

        for _ in 0..100 {
            assert_eq!(encoder.encode(&mut state, 2500), Tone::Frequency(Hertz(83)));
            assert_eq!(state.rpm_error(), 0);
        }
    }

    #[test]
    fn estimate_clamped_to_max() {
        let encoder = encoder();
        let mut state = ToneState::new();
        assert_eq!(encoder.encode(&mut state, u32::MAX), Tone::from_rpm(2500));
    }

    #[test]
    fn error_stays_below_floor() {
        let encoder = encoder();
        let mut state = ToneState::new();

        for tick in 0..10_000u32 {
            let rpm = (tick * 37) % 2600;
            let tone = encoder.encode(&mut state, rpm);

            if tone.is_silent() {
                assert!(state.rpm_error() < encoder.min_rpm());
            } else {
                assert_eq!(state.rpm_error(), 0);
                assert!(tone.hz() >= 31);
            }
        }
    }

    #[test]
    fn converges_to_estimate() {
        let encoder = encoder();
        let ticks = 3000;

        for rpm in [1, 29, 100, 400, 465, 700, 929, 930, 1234, 2500] {
            let mut state = ToneState::new();
            let reported: u32 = (0..ticks).map(|_| encoder.encode(&mut state, rpm).rpm()).sum();
            let average = reported as f32 / ticks as f32;

            // Each emission truncates less than one hertz (30 RPM)
            // and at most one floor's worth of RPM is still pending.
            let tolerance = 30. + encoder.min_rpm() as f32 / ticks as f32;
            assert!(
                (average - rpm as f32).abs() <= tolerance,
                "rpm {} averaged {}",
                rpm,
                average
            );
        }
    }
}
