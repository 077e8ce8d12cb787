//! Servo-format pulse widths for the ESC.

use core::fmt;

use num_traits::Float;

use crate::input::SpeedFraction;

/// ESC pulse high-time in microseconds, always in `[1000, 2000]`.
///
/// 1000 µs commands zero speed and 2000 µs commands full speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PulseWidth(u16);

impl PulseWidth {
    pub const MIN: Self = Self(1000);
    pub const MAX: Self = Self(2000);

    /// Create a pulse width, clamping `micros` into `[1000, 2000]`.
    pub fn from_micros(micros: u16) -> Self {
        Self(micros.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Encode a speed fraction as `1000 + round(fraction * 1000)`.
    ///
    /// ```
    /// use embedded_fan_bridge::{input::SpeedFraction, pulse::PulseWidth};
    ///
    /// assert_eq!(PulseWidth::from_fraction(SpeedFraction::new(0.5)).micros(), 1500);
    /// ```
    pub fn from_fraction(fraction: SpeedFraction) -> Self {
        let span = f32::from(Self::MAX.0 - Self::MIN.0);
        let offset = Float::round(fraction.get() * span) as u16;
        Self::from_micros(Self::MIN.0.saturating_add(offset))
    }

    pub fn micros(self) -> u16 {
        self.0
    }
}

impl Default for PulseWidth {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<SpeedFraction> for PulseWidth {
    fn from(fraction: SpeedFraction) -> Self {
        Self::from_fraction(fraction)
    }
}

impl fmt::Display for PulseWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::PulseWidth;
    use crate::input::SpeedFraction;

    #[test]
    fn endpoints() {
        assert_eq!(PulseWidth::from_fraction(SpeedFraction::ZERO), PulseWidth::MIN);
        assert_eq!(PulseWidth::from_fraction(SpeedFraction::FULL), PulseWidth::MAX);
    }

    #[test]
    fn rounds_to_nearest_micro() {
        assert_eq!(PulseWidth::from_fraction(SpeedFraction::new(0.0004)).micros(), 1000);
        assert_eq!(PulseWidth::from_fraction(SpeedFraction::new(0.0006)).micros(), 1001);
        assert_eq!(PulseWidth::from_fraction(SpeedFraction::new(0.25)).micros(), 1250);
    }

    #[test]
    fn monotonic_and_in_range() {
        let mut last = PulseWidth::MIN;
        for step in 0..=10_000 {
            let width = PulseWidth::from_fraction(SpeedFraction::new(step as f32 / 10_000.));
            assert!(width >= last);
            assert!((1000..=2000).contains(&width.micros()));
            last = width;
        }
    }

    #[test]
    fn from_micros_clamps() {
        assert_eq!(PulseWidth::from_micros(500), PulseWidth::MIN);
        assert_eq!(PulseWidth::from_micros(2500), PulseWidth::MAX);
        assert_eq!(PulseWidth::from_micros(1200).micros(), 1200);
    }
}
