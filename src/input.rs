//! Mapping of raw analog samples into a normalized [`SpeedFraction`].

use core::fmt;

/// Commanded fan speed as a fraction of maximum, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct SpeedFraction(f32);

impl SpeedFraction {
    pub const ZERO: Self = Self(0.);
    pub const FULL: Self = Self(1.);

    /// Create a fraction, clamping `value` into `[0, 1]`.
    /// NaN maps to zero.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0., 1.))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn percent(self) -> f32 {
        self.0 * 100.
    }
}

impl fmt::Display for SpeedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

/// Linear calibration from an ADC sample to a [`SpeedFraction`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Calibration {
    /// `fraction = raw / adc_max`
    #[default]
    Ratio,

    /// `fraction = clamp(slope * raw * volts_per_count + intercept, 0, 1)`
    Affine {
        /// Voltage at the host's output for one ADC count, including any divider.
        volts_per_count: f32,
        slope: f32,
        intercept: f32,
    },
}

impl Calibration {
    pub fn ratio() -> Self {
        Self::Ratio
    }

    pub fn affine(volts_per_count: f32, slope: f32, intercept: f32) -> Self {
        Self::Affine {
            volts_per_count,
            slope,
            intercept,
        }
    }

    /// Calibration for a command read through a resistive divider.
    ///
    /// `divider_ratio` is the host voltage divided by the voltage at the ADC pin.
    /// The host's `min_volts` maps to 0.0 and `max_volts` maps to 1.0.
    ///
    /// ```
    /// use embedded_fan_bridge::input::Calibration;
    ///
    /// // 0-10 V command halved into a 5 V ADC, motor starts at 1 V
    /// let calibration = Calibration::divider(5., 1023, 2., 1., 10.);
    /// assert!(calibration.fraction(1023, 1023).get() > 0.999);
    /// assert_eq!(calibration.fraction(0, 1023).get(), 0.);
    /// ```
    pub fn divider(
        reference_volts: f32,
        adc_max: u16,
        divider_ratio: f32,
        min_volts: f32,
        max_volts: f32,
    ) -> Self {
        let volts_per_count = reference_volts * divider_ratio / f32::from(adc_max);
        let slope = 1. / (max_volts - min_volts);
        Self::affine(volts_per_count, slope, -min_volts * slope)
    }

    /// Returns `false` if any coefficient is infinite or NaN.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Ratio => true,
            Self::Affine {
                volts_per_count,
                slope,
                intercept,
            } => volts_per_count.is_finite() && slope.is_finite() && intercept.is_finite(),
        }
    }

    /// Map a raw sample in `[0, adc_max]` to a speed fraction.
    /// Samples above `adc_max` are treated as `adc_max`.
    pub fn fraction(&self, raw: u16, adc_max: u16) -> SpeedFraction {
        if adc_max == 0 {
            return SpeedFraction::ZERO;
        }
        let raw = raw.min(adc_max);

        match *self {
            Self::Ratio => SpeedFraction::new(f32::from(raw) / f32::from(adc_max)),
            Self::Affine {
                volts_per_count,
                slope,
                intercept,
            } => {
                let volts = f32::from(raw) * volts_per_count;
                SpeedFraction::new(slope * volts + intercept)
            }
        }
    }
}
