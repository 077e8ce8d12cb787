//! Bridge configuration.

use core::fmt;

use embedded_time::duration::Milliseconds;
use embedded_time::rate::Hertz;

use crate::input::Calibration;
use crate::rpm::Model;
use crate::tone::min_rpm_for_tone;

/// Largest sample of a 10-bit ADC.
pub const ADC_MAX: u16 = 1023;

/// Speed of the fan at full command.
pub const MAX_RPM: u32 = 2500;

/// Lowest frequency the tone generator can produce.
pub const MIN_TONE: Hertz<u32> = Hertz(31);

/// Time between control ticks.
pub const PERIOD: Milliseconds<u32> = Milliseconds(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    AdcRange,
    MaxRpm,
    ToneFloor,
    Period,
    Calibration,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::AdcRange => "adc_max must be greater than zero",
            Self::MaxRpm => "max_rpm must be greater than zero",
            Self::ToneFloor => "minimum tone frequency must be greater than zero",
            Self::Period => "tick period must be greater than zero",
            Self::Calibration => "calibration coefficients must be finite",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated bridge configuration, see [`Builder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    adc_max: u16,
    calibration: Calibration,
    model: Model,
    max_rpm: u32,
    min_tone: Hertz<u32>,
    period: Milliseconds<u32>,
    status_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adc_max: ADC_MAX,
            calibration: Calibration::Ratio,
            model: Model::Linear,
            max_rpm: MAX_RPM,
            min_tone: MIN_TONE,
            period: PERIOD,
            status_hz: 0,
        }
    }
}

impl Config {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn adc_max(&self) -> u16 {
        self.adc_max
    }

    pub fn calibration(&self) -> Calibration {
        self.calibration
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn max_rpm(&self) -> u32 {
        self.max_rpm
    }

    pub fn min_tone(&self) -> Hertz<u32> {
        self.min_tone
    }

    /// RPM below which the tone has to be dithered.
    pub fn min_rpm_for_tone(&self) -> u32 {
        min_rpm_for_tone(self.min_tone)
    }

    pub fn period(&self) -> Milliseconds<u32> {
        self.period
    }

    /// Ticks per second, at least 1.
    pub fn loop_rate_hz(&self) -> u32 {
        (1000 / self.period.0.max(1)).max(1)
    }

    /// Rate of the status log in hertz, 0 to log every tick.
    pub fn status_hz(&self) -> u32 {
        self.status_hz
    }

    /// Ticks between status log lines.
    pub fn status_interval(&self) -> u32 {
        self.loop_rate_hz()
            .checked_div(self.status_hz)
            .unwrap_or(1)
            .max(1)
    }
}

/// Builder for a [`Config`], starting from the defaults.
///
/// ```
/// use embedded_fan_bridge::config::Config;
/// use embedded_fan_bridge::rpm::Model;
///
/// let config = Config::builder()
///     .max_rpm(3000)
///     .model(Model::CubeRoot)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.min_rpm_for_tone(), 930);
/// assert_eq!(config.loop_rate_hz(), 10);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub fn adc_max(mut self, adc_max: u16) -> Self {
        self.config.adc_max = adc_max;
        self
    }

    pub fn calibration(mut self, calibration: Calibration) -> Self {
        self.config.calibration = calibration;
        self
    }

    pub fn model(mut self, model: Model) -> Self {
        self.config.model = model;
        self
    }

    pub fn max_rpm(mut self, max_rpm: u32) -> Self {
        self.config.max_rpm = max_rpm;
        self
    }

    pub fn min_tone(mut self, min_tone: Hertz<u32>) -> Self {
        self.config.min_tone = min_tone;
        self
    }

    pub fn period(mut self, period: Milliseconds<u32>) -> Self {
        self.config.period = period;
        self
    }

    pub fn status_hz(mut self, status_hz: u32) -> Self {
        self.config.status_hz = status_hz;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let config = self.config;

        if config.adc_max == 0 {
            return Err(ConfigError::AdcRange);
        }
        if config.max_rpm == 0 {
            return Err(ConfigError::MaxRpm);
        }
        if config.min_tone.0 == 0 {
            return Err(ConfigError::ToneFloor);
        }
        if config.period.0 == 0 {
            return Err(ConfigError::Period);
        }
        if !config.calibration.is_finite() {
            return Err(ConfigError::Calibration);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use crate::input::Calibration;
    use embedded_time::duration::Milliseconds;
    use embedded_time::rate::Hertz;

    #[test]
    fn defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.adc_max(), 1023);
        assert_eq!(config.max_rpm(), 2500);
        assert_eq!(config.min_rpm_for_tone(), 930);
        assert_eq!(config.period().0, 100);
        assert_eq!(config.loop_rate_hz(), 10);
        assert_eq!(config.status_interval(), 1);
    }

    #[test]
    fn rejects_invalid() {
        assert_eq!(Config::builder().adc_max(0).build(), Err(ConfigError::AdcRange));
        assert_eq!(Config::builder().max_rpm(0).build(), Err(ConfigError::MaxRpm));
        assert_eq!(
            Config::builder().min_tone(Hertz(0)).build(),
            Err(ConfigError::ToneFloor)
        );
        assert_eq!(
            Config::builder().period(Milliseconds(0)).build(),
            Err(ConfigError::Period)
        );
        assert_eq!(
            Config::builder()
                .calibration(Calibration::divider(5., 1023, 2., 4., 4.))
                .build(),
            Err(ConfigError::Calibration)
        );
    }

    #[test]
    fn status_interval_from_rate() {
        let config = Config::builder()
            .period(Milliseconds(200))
            .status_hz(1)
            .build()
            .unwrap();
        assert_eq!(config.loop_rate_hz(), 5);
        assert_eq!(config.status_interval(), 5);

        // Faster than the loop logs every tick
        let config = Config::builder().status_hz(50).build().unwrap();
        assert_eq!(config.status_interval(), 1);
    }

    #[test]
    fn slow_period_still_ticks() {
        let config = Config::builder()
            .period(Milliseconds(2000))
            .build()
            .unwrap();
        assert_eq!(config.loop_rate_hz(), 1);
    }
}
