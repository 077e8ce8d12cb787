//! Open-loop RPM estimation from the commanded speed.
//!
//! There is no tachometer: the motor's speed is inferred from the command
//! through a [`RpmModel`] calibrated for the attached motor.

use log::warn;
use num_traits::Float;

use crate::input::SpeedFraction;

/// Maps a commanded fraction in `[0, 1]` to a fraction of maximum RPM in `[0, 1]`.
pub trait RpmModel {
    fn apply(&self, fraction: f32) -> f32;
}

impl<F> RpmModel for F
where
    F: Fn(f32) -> f32,
{
    fn apply(&self, fraction: f32) -> f32 {
        self(fraction)
    }
}

/// RPM proportional to the command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Linear;

impl RpmModel for Linear {
    fn apply(&self, fraction: f32) -> f32 {
        fraction
    }
}

/// RPM proportional to the cube root of the command,
/// for ESCs where the command sets power rather than speed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CubeRoot;

impl RpmModel for CubeRoot {
    fn apply(&self, fraction: f32) -> f32 {
        Float::cbrt(fraction)
    }
}

/// Runtime selectable model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    #[default]
    Linear,
    CubeRoot,
}

impl RpmModel for Model {
    fn apply(&self, fraction: f32) -> f32 {
        match self {
            Self::Linear => Linear.apply(fraction),
            Self::CubeRoot => CubeRoot.apply(fraction),
        }
    }
}

/// Estimates `round(max_rpm * model(fraction))`, bounded to `[0, max_rpm]`.
#[derive(Clone, Copy, Debug)]
pub struct RpmEstimator<M = Model> {
    max_rpm: u32,
    model: M,
}

impl<M: RpmModel> RpmEstimator<M> {
    pub fn new(max_rpm: u32, model: M) -> Self {
        Self { max_rpm, model }
    }

    pub fn max_rpm(&self) -> u32 {
        self.max_rpm
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// ```
    /// use embedded_fan_bridge::input::SpeedFraction;
    /// use embedded_fan_bridge::rpm::{CubeRoot, RpmEstimator};
    ///
    /// let estimator = RpmEstimator::new(2500, CubeRoot);
    /// assert_eq!(estimator.estimate(SpeedFraction::new(0.125)), 1250);
    /// ```
    pub fn estimate(&self, fraction: SpeedFraction) -> u32 {
        let mut scaled = self.model.apply(fraction.get());

        // Estimates stay within [0, max_rpm]
        if scaled.is_nan() {
            warn!("rpm model returned NaN for {}, using 0", fraction);
            scaled = 0.;
        } else if !(0. ..=1.).contains(&scaled) {
            warn!("rpm model returned {} for {}, clamping", scaled, fraction);
            scaled = scaled.clamp(0., 1.);
        }

        let rpm = Float::round(self.max_rpm as f32 * scaled) as u32;
        rpm.min(self.max_rpm)
    }
}
