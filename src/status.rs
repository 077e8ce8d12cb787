//! Human-readable status of the bridge, averaged over recent ticks.

use log::info;

use crate::filter::RollingAverage;
use crate::input::SpeedFraction;

/// Ticks in the default averaging window.
pub const DEFAULT_WINDOW: usize = 10;

/// Rolling averages of commanded percent speed and estimated RPM.
#[derive(Default)]
pub struct Status<const N: usize = DEFAULT_WINDOW> {
    percent: RollingAverage<N>,
    rpm: RollingAverage<N>,
    reports: u32,
}

impl<const N: usize> Status<N> {
    pub fn new() -> Self {
        Self {
            percent: RollingAverage::new(),
            rpm: RollingAverage::new(),
            reports: 0,
        }
    }

    pub fn record(&mut self, fraction: SpeedFraction, rpm: u32) {
        self.percent.apply(fraction.percent());
        self.rpm.apply(rpm as f32);
    }

    pub fn percent(&self) -> f32 {
        self.percent.output()
    }

    pub fn rpm(&self) -> f32 {
        self.rpm.output()
    }

    pub fn log(&mut self) {
        info!("speed {:.1}% rpm {:.0}", self.percent(), self.rpm());
        self.reports = self.reports.wrapping_add(1);
    }

    /// Status lines logged so far.
    pub fn reports(&self) -> u32 {
        self.reports
    }
}
