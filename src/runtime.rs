//! Timer-driven tick loop on a tokio runtime.

use std::fmt;
use std::time::Duration;

use log::{debug, info};
use tokio::time::{self, MissedTickBehavior};

use crate::bridge::Bridge;
use crate::hal::{AnalogInput, PulseOutput, ToneOutput};
use crate::rpm::RpmModel;

/// Tick `bridge` once per configured period.
///
/// Runs `ticks` periods, or forever if `None`. A late tick delays the
/// following ones rather than running back to back, so passes never
/// overlap or bunch up. A period whose analog read fails is skipped and
/// still counted. Returns the number of periods run.
pub async fn run<A, P, T, M>(bridge: &mut Bridge<A, P, T, M>, ticks: Option<u64>) -> u64
where
    A: AnalogInput,
    A::Error: fmt::Debug,
    P: PulseOutput,
    T: ToneOutput,
    M: RpmModel,
{
    let period = Duration::from_millis(u64::from(bridge.config().period().0));
    let status_interval = u64::from(bridge.config().status_interval());

    info!(
        "bridge running every {:?}, tone floor {} rpm",
        period,
        bridge.config().min_rpm_for_tone()
    );

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut count = 0;
    while ticks.map_or(true, |ticks| count < ticks) {
        interval.tick().await;
        bridge.update();
        count += 1;

        if count % status_interval == 0 {
            bridge.report();
        }
    }

    debug!(
        "bridge stopped after {} ticks, {} skipped",
        count,
        bridge.read_errors()
    );
    count
}
