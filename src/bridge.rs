//! The control loop's pipeline pass.
//!
//! Each tick samples the host's command, drives the ESC and reports the
//! estimated RPM back on the tone channel:
//!
//! ```text
//! analog ──► SpeedFraction ─┬─► PulseWidth ──► ESC
//!                           └─► RPM ──► ToneEncoder ──► tone
//! ```

use core::fmt;

use log::{trace, warn};

use crate::config::Config;
use crate::error::Error;
use crate::hal::{AnalogInput, PulseOutput, ToneOutput, ESC};
use crate::input::SpeedFraction;
use crate::pulse::PulseWidth;
use crate::rpm::{Model, RpmEstimator, RpmModel};
use crate::scheduler::{Event, Task};
use crate::status::Status;
use crate::tone::{Tone, ToneEncoder, ToneState};

/// Everything computed on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub raw: u16,
    pub fraction: SpeedFraction,
    pub pulse: PulseWidth,
    pub rpm: u32,
    pub tone: Tone,
    /// Accumulated unreported RPM after this tick.
    pub rpm_error: u32,
}

pub struct Bridge<A, P, T, M = Model> {
    config: Config,
    estimator: RpmEstimator<M>,
    encoder: ToneEncoder,
    state: ToneState,
    status: Status,
    read_errors: u32,
    input: A,
    esc: P,
    tone: T,
}

impl<A, P, T> Bridge<A, P, T>
where
    A: AnalogInput,
    P: PulseOutput,
    T: ToneOutput,
{
    /// Create a bridge using the RPM model selected in `config`.
    pub fn new(config: Config, input: A, esc: P, tone: T) -> Self {
        Self::with_model(config, config.model(), input, esc, tone)
    }
}

impl<A, P, T, M> Bridge<A, P, T, M>
where
    A: AnalogInput,
    P: PulseOutput,
    T: ToneOutput,
    M: RpmModel,
{
    /// Create a bridge with a custom RPM model, ignoring the one in `config`.
    pub fn with_model(config: Config, model: M, input: A, esc: P, tone: T) -> Self {
        Self {
            estimator: RpmEstimator::new(config.max_rpm(), model),
            encoder: ToneEncoder::new(config.min_tone(), config.max_rpm()),
            state: ToneState::new(),
            status: Status::new(),
            read_errors: 0,
            config,
            input,
            esc,
            tone,
        }
    }

    pub fn arm(&mut self)
    where
        P: ESC,
    {
        self.esc.arm();
    }

    /// Run one full pass: sample, drive the ESC, then the tone.
    ///
    /// Outputs are left untouched if the analog read fails.
    pub fn tick(&mut self) -> Result<Tick, Error<A::Error>> {
        let raw = self.input.read_analog().map_err(Error::Analog)?;
        let tick = self.step(raw);

        self.esc.set_pulse_width(tick.pulse);
        self.tone.set_tone(tick.tone);

        Ok(tick)
    }

    /// Run one pass, skipping it if the analog read fails.
    ///
    /// A failed read is logged and counted, and both outputs keep their last
    /// values until the next successful tick.
    pub fn update(&mut self) -> Option<Tick>
    where
        A::Error: fmt::Debug,
    {
        match self.tick() {
            Ok(tick) => Some(tick),
            Err(error) => {
                self.read_errors = self.read_errors.wrapping_add(1);
                warn!("skipping tick: {}", error);
                None
            }
        }
    }

    /// Compute a tick from a raw sample without touching the hardware.
    pub fn step(&mut self, raw: u16) -> Tick {
        let fraction = self
            .config
            .calibration()
            .fraction(raw, self.config.adc_max());

        let pulse = PulseWidth::from_fraction(fraction);
        let rpm = self.estimator.estimate(fraction);
        let tone = self.encoder.encode(&mut self.state, rpm);
        self.status.record(fraction, rpm);

        trace!(
            "raw {} fraction {} pulse {} rpm {} tone {} error {}",
            raw,
            fraction,
            pulse,
            rpm,
            tone,
            self.state.rpm_error()
        );

        Tick {
            raw,
            fraction,
            pulse,
            rpm,
            tone,
            rpm_error: self.state.rpm_error(),
        }
    }

    /// Log the rolling-averaged status line.
    pub fn report(&mut self) {
        self.status.log();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &ToneState {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Ticks skipped because the analog read failed.
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn release(self) -> (A, P, T) {
        (self.input, self.esc, self.tone)
    }

    /// Scheduler tasks: the control pass every tick
    /// and the status log at the configured rate.
    pub fn tasks(&self) -> [Task<Self, Error<A::Error>>; 2]
    where
        A::Error: fmt::Debug,
    {
        [
            Task::new(control_task::<A, P, T, M>),
            Task::new(status_task::<A, P, T, M>).with_hz(self.config.status_hz()),
        ]
    }
}

fn control_task<A, P, T, M>(event: Event<'_, Bridge<A, P, T, M>>) -> Result<(), Error<A::Error>>
where
    A: AnalogInput,
    A::Error: fmt::Debug,
    P: PulseOutput,
    T: ToneOutput,
    M: RpmModel,
{
    event.system.update();
    Ok(())
}

fn status_task<A, P, T, M>(event: Event<'_, Bridge<A, P, T, M>>) -> Result<(), Error<A::Error>>
where
    A: AnalogInput,
    P: PulseOutput,
    T: ToneOutput,
    M: RpmModel,
{
    event.system.report();
    Ok(())
}
