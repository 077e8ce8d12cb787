//! Runs the bridge against simulated hardware.
//!
//! The host command sweeps from zero to full and back. Set `RUST_LOG=trace`
//! to see every tick, the default shows the status line.
//!
//! ```text
//! fan-bridge-sim [ticks] [cube-root]
//! ```

use std::env;
use std::error::Error;

use embedded_fan_bridge::config::{Config, ADC_MAX};
use embedded_fan_bridge::hal::{AnalogInput, PulseOutput, ToneOutput, ESC};
use embedded_fan_bridge::pulse::PulseWidth;
use embedded_fan_bridge::rpm::Model;
use embedded_fan_bridge::tone::Tone;
use embedded_fan_bridge::{runtime, Bridge};
use embedded_time::duration::Milliseconds;
use log::{debug, info};

/// Triangle wave over the full ADC range.
struct Sweep {
    sample: u16,
    step: i32,
}

impl AnalogInput for Sweep {
    type Error = core::convert::Infallible;

    fn read_analog(&mut self) -> Result<u16, Self::Error> {
        let next = i32::from(self.sample) + self.step;
        if !(0..=i32::from(ADC_MAX)).contains(&next) {
            self.step = -self.step;
        }
        self.sample = next.clamp(0, i32::from(ADC_MAX)) as u16;
        Ok(self.sample)
    }
}

struct SimEsc {
    armed: bool,
}

impl PulseOutput for SimEsc {
    fn set_pulse_width(&mut self, width: PulseWidth) {
        debug!("esc {} (armed: {})", width, self.armed);
    }
}

impl ESC for SimEsc {
    fn arm(&mut self) {
        self.armed = true;
        info!("esc armed");
    }
}

struct SimTone {
    tone: Tone,
}

impl ToneOutput for SimTone {
    fn set_tone(&mut self, tone: Tone) {
        if tone != self.tone {
            debug!("tone {} -> {}", self.tone, tone);
        }
        self.tone = tone;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let ticks = args.next().map(|arg| arg.parse::<u64>()).transpose()?;
    let model = match args.next().as_deref() {
        Some("cube-root") => Model::CubeRoot,
        _ => Model::Linear,
    };

    let config = Config::builder()
        .model(model)
        .period(Milliseconds(100))
        .status_hz(1)
        .build()?;
    info!("{:?}", config);

    let input = Sweep { sample: 0, step: 16 };
    let esc = SimEsc { armed: false };
    let tone = SimTone {
        tone: Tone::Silence,
    };

    let mut bridge = Bridge::new(config, input, esc, tone);
    bridge.arm();

    let count = runtime::run(&mut bridge, ticks).await;
    info!("ran {} ticks", count);

    Ok(())
}
