//! # embedded-fan-bridge
//! A `no_std` bridge from a host's analog fan command to a brushless
//! motor's ESC, with the motor's RPM reported back to the host as a tone.
//! Disable the default `std` feature for bare-metal targets.
//!
//! # Pipeline
//! Every tick the [`Bridge`] samples the command and runs it through:
//!
//! [`input`] maps the raw sample to a [`SpeedFraction`](input::SpeedFraction)
//! with a configurable [`Calibration`](input::Calibration).
//!
//! [`pulse`] converts the fraction to a 1000-2000 µs servo [`PulseWidth`](pulse::PulseWidth).
//!
//! [`rpm`] estimates the motor's RPM through a swappable [`RpmModel`](rpm::RpmModel).
//!
//! [`tone`] reports the estimate as a tone, dithering speeds below the
//! lowest representable frequency so their average is preserved.
//!
//! # Generic components
//! [`hal`] contains the hardware capabilities and `embedded-hal` adapters.
//!
//! [`scheduler`] runs the bridge at a fixed rate from a hardware clock.
//!
//! With the `std` feature, [`runtime`] runs it on a tokio interval instead.
//!
//! ```
//! use embedded_fan_bridge::{Bridge, Config};
//! use embedded_fan_bridge::hal::{AnalogInput, PulseOutput, ToneOutput};
//! use embedded_fan_bridge::pulse::PulseWidth;
//! use embedded_fan_bridge::tone::Tone;
//!
//! struct Command;
//!
//! impl AnalogInput for Command {
//!     type Error = ();
//!
//!     fn read_analog(&mut self) -> Result<u16, ()> {
//!         Ok(1023)
//!     }
//! }
//!
//! struct Esc;
//!
//! impl PulseOutput for Esc {
//!     fn set_pulse_width(&mut self, _width: PulseWidth) {}
//! }
//!
//! struct Speaker;
//!
//! impl ToneOutput for Speaker {
//!     fn set_tone(&mut self, _tone: Tone) {}
//! }
//!
//! let mut bridge = Bridge::new(Config::default(), Command, Esc, Speaker);
//! let tick = bridge.tick().unwrap();
//!
//! assert_eq!(tick.pulse.micros(), 2000);
//! assert_eq!(tick.rpm, 2500);
//! assert_eq!(tick.tone.hz(), 83);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bridge;
pub use bridge::{Bridge, Tick};

pub mod config;
pub use config::Config;

mod error;
pub use error::Error;

pub mod filter;

pub mod hal;
pub use hal::{AnalogInput, PulseOutput, ToneOutput, ESC};

pub mod input;

pub mod pulse;

pub mod rpm;

#[cfg(feature = "std")]
pub mod runtime;

pub mod scheduler;
pub use scheduler::Scheduler;

pub mod status;

pub mod tone;
