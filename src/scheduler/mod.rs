//! Fixed-rate tick scheduler for targets without an async runtime.
//!
//! [`Scheduler::run`] is called once per period, from a timer interrupt or a
//! polling loop. Each call is one tick: every task whose rate divides into
//! the elapsed ticks runs once, in order, to completion.
//!
//! Task errors and clock failures share one error type `E`,
//! usually the crate's [`Error`](crate::Error).

use embedded_time::{clock, duration::Microseconds, Clock, ConversionError};
use log::warn;

mod task;
pub use task::{Event, Task};

pub struct Scheduler<'a, C, T, E> {
    tasks: &'a mut [Task<T, E>],
    clock: C,
    tick_counter: u32,
    loop_rate_hz: u32,
    loop_period_us: u32,
    last_tick_us: Option<u32>,
    overruns: u32,
}

impl<'a, C, T, E> Scheduler<'a, C, T, E>
where
    C: Clock<T = u32>,
    E: From<clock::Error> + From<ConversionError>,
{
    pub fn new(tasks: &'a mut [Task<T, E>], clock: C, loop_rate_hz: u32) -> Self {
        let loop_rate_hz = loop_rate_hz.max(1);
        Self {
            tasks,
            clock,
            tick_counter: 0,
            loop_rate_hz,
            loop_period_us: 1_000_000 / loop_rate_hz,
            last_tick_us: None,
            overruns: 0,
        }
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Ticks that started more than two periods after the previous one.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    pub fn run(&mut self, system: &mut T) -> Result<(), E> {
        let now = self.micros_since_epoch()?;

        if let Some(last) = self.last_tick_us {
            let elapsed = now.0.wrapping_sub(last);
            if elapsed > self.loop_period_us.saturating_mul(2) {
                self.overruns += 1;
                warn!(
                    "tick {} late: {} us since last tick, period {} us",
                    self.tick_counter, elapsed, self.loop_period_us
                );
            }
        }
        self.last_tick_us = Some(now.0);

        self.tick_counter = self.tick_counter.wrapping_add(1);

        for task in self.tasks.iter_mut() {
            let ticks = task.ticks(self.loop_rate_hz);
            if task.ready(self.tick_counter, ticks).is_none() {
                // this task is not yet scheduled to run again
                continue;
            }

            let event = Event {
                system: &mut *system,
                now,
                tick: self.tick_counter,
            };
            task.run(event, self.tick_counter)?;
        }

        Ok(())
    }

    fn micros_since_epoch(&mut self) -> Result<Microseconds<u32>, E> {
        let instant = self.clock.try_now()?;
        Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
    }
}
