use embedded_time::duration::Microseconds;

/// An event containing the current time and tick for a task.
pub struct Event<'a, T> {
    /// The system running the scheduler.
    pub system: &'a mut T,

    /// The current time in microseconds.
    pub now: Microseconds<u32>,

    /// The scheduler tick this task runs on.
    pub tick: u32,
}

type TaskFn<T, E> = fn(Event<'_, T>) -> Result<(), E>;

/// A task to run at a fixed fraction of the loop rate
pub struct Task<T, E> {
    /// The function to run.
    pub f: TaskFn<T, E>,

    /// The desired frequency (in hz) to run the task, 0 to run every tick.
    pub hz: u32,

    /// The last tick this task was ran.
    pub last_run: u32,
}

impl<T, E> Task<T, E> {
    /// Create a new task from the function to run.
    pub fn new(f: TaskFn<T, E>) -> Self {
        Self {
            f,
            hz: 0,
            last_run: 0,
        }
    }

    /// Builder method to set `hz` and return `self`
    pub fn with_hz(mut self, hz: u32) -> Self {
        self.hz = hz;
        self
    }

    /// Calculate the desired ticks between each run of the task
    pub fn ticks(&self, loop_rate_hz: u32) -> u32 {
        // A 0hz task should be ran at the rate of the scheduler loop
        loop_rate_hz.checked_div(self.hz).unwrap_or(1).max(1)
    }

    /// If this task is ready returns the ticks elapsed since the last run.
    /// Otherwise this returns `None`.
    pub fn ready(&self, current_tick: u32, ticks: u32) -> Option<u32> {
        let dt = current_tick.wrapping_sub(self.last_run);

        if dt >= ticks {
            Some(dt)
        } else {
            None
        }
    }

    /// Run this task at the current tick.
    pub fn run(&mut self, event: Event<'_, T>, tick: u32) -> Result<(), E> {
        (self.f)(event)?;

        // Record the tick counter when we ran
        // This determines when we next run the event
        self.last_run = tick;

        Ok(())
    }
}
