mod servo;
pub use servo::{Builder, ServoEsc, FRAME_MICROS};

use super::PulseOutput;

/// Electronic speed controller
pub trait ESC: PulseOutput {
    /// Arm this ESC.
    fn arm(&mut self);
}

impl<T> ESC for &mut T
where
    T: ESC + ?Sized,
{
    fn arm(&mut self) {
        (**self).arm()
    }
}
