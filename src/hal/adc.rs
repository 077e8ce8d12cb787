//! Analog command input over an `embedded-hal` one-shot ADC.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};

use super::AnalogInput;

/// Blocking single conversion of one ADC channel per read.
pub struct OneShotInput<A, ADC, PIN> {
    adc: ADC,
    pin: PIN,
    _adc: PhantomData<A>,
}

impl<A, ADC, PIN> OneShotInput<A, ADC, PIN>
where
    PIN: Channel<A>,
    ADC: OneShot<A, u16, PIN>,
{
    pub fn new(adc: ADC, pin: PIN) -> Self {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }

    pub fn release(self) -> (ADC, PIN) {
        (self.adc, self.pin)
    }
}

impl<A, ADC, PIN> AnalogInput for OneShotInput<A, ADC, PIN>
where
    PIN: Channel<A>,
    ADC: OneShot<A, u16, PIN>,
{
    type Error = ADC::Error;

    fn read_analog(&mut self) -> Result<u16, Self::Error> {
        nb::block!(self.adc.read(&mut self.pin))
    }
}

#[cfg(test)]
mod tests {
    use super::OneShotInput;
    use crate::hal::AnalogInput;
    use embedded_hal::adc::{Channel, OneShot};

    struct MockAdc {
        busy: u8,
        sample: u16,
        fail: bool,
    }

    struct CommandPin;

    impl Channel<MockAdc> for CommandPin {
        type ID = u8;

        fn channel() -> u8 {
            0
        }
    }

    #[derive(Debug, PartialEq)]
    struct Overrun;

    impl OneShot<MockAdc, u16, CommandPin> for MockAdc {
        type Error = Overrun;

        fn read(&mut self, _pin: &mut CommandPin) -> nb::Result<u16, Overrun> {
            if self.busy > 0 {
                self.busy -= 1;
                return Err(nb::Error::WouldBlock);
            }
            if self.fail {
                return Err(nb::Error::Other(Overrun));
            }
            Ok(self.sample)
        }
    }

    #[test]
    fn blocks_until_conversion_completes() {
        let adc = MockAdc {
            busy: 3,
            sample: 512,
            fail: false,
        };
        let mut input = OneShotInput::new(adc, CommandPin);

        assert_eq!(input.read_analog(), Ok(512));
        assert_eq!(input.release().0.busy, 0);
    }

    #[test]
    fn propagates_adc_error() {
        let adc = MockAdc {
            busy: 0,
            sample: 0,
            fail: true,
        };
        let mut input = OneShotInput::new(adc, CommandPin);

        assert_eq!(input.read_analog(), Err(Overrun));
    }
}
