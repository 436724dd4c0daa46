//! PWM actuator output (heater MOSFETs and the cooler fan).
//!
//! Register duty values are 0–255 and map linearly onto the channel's full
//! duty range, whatever the channel's resolution.  Any
//! `embedded_hal::pwm::SetDutyCycle` channel works: LEDC on the target,
//! mocks in tests.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

pub struct PwmOutput<C> {
    name: &'static str,
    channel: C,
    duty: u8,
}

impl<C: SetDutyCycle> PwmOutput<C> {
    /// Wrap `channel` and drive it to 0.
    pub fn new(name: &'static str, channel: C) -> Self {
        let mut out = Self {
            name,
            channel,
            duty: 0,
        };
        out.apply(0);
        out
    }

    /// Drive the output.  Repeating the current duty is a no-op.
    pub fn set(&mut self, duty: u8) {
        if duty != self.duty {
            self.apply(duty);
        }
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    fn apply(&mut self, duty: u8) {
        match self.channel.set_duty_cycle_fraction(u16::from(duty), 255) {
            Ok(()) => self.duty = duty,
            Err(e) => warn!("{}: set duty {} failed: {:?}", self.name, duty, e),
        }
    }
}
