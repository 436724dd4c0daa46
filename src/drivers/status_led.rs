//! Indicator LED on a plain GPIO.
//!
//! The pin's own output latch is the source of truth for the current
//! level, read back through `StatefulOutputPin`.  A pin error is logged
//! and treated as "off".

use embedded_hal::digital::StatefulOutputPin;
use log::warn;

pub struct StatusLed<P> {
    name: &'static str,
    pin: P,
}

impl<P: StatefulOutputPin> StatusLed<P> {
    pub fn new(name: &'static str, pin: P) -> Self {
        Self { name, pin }
    }

    pub fn is_on(&mut self) -> bool {
        match self.pin.is_set_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("{} LED: read-back failed: {:?}", self.name, e);
                false
            }
        }
    }

    pub fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("{} LED: write failed: {:?}", self.name, e);
        }
    }

    pub fn off(&mut self) {
        self.set(false);
    }
}
