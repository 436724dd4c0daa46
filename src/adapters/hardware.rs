//! Hardware adapter: bridges the power stage and indicator LEDs to
//! [`ActuatorPort`].
//!
//! Generic over the `embedded-hal` PWM and pin traits, so the same adapter
//! drives LEDC channels on the target and recording fakes on the host.

use embedded_hal::digital::StatefulOutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, Led};
use crate::drivers::pwm::PwmOutput;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all outputs behind the port trait.
pub struct HardwareAdapter<C, P> {
    heater1: PwmOutput<C>,
    heater2: PwmOutput<C>,
    cooler: PwmOutput<C>,
    red: StatusLed<P>,
    green: StatusLed<P>,
}

impl<C: SetDutyCycle, P: StatefulOutputPin> HardwareAdapter<C, P> {
    /// Takes ownership of the channels and pins; all outputs start off.
    pub fn new(heater1: C, heater2: C, cooler: C, red: P, green: P) -> Self {
        let mut hw = Self {
            heater1: PwmOutput::new("heater1", heater1),
            heater2: PwmOutput::new("heater2", heater2),
            cooler: PwmOutput::new("cooler", cooler),
            red: StatusLed::new("red", red),
            green: StatusLed::new("green", green),
        };
        hw.red.off();
        hw.green.off();
        hw
    }

    /// Current duties, `(heater1, heater2, cooler)`.
    pub fn duties(&self) -> (u8, u8, u8) {
        (self.heater1.duty(), self.heater2.duty(), self.cooler.duty())
    }

    fn status_led(&mut self, led: Led) -> &mut StatusLed<P> {
        match led {
            Led::Red => &mut self.red,
            Led::Green => &mut self.green,
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<C: SetDutyCycle, P: StatefulOutputPin> ActuatorPort for HardwareAdapter<C, P> {
    fn set_heater1(&mut self, duty: u8) {
        self.heater1.set(duty);
    }

    fn set_heater2(&mut self, duty: u8) {
        self.heater2.set(duty);
    }

    fn set_cooler(&mut self, duty: u8) {
        self.cooler.set(duty);
    }

    fn led(&mut self, led: Led) -> bool {
        self.status_led(led).is_on()
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.status_led(led).set(on);
    }
}
