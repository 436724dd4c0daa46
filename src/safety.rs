//! Safety controller.
//!
//! Runs **every cycle, last**, after the protocol handler, the connection
//! tracker and the temperature monitor have updated the register file.  It
//! is the only code that drives the heaters, the cooler and the LEDs.
//!
//! ## Overheat override
//!
//! While the temperature status is OVERHEATED both heaters are forced off
//! and the cooler runs flat out, whatever the PWM registers say.  The host
//! can keep writing setpoints; they are stored but not applied.
//!
//! ## Indicators
//!
//! | LED   | on          | blinking  | off     |
//! |-------|-------------|-----------|---------|
//! | red   | OVERHEATED  | HIGHTEMP  | LOWTEMP |
//! | green | CONNECTED   | WAITING   | never   |
//!
//! A status byte the host overwrote with an unknown value leaves its LED
//! where it was.

use log::{error, info};

use crate::app::ports::{ActuatorPort, Led};
use crate::config::SystemConfig;
use crate::drivers::blink::BlinkTimer;
use crate::registers::{ConnectionStatus, RegisterFile, TemperatureStatus};

/// Duties applied to the power stage in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorOutputs {
    pub heater1: u8,
    pub heater2: u8,
    pub cooler: u8,
}

impl ActuatorOutputs {
    /// Heaters off, cooler at full speed.
    pub const OVERHEAT: Self = Self {
        heater1: 0,
        heater2: 0,
        cooler: 255,
    };
}

/// Safety controller.
pub struct SafetyController {
    blink: BlinkTimer,
    /// Whether the overheat override was applied last cycle.
    overriding: bool,
}

impl SafetyController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            blink: BlinkTimer::new(config.blink_period_ms),
            overriding: false,
        }
    }

    /// Apply the register file to the hardware.
    pub fn update(
        &mut self,
        regs: &RegisterFile,
        hw: &mut impl ActuatorPort,
        now_ms: u32,
    ) -> ActuatorOutputs {
        let overheated = regs.is_overheated();
        if overheated != self.overriding {
            if overheated {
                error!("SAFETY OVERRIDE SET: overheated, heaters off, cooler full");
            } else {
                info!("SAFETY OVERRIDE CLEARED: following PWM registers");
            }
            self.overriding = overheated;
        }

        // ── Power stage ───────────────────────────────────────────
        let out = if overheated {
            ActuatorOutputs::OVERHEAT
        } else {
            ActuatorOutputs {
                heater1: regs.heater1_pwm(),
                heater2: regs.heater2_pwm(),
                cooler: regs.cooler_pwm(),
            }
        };
        hw.set_heater1(out.heater1);
        hw.set_heater2(out.heater2);
        hw.set_cooler(out.cooler);

        // ── Indicators ────────────────────────────────────────────
        let blink = self.blink.update(now_ms);

        let red = regs.temperature_status().map(|s| match s {
            TemperatureStatus::Overheated => true,
            TemperatureStatus::HighTemp => blink,
            TemperatureStatus::LowTemp => false,
        });
        let green = regs.connection_status().map(|s| match s {
            ConnectionStatus::Connected => true,
            ConnectionStatus::Waiting => blink,
        });

        if let Some(level) = red {
            drive_led(hw, Led::Red, level);
        }
        if let Some(level) = green {
            drive_led(hw, Led::Green, level);
        }

        out
    }

    pub fn is_overriding(&self) -> bool {
        self.overriding
    }
}

/// Write the LED only when its level differs.
fn drive_led(hw: &mut impl ActuatorPort, led: Led, level: bool) {
    if hw.led(led) != level {
        hw.set_led(led, level);
    }
}
