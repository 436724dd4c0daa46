//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod blink;
#[cfg(target_os = "espidf")]
pub mod hw_init;
#[cfg(target_os = "espidf")]
pub mod ledc;
pub mod pwm;
pub mod status_led;
pub mod watchdog;
