//! Port traits: the boundary between the control loop and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Probes, actuators, clocks and event sinks implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the loop never touches hardware directly and runs unchanged against
//! the mocks in `tests/`.

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Temperature probe (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One temperature probe with an asynchronous conversion.
///
/// A conversion takes an implementation-defined time; the value returned
/// by [`last_celsius`](Self::last_celsius) is the result of the *previous*
/// [`request_conversion`](Self::request_conversion).
pub trait TemperatureProbe {
    /// Kick off a new conversion.  Must not wait for it to finish.
    fn request_conversion(&mut self) -> Result<(), SensorError>;

    /// Most recently completed conversion, in degrees Celsius.
    fn last_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The two indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    /// Thermal state.
    Red,
    /// Host link state.
    Green,
}

/// Write-side port: PWM outputs and indicator LEDs.
pub trait ActuatorPort {
    /// Heater 1 duty, 0–255.
    fn set_heater1(&mut self, duty: u8);

    /// Heater 2 duty, 0–255.
    fn set_heater2(&mut self, duty: u8);

    /// Cooler fan duty, 0–255.
    fn set_cooler(&mut self, duty: u8);

    /// Level the LED output is currently driven to.
    fn led(&mut self, led: Led) -> bool;

    fn set_led(&mut self, led: Led, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.  Wraps after ~49 days; every consumer
/// compares timestamps with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
