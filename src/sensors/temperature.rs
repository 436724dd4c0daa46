//! Temperature conversion and thermal status classification.
//!
//! ## Dual-target design
//!
//! The classification and fixed-point helpers are pure and shared.  On
//! host/test builds a [`SimProbe`] stands in for the DS18B20, with its
//! temperature injected through an atomic the same way the real probe's
//! value arrives asynchronously.

use crate::registers::TemperatureStatus;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(not(target_os = "espidf"))]
use std::sync::Arc;

#[cfg(not(target_os = "espidf"))]
use crate::app::ports::TemperatureProbe;
#[cfg(not(target_os = "espidf"))]
use crate::error::SensorError;

/// Value reported for a probe that cannot be read (the DallasTemperature
/// "device disconnected" sentinel).
pub const DISCONNECTED_C: f32 = -127.0;

/// Store `celsius` as hundredths of a degree, rounded to nearest.
/// Saturates at the `i16` range; NaN maps to 0.
pub fn to_centi_celsius(celsius: f32) -> i16 {
    (celsius * 100.0).round() as i16
}

/// Heater thresholds, in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high_c: f32,
    pub overheat_c: f32,
}

/// Derive the next temperature status from the two heater readings.
///
/// The three checks run in order, each seeing the status left by the one
/// before.  Every check is an OR across the heaters, so with one heater
/// hot and the other cool the last check wins and the status is LOWTEMP.
/// Overheated is only ever set here, never cleared.
///
/// `None` in and out means the register holds a byte that is not a known
/// status and no check fired (only possible with NaN readings).
pub fn classify(
    current: Option<TemperatureStatus>,
    heater1_c: f32,
    heater2_c: f32,
    t: Thresholds,
) -> Option<TemperatureStatus> {
    let mut status = current;
    if heater1_c >= t.overheat_c || heater2_c >= t.overheat_c {
        status = Some(TemperatureStatus::Overheated);
    }
    if (heater1_c >= t.high_c || heater2_c >= t.high_c)
        && status != Some(TemperatureStatus::Overheated)
    {
        status = Some(TemperatureStatus::HighTemp);
    }
    if (heater1_c < t.high_c || heater2_c < t.high_c)
        && status != Some(TemperatureStatus::Overheated)
    {
        status = Some(TemperatureStatus::LowTemp);
    }
    status
}

// ── Simulated probe ───────────────────────────────────────────

/// Handle used to change what a [`SimProbe`] will measure next.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone)]
pub struct SimProbeHandle(Arc<AtomicU32>);

#[cfg(not(target_os = "espidf"))]
impl SimProbeHandle {
    pub fn set(&self, celsius: f32) {
        self.0.store(celsius.to_bits(), Ordering::Relaxed);
    }
}

/// In-memory probe.  A conversion latches the injected temperature; reads
/// return the latched value, so a change shows up one conversion later.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug)]
pub struct SimProbe {
    ambient: Arc<AtomicU32>,
    converted: f32,
}

#[cfg(not(target_os = "espidf"))]
impl SimProbe {
    /// A probe that reads `initial_c` from the start.
    pub fn new(initial_c: f32) -> (Self, SimProbeHandle) {
        let ambient = Arc::new(AtomicU32::new(initial_c.to_bits()));
        let probe = Self {
            ambient: Arc::clone(&ambient),
            converted: initial_c,
        };
        (probe, SimProbeHandle(ambient))
    }
}

#[cfg(not(target_os = "espidf"))]
impl TemperatureProbe for SimProbe {
    fn request_conversion(&mut self) -> Result<(), SensorError> {
        self.converted = f32::from_bits(self.ambient.load(Ordering::Relaxed));
        Ok(())
    }

    fn last_celsius(&mut self) -> Result<f32, SensorError> {
        Ok(self.converted)
    }
}
