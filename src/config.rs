//! System configuration parameters
//!
//! All timing and threshold constants for the TeCoLab rig.  The defaults
//! are the firmware's runtime contract; there is no configuration file
//! and nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thermal safety ---
    /// Heater temperature (Celsius) at which actuators are overridden
    pub overheat_temperature_c: f32,
    /// Heater temperature (Celsius) that raises the high-temperature warning
    pub high_temperature_c: f32,

    // --- Probes ---
    /// Interval between probe samples (milliseconds); must cover the
    /// conversion time at the configured resolution
    pub conversion_interval_ms: u32,
    /// DS18B20 resolution (9–12 bits)
    pub probe_resolution_bits: u8,

    // --- Host link ---
    /// Silence (milliseconds) after which the link drops back to WAITING
    pub connection_timeout_ms: u32,
    /// UART baud rate of the host link
    pub uart_baud: u32,

    // --- Indicators ---
    /// Half period of the blinking LEDs (milliseconds)
    pub blink_period_ms: u32,

    // --- Diagnostics ---
    /// Interval between telemetry log lines (milliseconds)
    pub telemetry_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thermal safety
            overheat_temperature_c: 100.0,
            high_temperature_c: 50.0,

            // Probes
            conversion_interval_ms: 100, // 9-bit conversion is 93.75 ms
            probe_resolution_bits: 9,

            // Host link
            connection_timeout_ms: 2000,
            uart_baud: 115_200,

            // Indicators
            blink_period_ms: 250,

            // Diagnostics
            telemetry_interval_ms: 5_000,
        }
    }
}

impl SystemConfig {
    /// Reject values that would break the safety loop or the probe driver.
    pub fn validate(&self) -> Result<()> {
        if self.high_temperature_c >= self.overheat_temperature_c {
            return Err(Error::Config("high temperature must be below overheat temperature"));
        }
        if self.conversion_interval_ms == 0 {
            return Err(Error::Config("conversion interval must be non-zero"));
        }
        if !(9..=12).contains(&self.probe_resolution_bits) {
            return Err(Error::Config("probe resolution must be 9-12 bits"));
        }
        if self.connection_timeout_ms == 0
            || self.blink_period_ms == 0
            || self.telemetry_interval_ms == 0
        {
            return Err(Error::Config("timeouts and periods must be non-zero"));
        }
        Ok(())
    }
}
