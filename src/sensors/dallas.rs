//! DS18B20 probe on its own one-wire bus.
//!
//! Thin wrapper over `one_wire_bus::OneWire` and `ds18b20::Ds18b20`.  Each
//! bus carries one probe; its ROM address is found by search the first time
//! the bus answers, and the configured resolution is written to it then.
//! A probe that stops answering is forgotten and searched for again on the
//! next conversion request, so a replugged probe comes back on its own.

use core::fmt::Debug;

use ds18b20::{Ds18b20, Resolution};
use embedded_hal_p2::blocking::delay::{DelayMs, DelayUs};
use embedded_hal_p2::digital::v2::{InputPin, OutputPin};
use log::{info, warn};
use one_wire_bus::{OneWire, OneWireError};

use crate::app::ports::TemperatureProbe;
use crate::error::SensorError;

/// Alarm registers are unused; write back the power-on values.
const ALARM_LOW_C: i8 = 70;
const ALARM_HIGH_C: i8 = 75;

/// Resolution for a 9-12-bit setting; out-of-range values clamp.
pub fn resolution(bits: u8) -> Resolution {
    match bits {
        0..=9 => Resolution::Bits9,
        10 => Resolution::Bits10,
        11 => Resolution::Bits11,
        _ => Resolution::Bits12,
    }
}

fn sensor_error<E>(e: OneWireError<E>) -> SensorError {
    match e {
        OneWireError::CrcMismatch => SensorError::CrcMismatch,
        OneWireError::PinError(_) => SensorError::PinFault,
        _ => SensorError::BusFault,
    }
}

pub struct DallasProbe<P, D> {
    name: &'static str,
    bus: OneWire<P>,
    delay: D,
    resolution: Resolution,
    sensor: Option<Ds18b20>,
}

impl<P, E, D> DallasProbe<P, D>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
    E: Debug,
    D: DelayUs<u16> + DelayMs<u16>,
{
    /// Wrap `bus` and try to attach its probe.  A missing probe is not an
    /// error here; it is retried on every conversion request.
    pub fn new(name: &'static str, bus: OneWire<P>, delay: D, resolution_bits: u8) -> Self {
        let mut probe = Self {
            name,
            bus,
            delay,
            resolution: resolution(resolution_bits),
            sensor: None,
        };
        if let Err(e) = probe.attach() {
            warn!("{name} probe: not attached ({e}), will retry");
        }
        probe
    }

    pub fn is_attached(&self) -> bool {
        self.sensor.is_some()
    }

    /// Worst-case conversion time at the configured resolution.
    pub fn conversion_time_ms(&self) -> u16 {
        self.resolution.max_measurement_time_millis()
    }

    fn attach(&mut self) -> Result<(), SensorError> {
        let mut found = None;
        for address in self.bus.devices(false, &mut self.delay) {
            let address = address.map_err(sensor_error)?;
            if address.family_code() == ds18b20::FAMILY_CODE {
                found = Some(address);
                break;
            }
        }
        let address = found.ok_or(SensorError::NoPresence)?;

        let sensor = Ds18b20::new::<E>(address).map_err(sensor_error)?;
        sensor
            .set_config(
                ALARM_LOW_C,
                ALARM_HIGH_C,
                self.resolution,
                &mut self.bus,
                &mut self.delay,
            )
            .map_err(sensor_error)?;
        info!("{} probe: DS18B20 {:016X} attached", self.name, address.0);
        self.sensor = Some(sensor);
        Ok(())
    }
}

impl<P, E, D> TemperatureProbe for DallasProbe<P, D>
where
    P: InputPin<Error = E> + OutputPin<Error = E>,
    E: Debug,
    D: DelayUs<u16> + DelayMs<u16>,
{
    fn request_conversion(&mut self) -> Result<(), SensorError> {
        if self.sensor.is_none() {
            self.attach()?;
        }
        let Some(sensor) = &self.sensor else {
            return Err(SensorError::NoPresence);
        };
        sensor
            .start_temp_measurement(&mut self.bus, &mut self.delay)
            .map_err(sensor_error)
    }

    fn last_celsius(&mut self) -> Result<f32, SensorError> {
        let Some(sensor) = &self.sensor else {
            return Err(SensorError::NoPresence);
        };
        match sensor.read_data(&mut self.bus, &mut self.delay) {
            Ok(data) => Ok(data.temperature),
            Err(e) => {
                self.sensor = None;
                Err(sensor_error(e))
            }
        }
    }
}
