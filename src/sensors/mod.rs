//! Sensor subsystem: the three DS18B20 probes and the [`TemperatureMonitor`]
//! that samples them into the register file.
//!
//! Each sample reads the conversion started at the previous sample and
//! immediately starts the next one, so the loop never blocks on the probes.

pub mod dallas;
pub mod temperature;

use log::warn;

use crate::app::ports::TemperatureProbe;
use crate::config::SystemConfig;
use crate::registers::{RegisterFile, TemperatureStatus};
use temperature::{DISCONNECTED_C, Thresholds, classify, to_centi_celsius};

/// The rig's probe set.
pub struct Probes<P> {
    pub room: P,
    pub heater1: P,
    pub heater2: P,
}

/// One sample of all three probes, in Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReadings {
    pub room_c: f32,
    pub heater1_c: f32,
    pub heater2_c: f32,
    /// Status before and after this sample, when it changed.
    pub status_change: Option<(Option<TemperatureStatus>, TemperatureStatus)>,
}

/// Periodic sampler and thermal classifier.
pub struct TemperatureMonitor<P> {
    probes: Probes<P>,
    interval_ms: u32,
    thresholds: Thresholds,
}

impl<P: TemperatureProbe> TemperatureMonitor<P> {
    pub fn new(config: &SystemConfig, probes: Probes<P>) -> Self {
        Self {
            probes,
            interval_ms: config.conversion_interval_ms,
            thresholds: Thresholds {
                high_c: config.high_temperature_c,
                overheat_c: config.overheat_temperature_c,
            },
        }
    }

    /// Start the first conversion so the first sample reads real data
    /// rather than the probes' power-on value.
    pub fn start(&mut self) {
        for (name, probe) in self.probes_mut() {
            if let Err(e) = probe.request_conversion() {
                warn!("{name} probe: initial conversion failed: {e}");
            }
        }
    }

    /// Sample the probes if a conversion interval has elapsed since the
    /// last sample.  Returns the readings when a sample was taken.
    pub fn poll(&mut self, regs: &mut RegisterFile, now_ms: u32) -> Option<ProbeReadings> {
        if now_ms.wrapping_sub(regs.last_conversion_ms()) < self.interval_ms {
            return None;
        }
        regs.set_last_conversion_ms(now_ms);

        let room_c = read_or_sentinel("room", &mut self.probes.room);
        let heater1_c = read_or_sentinel("heater1", &mut self.probes.heater1);
        let heater2_c = read_or_sentinel("heater2", &mut self.probes.heater2);

        regs.set_room_temp(to_centi_celsius(room_c));
        regs.set_heater1_temp(to_centi_celsius(heater1_c));
        regs.set_heater2_temp(to_centi_celsius(heater2_c));

        for (name, probe) in self.probes_mut() {
            if let Err(e) = probe.request_conversion() {
                warn!("{name} probe: conversion request failed: {e}");
            }
        }

        let before = regs.temperature_status();
        let after = classify(before, heater1_c, heater2_c, self.thresholds);
        let mut status_change = None;
        if let Some(status) = after {
            if after != before {
                regs.set_temperature_status(status);
                status_change = Some((before, status));
            }
        }

        Some(ProbeReadings {
            room_c,
            heater1_c,
            heater2_c,
            status_change,
        })
    }

    fn probes_mut(&mut self) -> [(&'static str, &mut P); 3] {
        [
            ("room", &mut self.probes.room),
            ("heater1", &mut self.probes.heater1),
            ("heater2", &mut self.probes.heater2),
        ]
    }
}

/// A probe that cannot be read reports the disconnected sentinel.
fn read_or_sentinel<P: TemperatureProbe>(name: &str, probe: &mut P) -> f32 {
    match probe.last_celsius() {
        Ok(c) => c,
        Err(e) => {
            warn!("{name} probe: read failed: {e}");
            DISCONNECTED_C
        }
    }
}
