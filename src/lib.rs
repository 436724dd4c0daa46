//! TeCoLab firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod registers;
pub mod safety;

// Hardware-facing modules; the target-only parts are cfg-gated inside.
pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
