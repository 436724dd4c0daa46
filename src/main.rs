//! TeCoLab firmware entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   UartTransport   Esp32Time    │
//! │  (ActuatorPort)    (EventSink)    (Transport)     (Clock)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Protocol · Link · Probes · Safety over RegisterFile   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use log::info;

use tecolab::adapters::log_sink::LogEventSink;
use tecolab::adapters::time::Esp32TimeAdapter;
use tecolab::adapters::uart::UartTransport;
use tecolab::app::ports::Clock;
use tecolab::app::service::AppService;
use tecolab::config::SystemConfig;
use tecolab::drivers::hw_init::{self, Board};
use tecolab::drivers::watchdog::Watchdog;
use tecolab::error::Error;

/// The loop cycles every few milliseconds; anything near this is a hang.
const WATCHDOG_TIMEOUT_MS: u32 = 5_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  TeCoLab v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Hardware ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let Board {
        mut hardware,
        probes,
        uart,
    } = hw_init::init_board(peripherals, &config).map_err(Error::from)?;
    let mut transport = UartTransport::new(uart);
    let clock = Esp32TimeAdapter::new();
    let watchdog = Watchdog::new(WATCHDOG_TIMEOUT_MS);

    // ── 4. Application core ───────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(&config, probes);
    app.start(&mut sink);

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        app.tick(clock.now_ms(), &mut transport, &mut hardware, &mut sink);
        watchdog.feed();
        // Let the idle task run.
        FreeRtos::delay_ms(1);
    }
}
