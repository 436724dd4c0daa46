//! One-shot hardware peripheral initialization.
//!
//! Configures the LEDC power stage, the LED GPIOs, the probe buses and the
//! host UART, then hands back typed drivers.  Called once from `main()` before
//! the loop starts.  Pin numbers come from [`crate::pins`].

use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::{
    AnyIOPin, AnyInputPin, AnyOutputPin, InputOutput, Output, PinDriver, Pull,
};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::uart::{UART0, UartDriver, config::Config as UartConfig};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::{
    EspError, ledc_channel_t_LEDC_CHANNEL_0, ledc_channel_t_LEDC_CHANNEL_1,
    ledc_channel_t_LEDC_CHANNEL_2,
};
use log::{info, warn};
use one_wire_bus::OneWire;

use crate::adapters::hardware::HardwareAdapter;
use crate::config::SystemConfig;
use crate::drivers::ledc::{self, LedcChannel};
use crate::error::HwInitError;
use crate::pins;
use crate::sensors::Probes;
use crate::sensors::dallas::DallasProbe;

pub type PwmChannel = LedcChannel;
pub type LedPin = PinDriver<'static, AnyOutputPin, Output>;
pub type ProbePin = PinDriver<'static, AnyIOPin, InputOutput>;
pub type Probe = DallasProbe<ProbePin, Ets>;

/// Everything the loop needs from the board.
pub struct Board {
    pub hardware: HardwareAdapter<PwmChannel, LedPin>,
    pub probes: Probes<Probe>,
    pub uart: UartDriver<'static>,
}

pub fn init_board(peripherals: Peripherals, config: &SystemConfig) -> Result<Board, HwInitError> {
    let hardware = init_outputs()?;
    let probes = init_probes(config)?;
    let uart = init_uart(peripherals.uart0, config)?;
    info!("hw_init: all peripherals configured");
    Ok(Board {
        hardware,
        probes,
        uart,
    })
}

// ── LEDC PWM + LEDs ──────────────────────────────────────────

fn init_outputs() -> Result<HardwareAdapter<PwmChannel, LedPin>, HwInitError> {
    let gpio_err = |e: EspError| HwInitError::GpioConfigFailed(e.code());

    ledc::init_timer()?;
    let heater1 = LedcChannel::new(ledc_channel_t_LEDC_CHANNEL_0, pins::HEATER1_PWM_GPIO)?;
    let heater2 = LedcChannel::new(ledc_channel_t_LEDC_CHANNEL_1, pins::HEATER2_PWM_GPIO)?;
    let cooler = LedcChannel::new(ledc_channel_t_LEDC_CHANNEL_2, pins::COOLER_PWM_GPIO)?;

    // SAFETY: each GPIO number below is claimed exactly once, here, and the
    // pin peripherals are never taken through `Peripherals::pins`.
    let (red, green) = unsafe {
        (
            AnyOutputPin::new(pins::LED_RED_GPIO),
            AnyOutputPin::new(pins::LED_GREEN_GPIO),
        )
    };
    let red = PinDriver::output(red).map_err(gpio_err)?;
    let green = PinDriver::output(green).map_err(gpio_err)?;

    info!("hw_init: LEDC configured (heater1=CH0, heater2=CH1, cooler=CH2)");
    Ok(HardwareAdapter::new(heater1, heater2, cooler, red, green))
}

// ── One-wire probes ──────────────────────────────────────────

fn init_probes(config: &SystemConfig) -> Result<Probes<Probe>, HwInitError> {
    let probe = |gpio: i32, name: &'static str| -> Result<Probe, HwInitError> {
        // SAFETY: one claim per probe GPIO, see `init_outputs`.
        let pin = unsafe { AnyIOPin::new(gpio) };
        let mut pin = PinDriver::input_output_od(pin)
            .map_err(|e| HwInitError::GpioConfigFailed(e.code()))?;
        if let Err(e) = pin.set_pull(Pull::Up) {
            warn!("hw_init: {name} probe pull-up not set ({e})");
        }
        let bus = OneWire::new(pin).map_err(|_| HwInitError::ProbeBusFailed(gpio))?;
        Ok(DallasProbe::new(name, bus, Ets, config.probe_resolution_bits))
    };

    let probes = Probes {
        room: probe(pins::ROOM_PROBE_GPIO, "room")?,
        heater1: probe(pins::HEATER1_PROBE_GPIO, "heater1")?,
        heater2: probe(pins::HEATER2_PROBE_GPIO, "heater2")?,
    };
    info!(
        "hw_init: DS18B20 buses on GPIO {}/{}/{} at {}-bit",
        pins::ROOM_PROBE_GPIO,
        pins::HEATER1_PROBE_GPIO,
        pins::HEATER2_PROBE_GPIO,
        config.probe_resolution_bits
    );
    Ok(probes)
}

// ── Host UART ────────────────────────────────────────────────

fn init_uart(
    uart: UART0,
    config: &SystemConfig,
) -> Result<UartDriver<'static>, HwInitError> {
    // SAFETY: the host link pins are claimed once, here.
    let (tx, rx) = unsafe {
        (
            AnyOutputPin::new(pins::HOST_UART_TX_GPIO),
            AnyInputPin::new(pins::HOST_UART_RX_GPIO),
        )
    };
    let driver = UartDriver::new(
        uart,
        tx,
        rx,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(config.uart_baud)),
    )
    .map_err(|e| HwInitError::UartInitFailed(e.code()))?;
    info!("hw_init: host UART0 at {} baud", config.uart_baud);
    Ok(driver)
}
