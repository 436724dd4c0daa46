//! GPIO / peripheral pin assignments for the TeCoLab board (ESP32-WROOM-32).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Power stage (logic-level MOSFETs on LEDC channels)
// ---------------------------------------------------------------------------

/// Heater 1 resistor bank.
pub const HEATER1_PWM_GPIO: i32 = 25;
/// Heater 2 resistor bank.
pub const HEATER2_PWM_GPIO: i32 = 26;
/// Cooler fan.
pub const COOLER_PWM_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Indicators (active HIGH)
// ---------------------------------------------------------------------------

/// Thermal status.
pub const LED_RED_GPIO: i32 = 32;
/// Host link status.
pub const LED_GREEN_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// DS18B20 probes, one per one-wire bus (external 4.7 kOhm pull-ups)
// ---------------------------------------------------------------------------

pub const ROOM_PROBE_GPIO: i32 = 4;
pub const HEATER1_PROBE_GPIO: i32 = 16;
pub const HEATER2_PROBE_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Host link (UART0, behind the on-board USB bridge)
// ---------------------------------------------------------------------------

pub const HOST_UART_TX_GPIO: i32 = 1;
pub const HOST_UART_RX_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Log console (UART1).  Applied through sdkconfig.defaults; the host link
// carries protocol bytes only.
// ---------------------------------------------------------------------------

pub const CONSOLE_UART_NUM: u32 = 1;
pub const CONSOLE_UART_TX_GPIO: i32 = 23;
pub const CONSOLE_UART_RX_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC duty that holds the output permanently high.  LEDC accepts
/// `0..=2^bits`, one step more than the timer counts, so register duty 255
/// maps here rather than to 255/256.
pub const PWM_FULL_ON_DUTY: u16 = 1 << PWM_RESOLUTION_BITS;
/// LEDC frequency shared by heaters and cooler.
pub const PWM_FREQ_HZ: u32 = 1_000;
