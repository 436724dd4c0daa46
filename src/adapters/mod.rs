//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements    | Connects to                  |
//! |-------------|---------------|------------------------------|
//! | `hardware`  | ActuatorPort  | LEDC PWM, LED GPIOs          |
//! | `log_sink`  | EventSink     | Serial log output            |
//! | `time`      | Clock         | ESP32 system timer           |
//! | `uart`      | Transport     | Host link on UART0           |

pub mod hardware;
pub mod log_sink;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart;
