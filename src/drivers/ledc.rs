//! LEDC PWM channels for the power stage.
//!
//! Configured through the raw LEDC API rather than `LedcDriver`, whose duty
//! setter stops at `2^bits - 1`.  The hardware accepts `2^bits` as "always
//! high", which is what a heater or fan at 255 must get.

use embedded_hal::pwm::{Error as PwmError, ErrorKind, ErrorType, SetDutyCycle};
use esp_idf_svc::sys::*;
use log::info;

use crate::error::HwInitError;
use crate::pins;

const SPEED_MODE: ledc_mode_t = ledc_mode_t_LEDC_LOW_SPEED_MODE;
const TIMER: ledc_timer_t = ledc_timer_t_LEDC_TIMER_0;

/// Failed duty update, carrying the ESP-IDF error.
#[derive(Debug, Clone, Copy)]
pub struct LedcError(pub EspError);

impl PwmError for LedcError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One configured LEDC channel.  Exposes `0..=PWM_FULL_ON_DUTY` as its
/// duty range.
pub struct LedcChannel {
    channel: ledc_channel_t,
}

/// Configure the shared timer.  Must run before [`LedcChannel::new`].
pub fn init_timer() -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: SPEED_MODE,
        timer_num: TIMER,
        duty_resolution: pins::PWM_RESOLUTION_BITS,
        freq_hz: pins::PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: called once from the main task during init.
    esp!(unsafe { ledc_timer_config(&timer) }).map_err(|e| HwInitError::PwmInitFailed(e.code()))?;
    info!(
        "ledc: timer0 at {} Hz, {}-bit",
        pins::PWM_FREQ_HZ,
        pins::PWM_RESOLUTION_BITS
    );
    Ok(())
}

impl LedcChannel {
    /// Bind `channel` to `gpio` on the shared timer, starting at duty 0.
    pub fn new(channel: ledc_channel_t, gpio: i32) -> Result<Self, HwInitError> {
        let cfg = ledc_channel_config_t {
            speed_mode: SPEED_MODE,
            channel,
            timer_sel: TIMER,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: each channel/GPIO pair is configured once, from the main
        // task, after `init_timer`.
        esp!(unsafe { ledc_channel_config(&cfg) })
            .map_err(|e| HwInitError::PwmInitFailed(e.code()))?;
        Ok(Self { channel })
    }
}

impl ErrorType for LedcChannel {
    type Error = LedcError;
}

impl SetDutyCycle for LedcChannel {
    fn max_duty_cycle(&self) -> u16 {
        pins::PWM_FULL_ON_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), LedcError> {
        let duty = u32::from(duty.min(pins::PWM_FULL_ON_DUTY));
        // SAFETY: the channel was configured in `new`; only the main loop
        // writes duties.
        unsafe {
            esp!(ledc_set_duty(SPEED_MODE, self.channel, duty)).map_err(LedcError)?;
            esp!(ledc_update_duty(SPEED_MODE, self.channel)).map_err(LedcError)
        }
    }
}
