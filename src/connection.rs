//! Host link watchdog.
//!
//! Only ever downgrades the link: the protocol handler is the one place a
//! link becomes CONNECTED.

use log::info;

use crate::config::SystemConfig;
use crate::registers::{ConnectionStatus, RegisterFile};

pub struct ConnectionTracker {
    timeout_ms: u32,
}

impl ConnectionTracker {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            timeout_ms: config.connection_timeout_ms,
        }
    }

    /// Mark the link WAITING once no valid frame has arrived for longer
    /// than the timeout.  Returns `true` on the cycle the link drops.
    pub fn update(&self, regs: &mut RegisterFile, now_ms: u32) -> bool {
        let silent_ms = now_ms.wrapping_sub(regs.last_communication_ms());
        if silent_ms <= self.timeout_ms {
            return false;
        }
        let dropped = regs.connection_status() != Some(ConnectionStatus::Waiting);
        if dropped {
            info!("host link lost: silent for {} ms", silent_ms);
        }
        regs.set_connection_status(ConnectionStatus::Waiting);
        dropped
    }
}
