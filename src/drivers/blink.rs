//! Shared blink phase for the indicator LEDs.
//!
//! One timer serves both LEDs so a red and a green LED blinking at the same
//! time stay in phase.

/// Square wave with a fixed half period, advanced by polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkTimer {
    period_ms: u32,
    last_toggle_ms: u32,
    level: bool,
}

impl BlinkTimer {
    /// Starts high, with the first toggle one period after t = 0.
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_toggle_ms: 0,
            level: true,
        }
    }

    /// Advance to `now_ms` and return the current level.
    ///
    /// Toggles at most once per call; a late poll does not catch up on
    /// missed edges.
    pub fn update(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_toggle_ms) >= self.period_ms {
            self.level = !self.level;
            self.last_toggle_ms = now_ms;
        }
        self.level
    }

    pub fn level(&self) -> bool {
        self.level
    }
}
