//! Simulation clock - decides when gravity fires
//!
//! The engine owns no timer. A driver passes a millisecond timestamp into every tick,
//! so the simulation is a pure function of the timestamps it receives.

/// Gravity clock keyed on caller-supplied timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulationClock {
    /// Timestamp of the last gravity drop; `None` until the first tick after a reset
    last_tick_ms: Option<u64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the reference timestamp; the next [`advance`](Self::advance) re-arms the clock.
    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn last_tick_ms(&self) -> Option<u64> {
        self.last_tick_ms
    }

    /// Milliseconds since the reference timestamp, clamped at zero when `now_ms` is behind it
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.last_tick_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        }
    }

    /// Advance to `now_ms`; returns true when a gravity drop is due.
    ///
    /// An unarmed clock only records `now_ms`. A due drop moves the reference to `now_ms`.
    pub fn advance(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        if self.last_tick_ms.is_none() {
            self.last_tick_ms = Some(now_ms);
            return false;
        }

        if self.elapsed_ms(now_ms) >= interval_ms as u64 {
            self.last_tick_ms = Some(now_ms);
            return true;
        }

        false
    }
}
