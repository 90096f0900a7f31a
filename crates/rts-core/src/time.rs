//! Tick-based time
//!
//! The scheduler's only unit of time is the game tick, running at a fixed
//! [`TICRATE`] ticks per second.

use serde::{Deserialize, Serialize};

/// A discrete tick counter
pub type Tick = u64;

/// Game ticks per second
pub const TICRATE: i32 = 35;

/// Convert seconds to the nearest whole number of ticks
pub fn seconds_to_ticks(seconds: f32) -> i32 {
    (seconds * TICRATE as f32).round() as i32
}

/// Level clock, counting ticks since the triggers were spawned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Current tick number
    pub tick: Tick,
}

impl Clock {
    /// Create a new clock
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    /// Advance to the next tick
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Reset to tick zero
    pub fn reset(&mut self) {
        self.tick = 0;
    }
}
