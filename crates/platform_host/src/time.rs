//! Wall-clock helpers.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Millisecond clock that never repeats a value, even when called twice within one millisecond.
///
/// Each owner gets its own instance so tests do not share clock state.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_ms: Cell<u64>,
}

impl MonotonicClock {
    /// Creates a clock with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a timestamp strictly greater than every previous value from this clock.
    pub fn next_ms(&self) -> u64 {
        self.next_after(unix_time_ms_now())
    }

    fn next_after(&self, now: u64) -> u64 {
        let next = now.max(self.last_ms.get().saturating_add(1));
        self.last_ms.set(next);
        next
    }
}
