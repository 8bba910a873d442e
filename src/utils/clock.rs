// ============================================================================
// Wall-Clock Helpers
// The engine never reads the clock; callers and sinks use these
// ============================================================================

use crate::domain::Timestamp;
use chrono::{Local, Utc};

/// Timestamp layout used by the persistent trade log
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Milliseconds since the Unix epoch
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis().max(0) as Timestamp
}

/// Local wall-clock time formatted as `YYYY-MM-DD HH:MM:SS`
pub fn log_time_string() -> String {
    Local::now().format(LOG_TIME_FORMAT).to_string()
}

/// Millisecond clock that never goes backwards.
///
/// Submission timestamps must be non-decreasing; a system clock step back
/// would otherwise hand the engine an out-of-order key.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Timestamp,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&mut self) -> Timestamp {
        self.last = self.last.max(now_millis());
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock() {
        let mut clock = MonotonicClock::new();
        let mut previous = clock.now();
        for _ in 0..100 {
            let next = clock.now();
            assert!(next >= previous);
            previous = next;
        }
    }

    #[test]
    fn test_log_time_layout() {
        let ts = log_time_string();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[13..14], ":");
    }
}
