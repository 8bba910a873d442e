// ============================================================================
// Utilities Module
// Clock and logging helpers for code that drives the engine
// ============================================================================

mod clock;
#[cfg(feature = "logging")]
mod logging;

pub use clock::{log_time_string, now_millis, MonotonicClock, LOG_TIME_FORMAT};
#[cfg(feature = "logging")]
pub use logging::init_tracing;
