// ============================================================================
// Sinks Module
// Persistent trade sinks
// ============================================================================

mod file_logger;

pub use file_logger::{FileTradeLogger, TradeLogFormat, DEFAULT_TRADE_LOG};
