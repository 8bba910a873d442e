// ============================================================================
// Interfaces Module
// Contains the trade sink contract and its in-process implementations
// ============================================================================

mod trade_sink;

pub use trade_sink::{
    ChannelTradeSink, FanOutTradeSink, LoggingTradeSink, NoOpTradeSink, RecordingTradeSink,
    SinkError, TradeSink,
};
