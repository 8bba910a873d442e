// ============================================================================
// Limit Order Engine Library
// Continuous double-auction matching for a single instrument
// ============================================================================

//! # Limit Order Engine
//!
//! A price-time priority matching engine for limit orders on one instrument.
//!
//! ## Features
//!
//! - **Two-sided order book** ordered by price, then submission time, then arrival
//! - **Price improvement for the aggressor**: every trade executes at the resting price
//! - **Admission control** with a configurable per-order quantity limit
//! - **Pluggable trade sinks** (tracing, in-memory, channel, append-only audit file)
//! - **Deterministic replay**: timestamps are injected, never read from the clock
//!
//! ## Example
//!
//! ```rust
//! use limit_order_engine::prelude::*;
//! use limit_order_engine::numeric::Price;
//! use std::sync::Arc;
//!
//! let sink = Arc::new(RecordingTradeSink::new());
//! let mut engine = MatchingEngineBuilder::new("ACME")
//!     .trade_sink(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! let price: Price = "100.00".parse().unwrap();
//! engine.process_order(Order::sell(1, price, 50, 1));
//! let report = engine.process_order(Order::buy(2, price, 50, 2));
//!
//! assert_eq!(report.status, OrderStatus::Filled);
//! assert_eq!(sink.trades().len(), 1);
//! println!("{}", engine.display_snapshot());
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod sinks;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ConfigError, EngineConfig, Order, OrderBook, OrderBookSide, OrderBookSnapshot, OrderId,
        Side, Timestamp, Trade,
    };
    pub use crate::engine::{
        create_from_config, EngineStats, ExecutionReport, MatchingEngine, MatchingEngineBuilder,
        OrderStatus, RejectReason,
    };
    pub use crate::interfaces::{
        ChannelTradeSink, FanOutTradeSink, LoggingTradeSink, NoOpTradeSink, RecordingTradeSink,
        SinkError, TradeSink,
    };
    pub use crate::sinks::{FileTradeLogger, TradeLogFormat};
}
