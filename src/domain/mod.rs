// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod book_side;
pub mod config;
pub mod order;
pub mod order_book;
pub mod trade;

pub use book_side::OrderBookSide;
pub use config::{ConfigError, EngineConfig, DEFAULT_MAX_ORDER_QUANTITY, DEFAULT_SNAPSHOT_DEPTH};
pub use order::{Order, OrderId, ParseSideError, Side, Timestamp};
pub use order_book::{OrderBook, OrderBookSnapshot};
pub use trade::Trade;
