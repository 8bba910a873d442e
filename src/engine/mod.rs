// ============================================================================
// Engine Module
// Contains the core matching engine business logic
// ============================================================================

mod matching_engine;
mod price_time;
mod report;

pub mod factory;

#[cfg(test)]
mod proptests;

pub use factory::{create_from_config, MatchingEngineBuilder};
pub use matching_engine::{EngineStats, MatchingEngine};
pub use price_time::PriceTimeMatcher;
pub use report::{ExecutionReport, Fills, OrderStatus, RejectReason};
