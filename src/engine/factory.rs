// ============================================================================
// Matching Engine Factory
// Creates matching engines with validated configuration
// ============================================================================

use crate::domain::{ConfigError, EngineConfig};
use crate::engine::MatchingEngine;
use crate::interfaces::{NoOpTradeSink, TradeSink};
use crate::numeric::Quantity;
use std::sync::Arc;

/// Creates a matching engine from configuration
///
/// # Example
/// ```
/// use limit_order_engine::prelude::*;
/// use std::sync::Arc;
///
/// let config = EngineConfig::new("ACME");
/// let engine = create_from_config(config, Arc::new(NoOpTradeSink)).unwrap();
/// assert_eq!(engine.instrument(), "ACME");
/// ```
pub fn create_from_config(
    config: EngineConfig,
    sink: Arc<dyn TradeSink>,
) -> Result<MatchingEngine, ConfigError> {
    config.validate()?;
    Ok(MatchingEngine::new(config, sink))
}

/// Builder for creating matching engines with fluent API
///
/// # Example
/// ```
/// use limit_order_engine::prelude::*;
/// use std::sync::Arc;
///
/// let engine = MatchingEngineBuilder::new("ACME")
///     .max_order_quantity(500)
///     .snapshot_depth(10)
///     .trade_sink(Arc::new(LoggingTradeSink))
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.config().max_order_quantity, 500);
/// ```
pub struct MatchingEngineBuilder {
    config: EngineConfig,
    sink: Option<Arc<dyn TradeSink>>,
}

impl MatchingEngineBuilder {
    /// Create a new builder for the specified instrument
    pub fn new(instrument: impl Into<String>) -> Self {
        Self::from_config(EngineConfig::new(instrument))
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config, sink: None }
    }

    /// Set the per-order risk limit
    pub fn max_order_quantity(mut self, max: Quantity) -> Self {
        self.config.max_order_quantity = max;
        self
    }

    /// Set the default display depth
    pub fn snapshot_depth(mut self, depth: usize) -> Self {
        self.config.snapshot_depth = depth;
        self
    }

    /// Where executed trades go; trades are discarded if unset
    pub fn trade_sink(mut self, sink: Arc<dyn TradeSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Get the current configuration (for inspection)
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the configuration and start the engine
    pub fn build(self) -> Result<MatchingEngine, ConfigError> {
        let sink = self.sink.unwrap_or_else(|| Arc::new(NoOpTradeSink));
        create_from_config(self.config, sink)
    }
}
