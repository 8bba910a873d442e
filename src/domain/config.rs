// ============================================================================
// Engine Configuration
// ============================================================================

use crate::numeric::Quantity;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest quantity a single order may carry unless configured otherwise
pub const DEFAULT_MAX_ORDER_QUANTITY: Quantity = 1000;

/// Orders per side shown by a default book display
pub const DEFAULT_SNAPSHOT_DEPTH: usize = 5;

/// Configuration for a single-instrument matching engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// The traded instrument (e.g. "ACME")
    pub instrument: String,

    /// Risk limit: orders above this quantity are rejected at admission
    pub max_order_quantity: Quantity,

    /// Orders per side included by [`crate::engine::MatchingEngine::display_snapshot`]
    pub snapshot_depth: usize,
}

impl EngineConfig {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            max_order_quantity: DEFAULT_MAX_ORDER_QUANTITY,
            snapshot_depth: DEFAULT_SNAPSHOT_DEPTH,
        }
    }

    /// Builder method: Set the per-order quantity limit
    pub fn with_max_order_quantity(mut self, max: Quantity) -> Self {
        self.max_order_quantity = max;
        self
    }

    /// Builder method: Set the default snapshot depth
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.instrument.trim().is_empty() {
            return Err(ConfigError::EmptyInstrument);
        }

        if self.max_order_quantity == 0 {
            return Err(ConfigError::ZeroMaxOrderQuantity);
        }

        if self.snapshot_depth == 0 {
            return Err(ConfigError::ZeroSnapshotDepth);
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new("DEFAULT")
    }
}

/// Invalid engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyInstrument,
    ZeroMaxOrderQuantity,
    ZeroSnapshotDepth,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyInstrument => write!(f, "instrument cannot be empty"),
            ConfigError::ZeroMaxOrderQuantity => {
                write!(f, "maximum order quantity must be positive")
            },
            ConfigError::ZeroSnapshotDepth => write!(f, "snapshot depth must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
