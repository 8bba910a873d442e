// ============================================================================
// Execution Reports
// What the caller learns about one submitted order
// ============================================================================

use crate::domain::{OrderId, Trade};
use crate::numeric::{Price, Quantity};
use smallvec::SmallVec;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trades produced by a single submission. Most orders execute against a handful of makers.
pub type Fills = SmallVec<[Trade; 4]>;

/// Why an order was refused at admission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RejectReason {
    /// Limit price is zero or negative
    NonPositivePrice { price: Price },
    /// Nothing to trade
    ZeroQuantity,
    /// Risk check: order larger than the configured per-order maximum
    QuantityExceedsLimit { quantity: Quantity, max: Quantity },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NonPositivePrice { price } => {
                write!(f, "invalid price ${}: price must be positive", price)
            },
            RejectReason::ZeroQuantity => write!(f, "invalid quantity: quantity must be positive"),
            RejectReason::QuantityExceedsLimit { quantity, max } => write!(
                f,
                "quantity {} exceeds maximum allowed ({})",
                quantity, max
            ),
        }
    }
}

impl std::error::Error for RejectReason {}

/// Final outcome of `process_order`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderStatus {
    /// Fully executed on arrival; nothing rests
    Filled,
    /// Executed in part; the remainder rests on the book
    PartiallyFilledRested,
    /// Not marketable; rests on the book untouched
    Rested,
    /// Refused at admission; the book is unchanged
    Rejected(RejectReason),
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Filled => write!(f, "filled"),
            OrderStatus::PartiallyFilledRested => write!(f, "partially filled, remainder rested"),
            OrderStatus::Rested => write!(f, "rested"),
            OrderStatus::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Result of submitting one order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExecutionReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub filled_quantity: Quantity,
    /// Quantity left on the book by this order (0 when filled or rejected)
    pub resting_quantity: Quantity,
    /// Trades in execution order, exactly as delivered to the sink
    pub trades: Fills,
}

impl ExecutionReport {
    pub(crate) fn rejected(order_id: OrderId, reason: RejectReason) -> Self {
        Self {
            order_id,
            status: OrderStatus::Rejected(reason),
            filled_quantity: 0,
            resting_quantity: 0,
            trades: Fills::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.status, OrderStatus::Rejected(_))
    }

    pub fn is_accepted(&self) -> bool {
        !self.is_rejected()
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self.status {
            OrderStatus::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}
