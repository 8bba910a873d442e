// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::{NumericResult, Price, Quantity};
use std::fmt;

use super::{OrderId, Side, Timestamp};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single execution between a buy order and a sell order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trade {
    /// Execution sequence number, 1-based and gap-free per engine
    pub sequence: u64,

    pub buy_order_id: OrderId,

    pub sell_order_id: OrderId,

    /// Execution price (always the resting order's limit)
    pub price: Price,

    /// Executed quantity
    pub quantity: Quantity,

    /// Side of the incoming order that triggered the execution
    pub aggressor: Side,

    /// Submission timestamp of the aggressor
    pub timestamp: Timestamp,
}

impl Trade {
    pub fn new(
        sequence: u64,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
        aggressor: Side,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sequence,
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            aggressor,
            timestamp,
        }
    }

    /// Order ID of the passive order (resting in book)
    pub fn maker_order_id(&self) -> OrderId {
        match self.aggressor {
            Side::Buy => self.sell_order_id,
            Side::Sell => self.buy_order_id,
        }
    }

    /// Order ID of the aggressive order (incoming)
    pub fn taker_order_id(&self) -> OrderId {
        match self.aggressor {
            Side::Buy => self.buy_order_id,
            Side::Sell => self.sell_order_id,
        }
    }

    /// Calculate the notional value of the trade (price * quantity)
    ///
    /// Returns a Result because multiplication can overflow.
    pub fn notional_value(&self) -> NumericResult<Price> {
        self.price.checked_mul_quantity(self.quantity)
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade executed: BuyOrderID {} SellOrderID {} at price ${} for quantity {}",
            self.buy_order_id, self.sell_order_id, self.price, self.quantity
        )
    }
}
