// ============================================================================
// Order Domain Model
// ============================================================================

use crate::numeric::{Price, Quantity};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caller-supplied submission time. Opaque to the engine apart from ordering.
pub type Timestamp = u64;

// ============================================================================
// Value Objects
// ============================================================================

/// Order identifier, unique within a trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError(String);

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order side {:?}: expected 'buy' or 'sell'", self.0)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if trimmed.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(ParseSideError(s.to_string()))
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A limit order. Everything but the working quantity is fixed at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Quantity as submitted
    pub quantity: Quantity,
    pub timestamp: Timestamp,

    remaining_quantity: Quantity,
    /// Insertion sequence, assigned the first time the order rests on a book side
    sequence: Option<u64>,
}

impl Order {
    pub fn new(
        id: u64,
        side: Side,
        price: Price,
        quantity: Quantity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: OrderId::new(id),
            side,
            price,
            quantity,
            timestamp,
            remaining_quantity: quantity,
            sequence: None,
        }
    }

    pub fn buy(id: u64, price: Price, quantity: Quantity, timestamp: Timestamp) -> Self {
        Self::new(id, Side::Buy, price, quantity, timestamp)
    }

    pub fn sell(id: u64, price: Price, quantity: Quantity, timestamp: Timestamp) -> Self {
        Self::new(id, Side::Sell, price, quantity, timestamp)
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    pub fn filled_quantity(&self) -> Quantity {
        self.quantity.saturating_sub(self.remaining_quantity)
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Reduce the working quantity.
    /// Returns false, leaving the order untouched, if `quantity` exceeds what remains.
    pub fn fill(&mut self, quantity: Quantity) -> bool {
        match self.remaining_quantity.checked_sub(quantity) {
            Some(rest) => {
                self.remaining_quantity = rest;
                true
            },
            None => false,
        }
    }

    /// Whether this order's limit allows a trade at `book_price`.
    pub fn crosses(&self, book_price: Price) -> bool {
        match self.side {
            Side::Buy => self.price >= book_price,
            Side::Sell => self.price <= book_price,
        }
    }

    pub(crate) fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    pub(crate) fn assign_sequence(&mut self, sequence: u64) -> u64 {
        *self.sequence.get_or_insert(sequence)
    }

    pub(crate) fn clear_sequence(&mut self) {
        self.sequence = None;
    }

    /// Drop any book state the order carries so a submission starts from its
    /// declared `quantity` with no queue position.
    pub(crate) fn reset_for_submission(&mut self) {
        self.remaining_quantity = self.quantity;
        self.clear_sequence();
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order ID: {}, Type: {}, Price: ${}, Quantity: {}, Timestamp: {}",
            self.id, self.side, self.price, self.remaining_quantity, self.timestamp
        )
    }
}
