// ============================================================================
// Order Book Domain Model
// ============================================================================

use rust_decimal::Decimal;
use std::fmt;

use super::{Order, OrderBookSide, Side};
use crate::numeric::{Price, Quantity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Book
// ============================================================================

/// Bid and ask sides of a single instrument.
///
/// The book is passive: it stores and orders resting orders but never matches.
#[derive(Debug)]
pub struct OrderBook {
    instrument: String,
    bids: OrderBookSide,
    asks: OrderBookSide,
}

impl OrderBook {
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            bids: OrderBookSide::new(Side::Buy),
            asks: OrderBookSide::new(Side::Sell),
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn add_buy(&mut self, order: Order) {
        self.bids.insert(order);
    }

    pub fn add_sell(&mut self, order: Order) {
        self.asks.insert(order);
    }

    /// Rest an order on the side it belongs to.
    pub fn add(&mut self, order: Order) {
        match order.side {
            Side::Buy => self.add_buy(order),
            Side::Sell => self.add_sell(order),
        }
    }

    pub fn has_buys(&self) -> bool {
        !self.bids.is_empty()
    }

    pub fn has_sells(&self) -> bool {
        !self.asks.is_empty()
    }

    pub fn peek_top_buy(&self) -> Option<Order> {
        self.bids.peek_best()
    }

    pub fn peek_top_sell(&self) -> Option<Order> {
        self.asks.peek_best()
    }

    pub fn pop_top_buy(&mut self) -> Option<Order> {
        self.bids.pop_best()
    }

    pub fn pop_top_sell(&mut self) -> Option<Order> {
        self.asks.pop_best()
    }

    pub fn buy_count(&self) -> usize {
        self.bids.len()
    }

    pub fn sell_count(&self) -> usize {
        self.asks.len()
    }

    pub fn bids(&self) -> &OrderBookSide {
        &self.bids
    }

    pub fn asks(&self) -> &OrderBookSide {
        &self.asks
    }

    pub fn side(&self, side: Side) -> &OrderBookSide {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut OrderBookSide {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    pub fn total_buy_quantity(&self) -> Quantity {
        self.bids.total_quantity()
    }

    pub fn total_sell_quantity(&self) -> Quantity {
        self.asks.total_quantity()
    }

    /// Best ask minus best bid, when both sides are quoted
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.checked_sub(bid).ok(),
            _ => None,
        }
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.to_decimal() + ask.to_decimal()) / Decimal::from(2)),
            _ => None,
        }
    }

    /// True if the best bid meets or exceeds the best ask.
    /// Never the case between two `process_order` calls.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Copy out up to `depth` orders per side.
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot {
            instrument: self.instrument.clone(),
            bids: self.bids.snapshot(depth),
            asks: self.asks.snapshot(depth),
            buy_count: self.bids.len(),
            sell_count: self.asks.len(),
            spread: self.spread(),
            mid_price: self.mid_price(),
        }
    }
}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable snapshot of the order book state
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    pub instrument: String,
    /// Best bids first
    pub bids: Vec<Order>,
    /// Best asks first
    pub asks: Vec<Order>,
    /// Total resting buy orders, including those beyond the snapshot depth
    pub buy_count: usize,
    /// Total resting sell orders, including those beyond the snapshot depth
    pub sell_count: usize,
    pub spread: Option<Price>,
    pub mid_price: Option<Decimal>,
}

impl OrderBookSnapshot {
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|order| order.price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|order| order.price)
    }

    fn write_side(
        f: &mut fmt::Formatter<'_>,
        orders: &[Order],
        total: usize,
        label: &str,
    ) -> fmt::Result {
        if orders.is_empty() {
            return writeln!(f, "  No {} orders", label);
        }
        for order in orders {
            writeln!(f, "  {}", order)?;
        }
        if total > orders.len() {
            writeln!(f, "  ... and {} more {} orders", total - orders.len(), label)?;
        }
        Ok(())
    }
}

impl fmt::Display for OrderBookSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== ORDER BOOK ==========")?;
        writeln!(f, "BUY ORDERS (Highest price first):")?;
        Self::write_side(f, &self.bids, self.buy_count, "buy")?;
        writeln!(f)?;
        writeln!(f, "SELL ORDERS (Lowest price first):")?;
        Self::write_side(f, &self.asks, self.sell_count, "sell")?;
        writeln!(f, "===============================")
    }
}
