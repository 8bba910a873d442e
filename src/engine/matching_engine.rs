// ============================================================================
// Matching Engine
// Core business logic for order admission and matching
// ============================================================================

use crate::domain::{EngineConfig, Order, OrderBook, OrderBookSnapshot};
use crate::engine::price_time::PriceTimeMatcher;
use crate::engine::report::{ExecutionReport, Fills, OrderStatus, RejectReason};
use crate::interfaces::TradeSink;
use crate::numeric::Quantity;
use std::sync::Arc;

/// Running counters for one engine session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub orders_received: u64,
    pub orders_accepted: u64,
    pub orders_rejected: u64,
    pub trades_executed: u64,
    /// Units traded, counted once per trade
    pub volume_traded: Quantity,
    /// Trades the sink failed to record (the trades themselves stand)
    pub sink_failures: u64,
}

/// Single-instrument continuous double-auction matching engine.
///
/// Orders are processed strictly one at a time: `process_order` takes `&mut self`,
/// so the book can never be observed mid-match. Trades go to the configured
/// [`TradeSink`] synchronously, in execution order.
pub struct MatchingEngine {
    config: EngineConfig,

    /// Bid and ask sides, owned exclusively by the engine
    book: OrderBook,

    /// Price/time matching loop and trade sequencing
    matcher: PriceTimeMatcher,

    /// Destination for every execution
    sink: Arc<dyn TradeSink>,

    stats: EngineStats,
}

impl MatchingEngine {
    /// Create a new matching engine and open the sink's trading session.
    ///
    /// The configuration is taken as-is; use [`crate::engine::MatchingEngineBuilder`]
    /// to have it validated first.
    pub fn new(config: EngineConfig, sink: Arc<dyn TradeSink>) -> Self {
        if let Err(err) = sink.on_session_start() {
            tracing::error!(error = %err, "trade sink failed to start session");
        }
        tracing::debug!(
            instrument = %config.instrument,
            max_order_quantity = config.max_order_quantity,
            "matching engine started"
        );

        Self {
            book: OrderBook::new(config.instrument.clone()),
            config,
            matcher: PriceTimeMatcher::new(),
            sink,
            stats: EngineStats::default(),
        }
    }

    /// Submit an order to the matching engine
    ///
    /// The order is validated and risk-checked, matched against the opposite side
    /// while marketable, and any remainder rests on its own side.
    pub fn process_order(&mut self, mut order: Order) -> ExecutionReport {
        self.stats.orders_received += 1;
        order.reset_for_submission();

        if let Err(reason) = self.admit(&order) {
            self.stats.orders_rejected += 1;
            tracing::warn!(order_id = %order.id, %reason, "order rejected");
            return ExecutionReport::rejected(order.id, reason);
        }

        self.stats.orders_accepted += 1;
        tracing::debug!(
            order_id = %order.id,
            side = %order.side,
            price = %order.price,
            quantity = order.quantity,
            timestamp = order.timestamp,
            "processing order"
        );

        let mut incoming = order;
        let trades = self.execute(&mut incoming);

        let filled_quantity = incoming.filled_quantity();
        let resting_quantity = incoming.remaining_quantity();
        let order_id = incoming.id;

        let status = if resting_quantity == 0 {
            OrderStatus::Filled
        } else {
            tracing::debug!(
                order_id = %order_id,
                side = %incoming.side,
                price = %incoming.price,
                quantity = resting_quantity,
                "order rested"
            );
            self.book.add(incoming);
            if filled_quantity > 0 {
                OrderStatus::PartiallyFilledRested
            } else {
                OrderStatus::Rested
            }
        };

        debug_assert!(!self.book.is_crossed(), "book crossed after matching");

        ExecutionReport {
            order_id,
            status,
            filled_quantity,
            resting_quantity,
            trades,
        }
    }

    /// Snapshot of the best `depth` orders per side
    pub fn snapshot(&self, depth: usize) -> OrderBookSnapshot {
        self.book.snapshot(depth)
    }

    /// Snapshot at the configured display depth
    pub fn display_snapshot(&self) -> OrderBookSnapshot {
        self.book.snapshot(self.config.snapshot_depth)
    }

    pub fn order_book(&self) -> &OrderBook {
        &self.book
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn instrument(&self) -> &str {
        &self.config.instrument
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    /// Validation first, then the risk limit
    fn admit(&self, order: &Order) -> Result<(), RejectReason> {
        if !order.price.is_positive() {
            return Err(RejectReason::NonPositivePrice { price: order.price });
        }

        let quantity = order.remaining_quantity();
        if quantity == 0 {
            return Err(RejectReason::ZeroQuantity);
        }

        if quantity > self.config.max_order_quantity {
            return Err(RejectReason::QuantityExceedsLimit {
                quantity,
                max: self.config.max_order_quantity,
            });
        }

        Ok(())
    }

    /// Run the matching loop against the opposite side, forwarding each trade to the sink.
    fn execute(&mut self, incoming: &mut Order) -> Fills {
        let Self {
            book,
            matcher,
            sink,
            stats,
            ..
        } = self;

        let opposite = book.side_mut(incoming.side.opposite());

        let mut fills = Fills::new();
        matcher.match_order(incoming, opposite, |trade| {
            stats.trades_executed += 1;
            stats.volume_traded += trade.quantity;

            if let Err(err) = sink.log_trade(&trade) {
                stats.sink_failures += 1;
                tracing::error!(
                    sequence = trade.sequence,
                    error = %err,
                    "trade sink failed to record trade; trade stands"
                );
            }

            fills.push(trade);
        });

        fills
    }
}

impl Drop for MatchingEngine {
    fn drop(&mut self) {
        if let Err(err) = self.sink.on_session_end() {
            tracing::error!(error = %err, "trade sink failed to end session");
        }
        tracing::debug!(
            instrument = %self.config.instrument,
            trades = self.stats.trades_executed,
            "matching engine stopped"
        );
    }
}
