// ============================================================================
// Price/Time Priority Matching Algorithm (FIFO)
// ============================================================================

use crate::domain::{Order, OrderBookSide, Side, Trade};

/// Price/Time Priority (FIFO) matching
///
/// The incoming order trades against the best resting order of the opposite side
/// for as long as its limit crosses that order's price. Every execution happens at
/// the resting order's price, so the aggressor never pays worse than its limit.
/// Orders at the same price level are consumed in time priority order.
///
/// # Example
/// ```text
/// Book:  asks 100.00 x 10 (Order A, t=1)
///             100.00 x 10 (Order B, t=2)
///
/// Incoming: Buy 15 @ 100.00
/// Result: 10 with A, then 5 with B; B rests with 5
/// ```
#[derive(Debug, Default)]
pub struct PriceTimeMatcher {
    /// Sequence number of the last trade produced
    last_trade_sequence: u64,
}

impl PriceTimeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total trades produced so far
    pub fn trades_executed(&self) -> u64 {
        self.last_trade_sequence
    }

    /// Match `incoming` against `opposite` until it is exhausted or no longer marketable.
    ///
    /// `on_trade` is invoked once per execution, in execution order. Partially
    /// filled makers go back on `opposite` with their queue position intact; the
    /// caller decides what to do with whatever remains of `incoming`.
    pub fn match_order(
        &mut self,
        incoming: &mut Order,
        opposite: &mut OrderBookSide,
        mut on_trade: impl FnMut(Trade),
    ) {
        debug_assert_eq!(opposite.side(), incoming.side.opposite());

        while incoming.remaining_quantity() > 0 {
            let best_price = match opposite.best_price() {
                Some(price) => price,
                None => break,
            };

            if !incoming.crosses(best_price) {
                break;
            }

            let mut maker = match opposite.pop_best() {
                Some(order) => order,
                None => break,
            };

            let quantity = incoming.remaining_quantity().min(maker.remaining_quantity());
            let filled = incoming.fill(quantity) && maker.fill(quantity);
            debug_assert!(filled, "fill quantity is bounded by both remainders");

            let (buy_order_id, sell_order_id) = match incoming.side {
                Side::Buy => (incoming.id, maker.id),
                Side::Sell => (maker.id, incoming.id),
            };

            self.last_trade_sequence += 1;
            let trade = Trade::new(
                self.last_trade_sequence,
                buy_order_id,
                sell_order_id,
                maker.price,
                quantity,
                incoming.side,
                incoming.timestamp,
            );

            tracing::trace!(
                sequence = trade.sequence,
                maker = %maker.id,
                maker_remaining = maker.remaining_quantity(),
                "execution"
            );

            on_trade(trade);

            if !maker.is_filled() {
                opposite.reinsert(maker);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Price;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    fn run(matcher: &mut PriceTimeMatcher, incoming: &mut Order, side: &mut OrderBookSide) -> Vec<Trade> {
        let mut trades = Vec::new();
        matcher.match_order(incoming, side, |trade| trades.push(trade));
        trades
    }

    #[test]
    fn test_price_time_fifo_order() {
        let mut matcher = PriceTimeMatcher::new();
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 1, 1));
        asks.insert(Order::sell(2, price(10_000), 1, 2));

        let mut buy = Order::buy(3, price(10_000), 1, 3);
        let trades = run(&mut matcher, &mut buy, &mut asks);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].maker_order_id().value(), 1);
        assert_eq!(asks.peek_best().unwrap().id.value(), 2);
    }

    #[test]
    fn test_price_time_partial_fill() {
        let mut matcher = PriceTimeMatcher::new();
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 1, 1));

        let mut buy = Order::buy(2, price(10_000), 2, 2);
        let trades = run(&mut matcher, &mut buy, &mut asks);

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, 1);
        assert_eq!(buy.remaining_quantity(), 1);
        assert!(asks.is_empty());
    }

    #[test]
    fn test_resting_maker_is_reinserted() {
        let mut matcher = PriceTimeMatcher::new();
        let mut bids = OrderBookSide::new(Side::Buy);
        bids.insert(Order::buy(1, price(10_000), 10, 1));
        bids.insert(Order::buy(2, price(10_000), 10, 2));

        let mut sell = Order::sell(3, price(9_000), 4, 3);
        let trades = run(&mut matcher, &mut sell, &mut bids);

        assert_eq!(trades.len(), 1);
        // sell aggressor trades at the bid's price
        assert_eq!(trades[0].price, price(10_000));
        assert_eq!(trades[0].buy_order_id.value(), 1);
        assert_eq!(trades[0].sell_order_id.value(), 3);

        let top = bids.peek_best().unwrap();
        assert_eq!(top.id.value(), 1);
        assert_eq!(top.remaining_quantity(), 6);
    }

    #[test]
    fn test_stops_at_non_marketable_level() {
        let mut matcher = PriceTimeMatcher::new();
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(9_900), 10, 1));
        asks.insert(Order::sell(2, price(10_100), 10, 2));

        let mut buy = Order::buy(3, price(10_000), 25, 3);
        let trades = run(&mut matcher, &mut buy, &mut asks);

        assert_eq!(trades.len(), 1);
        assert_eq!(buy.remaining_quantity(), 15);
        assert_eq!(asks.best_price(), Some(price(10_100)));
    }

    #[test]
    fn test_trade_sequence_continues_across_calls() {
        let mut matcher = PriceTimeMatcher::new();
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 1, 1));
        asks.insert(Order::sell(2, price(10_000), 1, 2));

        let first = run(&mut matcher, &mut Order::buy(3, price(10_000), 1, 3), &mut asks);
        let second = run(&mut matcher, &mut Order::buy(4, price(10_000), 1, 4), &mut asks);

        assert_eq!(first[0].sequence, 1);
        assert_eq!(second[0].sequence, 2);
        assert_eq!(matcher.trades_executed(), 2);
    }
}
