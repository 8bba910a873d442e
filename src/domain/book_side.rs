// ============================================================================
// Order Book Side
// Price-time priority container for the resting orders of one side
// ============================================================================

use crossbeam_skiplist::SkipMap;
use std::cmp::Ordering;

use super::{Order, Side, Timestamp};
use crate::numeric::{Price, Quantity};

// ============================================================================
// Priority Key
// ============================================================================

/// Sort key of a resting order.
///
/// Bids sort highest price first, asks lowest price first. Equal prices fall back
/// to the submission timestamp and then to insertion sequence, so the relation
/// is total and the first key of a side is always its best order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PriorityKey {
    side: Side,
    price: Price,
    timestamp: Timestamp,
    sequence: u64,
}

impl PriorityKey {
    fn new(side: Side, price: Price, timestamp: Timestamp, sequence: u64) -> Self {
        Self {
            side,
            price,
            timestamp,
            sequence,
        }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_price = match self.side {
            Side::Buy => other.price.cmp(&self.price),
            Side::Sell => self.price.cmp(&other.price),
        };

        by_price
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Order Book Side
// ============================================================================

/// Resting orders of one side in price-time priority.
///
/// Backed by a skip list keyed on [`PriorityKey`], so insert and best-order
/// extraction are logarithmic and in-order iteration for snapshots is free.
/// Mutation takes `&mut self`: the book has a single writer.
pub struct OrderBookSide {
    side: Side,
    orders: SkipMap<PriorityKey, Order>,
    next_sequence: u64,
}

impl OrderBookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            orders: SkipMap::new(),
            next_sequence: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Rest a new order on this side, behind everything already queued at its
    /// price and timestamp. Any sequence the order carries is replaced.
    pub fn insert(&mut self, mut order: Order) {
        order.clear_sequence();
        self.rest(order);
    }

    /// Put back a partially filled order taken from this side.
    /// It keeps its original sequence and therefore its place in the queue.
    pub(crate) fn reinsert(&mut self, order: Order) {
        debug_assert!(order.sequence().is_some(), "reinserted order was never rested");
        self.rest(order);
    }

    fn rest(&mut self, mut order: Order) {
        debug_assert_eq!(order.side, self.side, "order rested on the wrong side");
        debug_assert!(order.remaining_quantity() > 0, "resting order must have quantity");

        let sequence = match order.sequence() {
            Some(seq) => seq,
            None => {
                let seq = self.next_sequence;
                self.next_sequence += 1;
                order.assign_sequence(seq)
            },
        };

        let key = PriorityKey::new(self.side, order.price, order.timestamp, sequence);
        self.orders.insert(key, order);
    }

    /// The best resting order, without removing it.
    pub fn peek_best(&self) -> Option<Order> {
        self.orders.front().map(|entry| entry.value().clone())
    }

    /// Remove and return the best resting order.
    pub fn pop_best(&mut self) -> Option<Order> {
        self.orders.pop_front().map(|entry| entry.value().clone())
    }

    pub fn best_price(&self) -> Option<Price> {
        self.orders.front().map(|entry| entry.value().price)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of working quantity across all resting orders.
    pub fn total_quantity(&self) -> Quantity {
        self.orders
            .iter()
            .map(|entry| entry.value().remaining_quantity())
            .sum()
    }

    /// Resting orders in priority order.
    pub fn iter(&self) -> impl Iterator<Item = Order> + '_ {
        self.orders.iter().map(|entry| entry.value().clone())
    }

    /// Up to `limit` orders in priority order.
    pub fn snapshot(&self, limit: usize) -> Vec<Order> {
        self.iter().take(limit).collect()
    }

    /// Aggregated (price, quantity) for the best `num_levels` price levels
    pub fn depth(&self, num_levels: usize) -> Vec<(Price, Quantity)> {
        let mut levels: Vec<(Price, Quantity)> = Vec::with_capacity(num_levels);

        for order in self.iter() {
            match levels.last_mut() {
                Some((price, qty)) if *price == order.price => {
                    *qty += order.remaining_quantity();
                },
                _ => {
                    if levels.len() == num_levels {
                        break;
                    }
                    levels.push((order.price, order.remaining_quantity()));
                },
            }
        }

        levels
    }
}

impl std::fmt::Debug for OrderBookSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBookSide")
            .field("side", &self.side)
            .field("orders", &self.orders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    fn ids(orders: &[Order]) -> Vec<u64> {
        orders.iter().map(|o| o.id.value()).collect()
    }

    #[test]
    fn test_bid_side_best_is_highest_price() {
        let mut bids = OrderBookSide::new(Side::Buy);
        bids.insert(Order::buy(1, price(10_000), 1, 1));
        bids.insert(Order::buy(2, price(10_100), 1, 2));
        bids.insert(Order::buy(3, price(9_900), 1, 3));

        assert_eq!(bids.best_price(), Some(price(10_100)));
        assert_eq!(ids(&bids.snapshot(10)), vec![2, 1, 3]);
    }

    #[test]
    fn test_ask_side_best_is_lowest_price() {
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 1, 1));
        asks.insert(Order::sell(2, price(10_100), 1, 2));
        asks.insert(Order::sell(3, price(9_900), 1, 3));

        assert_eq!(asks.best_price(), Some(price(9_900)));
        assert_eq!(ids(&asks.snapshot(10)), vec![3, 1, 2]);
    }

    #[test]
    fn test_time_priority_at_same_price() {
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 1, 5));
        asks.insert(Order::sell(2, price(10_000), 1, 3));

        assert_eq!(asks.pop_best().unwrap().id.value(), 2);
        assert_eq!(asks.pop_best().unwrap().id.value(), 1);
        assert!(asks.pop_best().is_none());
    }

    #[test]
    fn test_insertion_order_breaks_timestamp_ties() {
        let mut bids = OrderBookSide::new(Side::Buy);
        for id in 1..=4 {
            bids.insert(Order::buy(id, price(10_000), 1, 7));
        }

        assert_eq!(bids.len(), 4);
        assert_eq!(ids(&bids.snapshot(4)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reinsert_keeps_queue_position() {
        let mut asks = OrderBookSide::new(Side::Sell);
        asks.insert(Order::sell(1, price(10_000), 10, 1));
        asks.insert(Order::sell(2, price(10_000), 10, 1));

        let mut top = asks.pop_best().unwrap();
        assert!(top.fill(4));
        asks.reinsert(top);

        let best = asks.peek_best().unwrap();
        assert_eq!(best.id.value(), 1);
        assert_eq!(best.remaining_quantity(), 6);
    }

    #[test]
    fn test_insert_ignores_sequence_from_another_side() {
        let mut source = OrderBookSide::new(Side::Buy);
        source.insert(Order::buy(7, price(10_000), 3, 1));
        let copied = source.peek_best().unwrap();

        let mut bids = OrderBookSide::new(Side::Buy);
        bids.insert(Order::buy(1, price(10_000), 5, 1));
        bids.insert(copied);

        assert_eq!(bids.len(), 2);
        assert_eq!(bids.total_quantity(), 8);
        assert_eq!(ids(&bids.snapshot(2)), vec![1, 7]);
    }

    #[test]
    fn test_empty_side() {
        let mut side = OrderBookSide::new(Side::Buy);
        assert!(side.is_empty());
        assert!(side.peek_best().is_none());
        assert!(side.pop_best().is_none());
        assert_eq!(side.best_price(), None);
        assert_eq!(side.total_quantity(), 0);
        assert!(side.snapshot(5).is_empty());
    }

    #[test]
    fn test_snapshot_is_non_destructive() {
        let mut asks = OrderBookSide::new(Side::Sell);
        for id in 1..=3 {
            asks.insert(Order::sell(id, price(10_000 + id as i64), 2, id));
        }

        assert_eq!(asks.snapshot(2).len(), 2);
        assert_eq!(asks.len(), 3);
        assert_eq!(asks.total_quantity(), 6);
    }

    #[test]
    fn test_depth_aggregates_levels() {
        let mut bids = OrderBookSide::new(Side::Buy);
        bids.insert(Order::buy(1, price(10_000), 5, 1));
        bids.insert(Order::buy(2, price(10_000), 7, 2));
        bids.insert(Order::buy(3, price(9_900), 3, 3));
        bids.insert(Order::buy(4, price(9_800), 1, 4));

        assert_eq!(
            bids.depth(2),
            vec![(price(10_000), 12), (price(9_900), 3)]
        );
        assert_eq!(bids.depth(10).len(), 3);
    }

    quickcheck! {
        fn prop_pop_order_matches_priority(entries: Vec<(u16, u8)>) -> bool {
            let mut asks = OrderBookSide::new(Side::Sell);
            for (i, (cents, ts)) in entries.iter().enumerate() {
                asks.insert(Order::sell(i as u64, price(*cents as i64 + 1), 1, *ts as u64));
            }

            let mut previous: Option<Order> = None;
            while let Some(order) = asks.pop_best() {
                if let Some(prev) = &previous {
                    let in_order = prev.price < order.price
                        || (prev.price == order.price && prev.timestamp < order.timestamp)
                        || (prev.price == order.price
                            && prev.timestamp == order.timestamp
                            && prev.id < order.id);
                    if !in_order {
                        return false;
                    }
                }
                previous = Some(order);
            }
            true
        }

        fn prop_key_order_is_antisymmetric(a: (u16, u8, u8), b: (u16, u8, u8)) -> bool {
            let ka = PriorityKey::new(Side::Buy, price(a.0 as i64), a.1 as u64, a.2 as u64);
            let kb = PriorityKey::new(Side::Buy, price(b.0 as i64), b.1 as u64, b.2 as u64);
            ka.cmp(&kb) == kb.cmp(&ka).reverse()
        }
    }
}
