//! Property-based tests for the matching engine using `proptest`.
//!
//! Random submission streams are replayed through the engine and checked against
//! book invariants and against a naive reference matcher.

use super::{MatchingEngine, OrderStatus};
use crate::domain::{EngineConfig, Order, OrderId, Side, Trade};
use crate::interfaces::RecordingTradeSink;
use crate::numeric::Price;
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

const MAX_QTY: u64 = 1000;

fn order_params() -> impl Strategy<Value = (bool, i64, u64)> {
    (
        any::<bool>(),
        (9_900i64..=10_100).prop_map(|cents| cents - cents % 5),
        1u64..=1_200,
    )
}

fn build_orders(params: &[(bool, i64, u64)]) -> Vec<Order> {
    params
        .iter()
        .enumerate()
        .map(|(i, &(is_buy, cents, qty))| {
            let side = if is_buy { Side::Buy } else { Side::Sell };
            // several orders share a timestamp
            Order::new(i as u64 + 1, side, Price::from_cents(cents), qty, i as u64 / 3)
        })
        .collect()
}

fn new_engine(sink: Arc<RecordingTradeSink>) -> MatchingEngine {
    MatchingEngine::new(EngineConfig::new("PROP").with_max_order_quantity(MAX_QTY), sink)
}

// ============================================================================
// Reference matcher: linear scans over plain vectors
// ============================================================================

#[derive(Clone)]
struct Resting {
    id: u64,
    price: i64,
    qty: u64,
    ts: u64,
    arrival: usize,
}

fn reference_trades(orders: &[Order]) -> Vec<(u64, u64, i64, u64)> {
    let mut bids: Vec<Resting> = Vec::new();
    let mut asks: Vec<Resting> = Vec::new();
    let mut trades = Vec::new();

    for (arrival, order) in orders.iter().enumerate() {
        if order.quantity == 0 || order.quantity > MAX_QTY {
            continue;
        }
        let price = order.price.cents();
        let mut remaining = order.quantity;

        let (opposite, own) = match order.side {
            Side::Buy => (&mut asks, &mut bids),
            Side::Sell => (&mut bids, &mut asks),
        };

        while remaining > 0 && !opposite.is_empty() {
            let best = match order.side {
                Side::Buy => (0..opposite.len())
                    .min_by_key(|&i| (opposite[i].price, opposite[i].ts, opposite[i].arrival)),
                Side::Sell => (0..opposite.len()).min_by_key(|&i| {
                    (Reverse(opposite[i].price), opposite[i].ts, opposite[i].arrival)
                }),
            };
            let Some(best) = best else { break };

            let marketable = match order.side {
                Side::Buy => price >= opposite[best].price,
                Side::Sell => price <= opposite[best].price,
            };
            if !marketable {
                break;
            }

            let qty = remaining.min(opposite[best].qty);
            let (buy, sell) = match order.side {
                Side::Buy => (order.id.value(), opposite[best].id),
                Side::Sell => (opposite[best].id, order.id.value()),
            };
            trades.push((buy, sell, opposite[best].price, qty));

            remaining -= qty;
            opposite[best].qty -= qty;
            if opposite[best].qty == 0 {
                opposite.remove(best);
            }
        }

        if remaining > 0 {
            own.push(Resting {
                id: order.id.value(),
                price,
                qty: remaining,
                ts: order.timestamp,
                arrival,
            });
        }
    }

    trades
}

fn trade_tuple(trade: &Trade) -> (u64, u64, i64, u64) {
    (
        trade.buy_order_id.value(),
        trade.sell_order_id.value(),
        trade.price.cents(),
        trade.quantity,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn book_is_uncrossed_at_quiescence(params in prop::collection::vec(order_params(), 1..150)) {
        let mut engine = new_engine(Arc::new(RecordingTradeSink::new()));

        for order in build_orders(&params) {
            engine.process_order(order);
            let book = engine.order_book();
            if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
                prop_assert!(bid < ask, "crossed book: bid {} >= ask {}", bid, ask);
            }
        }
    }

    #[test]
    fn quantity_is_conserved_per_side(params in prop::collection::vec(order_params(), 1..150)) {
        let sink = Arc::new(RecordingTradeSink::new());
        let mut engine = new_engine(sink.clone());

        let mut admitted_buy = 0u64;
        let mut admitted_sell = 0u64;
        for order in build_orders(&params) {
            let side = order.side;
            let qty = order.quantity;
            if engine.process_order(order).is_accepted() {
                match side {
                    Side::Buy => admitted_buy += qty,
                    Side::Sell => admitted_sell += qty,
                }
            }
        }

        let traded: u64 = sink.trades().iter().map(|t| t.quantity).sum();
        let book = engine.order_book();
        prop_assert_eq!(admitted_buy, traded + book.total_buy_quantity());
        prop_assert_eq!(admitted_sell, traded + book.total_sell_quantity());
        prop_assert_eq!(2 * traded + book.total_buy_quantity() + book.total_sell_quantity(),
            admitted_buy + admitted_sell);
    }

    #[test]
    fn trades_match_reference_price_time_matcher(params in prop::collection::vec(order_params(), 1..150)) {
        let orders = build_orders(&params);
        let expected = reference_trades(&orders);

        let sink = Arc::new(RecordingTradeSink::new());
        let mut engine = new_engine(sink.clone());
        for order in orders {
            engine.process_order(order);
        }

        let actual: Vec<_> = sink.trades().iter().map(trade_tuple).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn aggressor_limit_and_resting_price(params in prop::collection::vec(order_params(), 1..150)) {
        let mut engine = new_engine(Arc::new(RecordingTradeSink::new()));
        let mut resting_price: HashMap<OrderId, Price> = HashMap::new();

        for order in build_orders(&params) {
            let (side, limit, id) = (order.side, order.price, order.id);
            let report = engine.process_order(order);

            for trade in &report.trades {
                prop_assert_eq!(trade.aggressor, side);
                prop_assert_eq!(trade.taker_order_id(), id);
                match side {
                    Side::Buy => prop_assert!(trade.price <= limit),
                    Side::Sell => prop_assert!(trade.price >= limit),
                }
                let maker_price = resting_price.get(&trade.maker_order_id()).copied();
                prop_assert_eq!(maker_price, Some(trade.price));
            }

            if report.resting_quantity > 0 {
                resting_price.insert(id, limit);
            }
        }
    }

    #[test]
    fn rejected_orders_never_trade_or_rest(params in prop::collection::vec(order_params(), 1..150)) {
        let sink = Arc::new(RecordingTradeSink::new());
        let mut engine = new_engine(sink.clone());
        let mut rejected = Vec::new();

        for order in build_orders(&params) {
            let oversized = order.quantity > MAX_QTY;
            let report = engine.process_order(order);
            prop_assert_eq!(report.is_rejected(), oversized);
            if report.is_rejected() {
                prop_assert!(report.trades.is_empty());
                rejected.push(report.order_id);
            }
        }

        let book = engine.order_book();
        for order in book.bids().iter().chain(book.asks().iter()) {
            prop_assert!(!rejected.contains(&order.id));
        }
        for trade in sink.trades() {
            prop_assert!(!rejected.contains(&trade.buy_order_id));
            prop_assert!(!rejected.contains(&trade.sell_order_id));
        }
    }

    #[test]
    fn replay_is_deterministic(params in prop::collection::vec(order_params(), 1..150)) {
        let orders = build_orders(&params);

        let run = |orders: Vec<Order>| {
            let sink = Arc::new(RecordingTradeSink::new());
            let mut engine = new_engine(sink.clone());
            let statuses: Vec<OrderStatus> =
                orders.into_iter().map(|o| engine.process_order(o).status).collect();
            (sink.trades(), engine.snapshot(usize::MAX), statuses)
        };

        prop_assert_eq!(run(orders.clone()), run(orders));
    }
}
