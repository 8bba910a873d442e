// ============================================================================
// Basic Usage Example
// ============================================================================

use limit_order_engine::numeric::Price;
use limit_order_engine::prelude::*;
use limit_order_engine::sinks::DEFAULT_TRADE_LOG;
use limit_order_engine::utils::MonotonicClock;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    limit_order_engine::utils::init_tracing().map_err(|e| e.to_string())?;

    println!("=== Limit Order Engine Example ===\n");

    // Trades go to the console log and to the append-only audit file
    let audit = Arc::new(FileTradeLogger::open(DEFAULT_TRADE_LOG)?);
    let sinks: Vec<Arc<dyn TradeSink>> = vec![Arc::new(LoggingTradeSink), audit];
    let sink = Arc::new(FanOutTradeSink::new(sinks));

    let mut engine = MatchingEngineBuilder::new("ACME").trade_sink(sink).build()?;
    let mut clock = MonotonicClock::new();

    println!("Created matching engine for {}\n", engine.instrument());

    // Ladder of asks
    println!("Adding sell orders...");
    let asks = [("99.00", 10), ("100.00", 10), ("101.00", 10)];
    for (id, (px, qty)) in (1u64..).zip(asks) {
        let report = engine.process_order(Order::sell(id, px.parse::<Price>()?, qty, clock.now()));
        println!("  sell #{} {} @ {}: {}", id, qty, px, report.status);
    }

    // Marketable buy walks the first two levels and rests the remainder
    println!("\nSubmitting buy 25 @ 100.50...");
    let report = engine.process_order(Order::buy(4, "100.50".parse::<Price>()?, 25, clock.now()));
    for trade in &report.trades {
        println!("  {}", trade);
    }
    println!("  status: {}", report.status);

    // Exceeds the per-order limit
    println!("\nSubmitting buy 1500 @ 100.00...");
    let rejected = engine.process_order(Order::buy(5, "100.00".parse::<Price>()?, 1500, clock.now()));
    println!("  status: {}", rejected.status);

    println!();
    print!("{}", engine.display_snapshot());

    let stats = engine.stats();
    println!(
        "\nOrders: {} received, {} rejected; {} trades for {} units",
        stats.orders_received, stats.orders_rejected, stats.trades_executed, stats.volume_traded
    );
    println!("All trades have been logged to '{}'.", DEFAULT_TRADE_LOG);

    Ok(())
}
