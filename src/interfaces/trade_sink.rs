// ============================================================================
// Trade Sink Interface
// Output port receiving every execution the engine performs
// ============================================================================

use crate::domain::Trade;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Failure to record a trade or session marker.
///
/// A sink error never retracts a trade: the book is the source of truth.
#[derive(Debug)]
pub enum SinkError {
    /// Underlying writer failed
    Io(io::Error),
    /// The receiving end of a channel sink was dropped
    Disconnected,
    /// Trade could not be encoded as JSON
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "trade sink I/O error: {}", err),
            SinkError::Disconnected => write!(f, "trade sink receiver disconnected"),
            #[cfg(feature = "serde")]
            SinkError::Json(err) => write!(f, "trade sink encoding error: {}", err),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
            SinkError::Disconnected => None,
            #[cfg(feature = "serde")]
            SinkError::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        SinkError::Io(err)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Json(err)
    }
}

/// Receives trades from the matching engine, synchronously and in execution order.
///
/// The engine calls `on_session_start` when it is constructed and `on_session_end`
/// when it is dropped. Implementations must not call back into the engine.
pub trait TradeSink: Send + Sync {
    fn on_session_start(&self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Record one execution
    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError>;

    fn on_session_end(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Discards every trade
pub struct NoOpTradeSink;

impl TradeSink for NoOpTradeSink {
    fn log_trade(&self, _trade: &Trade) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each trade to the `tracing` pipeline at info level
pub struct LoggingTradeSink;

impl TradeSink for LoggingTradeSink {
    fn on_session_start(&self) -> Result<(), SinkError> {
        tracing::info!("trading session started");
        Ok(())
    }

    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError> {
        tracing::info!(
            sequence = trade.sequence,
            aggressor = %trade.aggressor,
            "{}",
            trade
        );
        Ok(())
    }

    fn on_session_end(&self) -> Result<(), SinkError> {
        tracing::info!("trading session ended");
        Ok(())
    }
}

/// Keeps every trade in memory.
#[derive(Default)]
pub struct RecordingTradeSink {
    trades: Mutex<Vec<Trade>>,
    sessions: Mutex<(usize, usize)>,
}

impl RecordingTradeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, in arrival order
    pub fn trades(&self) -> Vec<Trade> {
        self.trades.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.trades.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.lock().is_empty()
    }

    /// Drain recorded trades
    pub fn take(&self) -> Vec<Trade> {
        std::mem::take(&mut *self.trades.lock())
    }

    pub fn sessions_started(&self) -> usize {
        self.sessions.lock().0
    }

    pub fn sessions_ended(&self) -> usize {
        self.sessions.lock().1
    }
}

impl TradeSink for RecordingTradeSink {
    fn on_session_start(&self) -> Result<(), SinkError> {
        self.sessions.lock().0 += 1;
        Ok(())
    }

    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError> {
        self.trades.lock().push(trade.clone());
        Ok(())
    }

    fn on_session_end(&self) -> Result<(), SinkError> {
        self.sessions.lock().1 += 1;
        Ok(())
    }
}

/// Hands trades to another thread over a crossbeam channel
pub struct ChannelTradeSink {
    sender: Sender<Trade>,
}

impl ChannelTradeSink {
    pub fn new(sender: Sender<Trade>) -> Self {
        Self { sender }
    }

    /// Sink plus the receiver a consumer thread drains
    pub fn unbounded() -> (Self, Receiver<Trade>) {
        let (sender, receiver) = channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl TradeSink for ChannelTradeSink {
    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError> {
        self.sender
            .send(trade.clone())
            .map_err(|_| SinkError::Disconnected)
    }
}

/// Forwards to several sinks, e.g. console logging plus the audit file.
///
/// Every inner sink is invoked even if an earlier one fails; the first error is returned.
pub struct FanOutTradeSink {
    sinks: Vec<Arc<dyn TradeSink>>,
}

impl FanOutTradeSink {
    pub fn new(sinks: Vec<Arc<dyn TradeSink>>) -> Self {
        Self { sinks }
    }

    fn for_each(
        &self,
        mut call: impl FnMut(&dyn TradeSink) -> Result<(), SinkError>,
    ) -> Result<(), SinkError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(err) = call(sink.as_ref()) {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl TradeSink for FanOutTradeSink {
    fn on_session_start(&self) -> Result<(), SinkError> {
        self.for_each(|sink| sink.on_session_start())
    }

    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError> {
        self.for_each(|sink| sink.log_trade(trade))
    }

    fn on_session_end(&self) -> Result<(), SinkError> {
        self.for_each(|sink| sink.on_session_end())
    }
}
