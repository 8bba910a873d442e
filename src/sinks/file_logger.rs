// ============================================================================
// File Trade Logger
// Append-only audit log of executed trades
// ============================================================================

use crate::domain::Trade;
use crate::interfaces::{SinkError, TradeSink};
use crate::utils::log_time_string;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Log file used when the caller does not pick one
pub const DEFAULT_TRADE_LOG: &str = "trades.log";

/// Line layout of the trade log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeLogFormat {
    /// `YYYY-MM-DD HH:MM:SS - Trade executed: ...` with session banners
    #[default]
    Text,
    /// One JSON object per line
    #[cfg(feature = "serde")]
    JsonLines,
}

/// Appends every trade to a file and flushes after each line.
///
/// Session banners are written when the owning engine starts and stops.
pub struct FileTradeLogger {
    path: PathBuf,
    format: TradeLogFormat,
    writer: Mutex<BufWriter<File>>,
}

impl FileTradeLogger {
    /// Open `path` for appending, creating it if missing
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::with_format(path, TradeLogFormat::Text)
    }

    pub fn with_format(path: impl AsRef<Path>, format: TradeLogFormat) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = %path.display(), ?format, "opened trade log");

        Ok(Self {
            path,
            format,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> TradeLogFormat {
        self.format
    }

    fn write_banner(&self, leading: &str, what: &str, trailer: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        match self.format {
            TradeLogFormat::Text => {
                write!(
                    writer,
                    "{}========== Trading Session {} at {} =========={}",
                    leading,
                    what,
                    log_time_string(),
                    trailer
                )?;
            },
            #[cfg(feature = "serde")]
            TradeLogFormat::JsonLines => {
                let marker = serde_json::json!({
                    "session": what.to_lowercase(),
                    "at": log_time_string(),
                });
                serde_json::to_writer(&mut *writer, &marker)?;
                writeln!(writer)?;
            },
        }
        writer.flush()?;
        Ok(())
    }
}

impl TradeSink for FileTradeLogger {
    fn on_session_start(&self) -> Result<(), SinkError> {
        self.write_banner("\n", "Started", "\n")
    }

    fn log_trade(&self, trade: &Trade) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        match self.format {
            TradeLogFormat::Text => {
                writeln!(writer, "{} - {}", log_time_string(), trade)?;
            },
            #[cfg(feature = "serde")]
            TradeLogFormat::JsonLines => {
                serde_json::to_writer(&mut *writer, trade)?;
                writeln!(writer)?;
            },
        }
        writer.flush()?;
        Ok(())
    }

    fn on_session_end(&self) -> Result<(), SinkError> {
        self.write_banner("", "Ended", "\n\n")
    }
}
