//! Tick and bar files for replay.
//!
//! Tick CSV columns: `symbol,datetime,last_price,volume,open_interest`
//! Bar CSV columns:  `symbol,datetime,open,high,low,close,volume,open_interest`
//!
//! Datetimes are RFC 3339 (e.g. `2024-03-01T09:00:01Z`).

pub mod csv_io;

pub use csv_io::{load_minute_bars_csv, load_ticks_csv, read_minute_bars, read_ticks};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {reason}")]
    Validation { row: usize, reason: String },
}
