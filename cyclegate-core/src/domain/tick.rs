//! Tick: a single market data update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-trade market update for one instrument.
///
/// Ticks are not retained by the strategy beyond the evaluation they drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub datetime: DateTime<Utc>,
    pub last_price: f64,
    /// Cumulative traded volume for the session.
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub open_interest: f64,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, datetime: DateTime<Utc>, last_price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            datetime,
            last_price,
            volume: 0.0,
            open_interest: 0.0,
        }
    }

    /// A tick with no usable price (feed heartbeats, auction placeholders).
    pub fn is_void(&self) -> bool {
        !self.last_price.is_finite() || self.last_price <= 0.0
    }
}
