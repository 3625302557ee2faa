//! Bar: fixed-interval OHLC aggregate.

use super::tick::Tick;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bar interval. Only the two cadences the strategy consumes are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Minute,
    FifteenMinute,
}

/// OHLC bar for a single symbol.
///
/// Bars either come from the bar generator (real ticks rolled up into
/// 1-minute and then 15-minute bars) or are synthesized from a single tick
/// with open = high = low = close = last price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub interval: Interval,
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub open_interest: f64,
}

impl Bar {
    /// Per-tick bar used to evaluate entries intrabar.
    pub fn synthetic(tick: &Tick) -> Self {
        Self {
            symbol: tick.symbol.clone(),
            interval: Interval::Minute,
            datetime: tick.datetime,
            open: tick.last_price,
            high: tick.last_price,
            low: tick.last_price,
            close: tick.last_price,
            volume: 0.0,
            open_interest: tick.open_interest,
        }
    }

    /// Basic OHLC sanity check: high >= low and both bracket open/close.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn synthetic_bar_is_flat_at_last_price() {
        let mut tick = Tick::new("rb2410", Utc.with_ymd_and_hms(2024, 3, 1, 9, 1, 5).unwrap(), 3650.0);
        tick.open_interest = 1200.0;
        let bar = Bar::synthetic(&tick);

        assert_eq!(bar.interval, Interval::Minute);
        assert_eq!(bar.open, 3650.0);
        assert_eq!(bar.high, 3650.0);
        assert_eq!(bar.low, 3650.0);
        assert_eq!(bar.close, 3650.0);
        assert_eq!(bar.open_interest, 1200.0);
        assert!(bar.is_sane());
    }

    #[test]
    fn bar_detects_insane_high_low() {
        let tick = Tick::new("rb2410", Utc.with_ymd_and_hms(2024, 3, 1, 9, 1, 5).unwrap(), 100.0);
        let mut bar = Bar::synthetic(&tick);
        bar.high = 97.0; // below low
        assert!(!bar.is_sane());
    }
}
