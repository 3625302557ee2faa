//! Bar aggregation and the rolling indicator window.
//!
//! The generator turns ticks into 1-minute bars and 1-minute bars into cycle
//! bars (15 minutes by default). The window keeps a bounded history of cycle
//! bars for the strategy's moving average and prior-bar extremes.

pub mod generator;
pub mod window;

pub use generator::BarGenerator;
pub use window::IndicatorWindow;

use crate::domain::Bar;
use chrono::Duration;

/// The tail of chronological `history` that falls within `days` days of its
/// newest bar. Bars exactly `days` days old are excluded, so `days = 0`
/// yields nothing.
pub fn trailing_days(history: &[Bar], days: u32) -> &[Bar] {
    let Some(newest) = history.last() else {
        return history;
    };
    let cutoff = newest.datetime - Duration::days(i64::from(days));
    let start = history
        .iter()
        .position(|bar| bar.datetime > cutoff)
        .unwrap_or(history.len());
    &history[start..]
}


#[cfg(test)]
mod tests {
    use super::test_support::minute_bar;
    use super::trailing_days;
    use chrono::Duration;

    fn days_ago(days: i64) -> crate::domain::Bar {
        let mut bar = minute_bar(0, 1.0, 2.0, 0.5, 1.5);
        bar.datetime -= Duration::days(days);
        bar
    }

    #[test]
    fn keeps_only_recent_days() {
        let history = vec![days_ago(5), days_ago(3), days_ago(1), days_ago(0)];
        let kept = trailing_days(&history, 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].datetime, history[2].datetime);
    }

    #[test]
    fn zero_days_keeps_nothing() {
        let history = vec![days_ago(1), days_ago(0)];
        assert!(trailing_days(&history, 0).is_empty());
        assert!(trailing_days(&[], 10).is_empty());
    }

    #[test]
    fn wide_window_keeps_everything() {
        let history = vec![days_ago(5), days_ago(0)];
        assert_eq!(trailing_days(&history, 10).len(), 2);
    }
}
