//! Tick → 1-minute → cycle bar aggregation.

use crate::domain::{Bar, Interval, Tick};
use chrono::{DateTime, Timelike, Utc};

/// Rolls ticks into 1-minute bars and 1-minute bars into cycle bars.
///
/// Both update methods return the bar they completed, if any, so the caller
/// decides how to route it. A 1-minute bar is completed by the first tick of
/// the next minute; a cycle bar is completed by the 1-minute bar whose minute
/// closes the window (`(minute + 1) % window == 0`).
#[derive(Debug, Clone)]
pub struct BarGenerator {
    window: u32,
    bar: Option<Bar>,
    window_bar: Option<Bar>,
    last_tick: Option<Tick>,
}

impl BarGenerator {
    /// `window` is the cycle length in minutes and must divide 60.
    pub fn new(window: u32) -> Self {
        assert!(window >= 1 && 60 % window == 0, "cycle window must divide 60");
        Self {
            window,
            bar: None,
            window_bar: None,
            last_tick: None,
        }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// True when `tick` is older than the last tick accepted.
    pub fn is_stale(&self, tick: &Tick) -> bool {
        self.last_tick
            .as_ref()
            .is_some_and(|last| tick.datetime < last.datetime)
    }

    /// Feed a tick. Returns the 1-minute bar this tick completed.
    pub fn update_tick(&mut self, tick: &Tick) -> Option<Bar> {
        if tick.is_void() || self.is_stale(tick) {
            return None;
        }

        let rolled = self.bar.as_ref().is_some_and(|bar| {
            bar.datetime.minute() != tick.datetime.minute()
                || bar.datetime.hour() != tick.datetime.hour()
        });
        let finished = if rolled {
            self.bar.take().map(|mut done| {
                done.datetime = truncate_to_minute(done.datetime);
                done
            })
        } else {
            None
        };

        let bar = self.bar.get_or_insert_with(|| Bar {
            symbol: tick.symbol.clone(),
            interval: Interval::Minute,
            datetime: tick.datetime,
            open: tick.last_price,
            high: tick.last_price,
            low: tick.last_price,
            close: tick.last_price,
            volume: 0.0,
            open_interest: tick.open_interest,
        });
        bar.high = bar.high.max(tick.last_price);
        bar.low = bar.low.min(tick.last_price);
        bar.close = tick.last_price;
        bar.open_interest = tick.open_interest;
        bar.datetime = tick.datetime;

        if let Some(last) = &self.last_tick {
            bar.volume += (tick.volume - last.volume).max(0.0);
        }
        self.last_tick = Some(tick.clone());

        finished
    }

    /// Feed a completed 1-minute bar. Returns the cycle bar it completed.
    pub fn update_bar(&mut self, bar: &Bar) -> Option<Bar> {
        let window_bar = self.window_bar.get_or_insert_with(|| Bar {
            symbol: bar.symbol.clone(),
            interval: Interval::FifteenMinute,
            datetime: truncate_to_minute(bar.datetime),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: 0.0,
            open_interest: bar.open_interest,
        });
        window_bar.high = window_bar.high.max(bar.high);
        window_bar.low = window_bar.low.min(bar.low);
        window_bar.close = bar.close;
        window_bar.volume += bar.volume;
        window_bar.open_interest = bar.open_interest;

        if (bar.datetime.minute() + 1) % self.window == 0 {
            self.window_bar.take()
        } else {
            None
        }
    }
}

impl Default for BarGenerator {
    fn default() -> Self {
        Self::new(15)
    }
}

fn truncate_to_minute(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::test_support::{at, minute_bar, tick};

    #[test]
    fn minute_bar_completes_on_next_minute() {
        let mut bg = BarGenerator::default();
        assert!(bg.update_tick(&tick(9, 0, 1, 100.0, 10.0)).is_none());
        assert!(bg.update_tick(&tick(9, 0, 20, 103.0, 15.0)).is_none());
        assert!(bg.update_tick(&tick(9, 0, 40, 99.0, 21.0)).is_none());
        assert!(bg.update_tick(&tick(9, 0, 59, 101.0, 22.0)).is_none());

        let bar = bg.update_tick(&tick(9, 1, 0, 102.0, 30.0)).expect("minute bar");
        assert_eq!(bar.interval, Interval::Minute);
        assert_eq!(bar.datetime, at(9, 0, 0));
        assert_eq!(bar.open, 100.0);
        assert_eq!(bar.high, 103.0);
        assert_eq!(bar.low, 99.0);
        assert_eq!(bar.close, 101.0);
        // 5 + 6 + 1 traded after the first tick
        assert_eq!(bar.volume, 12.0);
    }

    #[test]
    fn void_and_stale_ticks_are_ignored() {
        let mut bg = BarGenerator::default();
        bg.update_tick(&tick(9, 0, 10, 100.0, 0.0));
        assert!(bg.update_tick(&tick(9, 0, 11, 0.0, 0.0)).is_none());
        assert!(bg.is_stale(&tick(9, 0, 5, 50.0, 0.0)));
        assert!(!bg.is_stale(&tick(9, 0, 10, 50.0, 0.0)));
        assert!(bg.update_tick(&tick(9, 0, 5, 50.0, 0.0)).is_none());

        let bar = bg.update_tick(&tick(9, 1, 0, 101.0, 0.0)).unwrap();
        assert_eq!(bar.low, 100.0);
        assert_eq!(bar.high, 100.0);
    }

    #[test]
    fn hour_change_with_same_minute_completes_bar() {
        let mut bg = BarGenerator::default();
        bg.update_tick(&tick(9, 5, 0, 100.0, 0.0));
        assert!(bg.update_tick(&tick(10, 5, 0, 101.0, 0.0)).is_some());
    }

    #[test]
    fn fifteen_minute_rollup() {
        let mut bg = BarGenerator::default();
        for minute in 0..14 {
            let price = 100.0 + minute as f64;
            assert!(bg
                .update_bar(&minute_bar(minute, price, price + 1.0, price - 1.0, price))
                .is_none());
        }
        let done = bg
            .update_bar(&minute_bar(14, 114.0, 120.0, 113.0, 118.0))
            .expect("cycle bar on minute 14");

        assert_eq!(done.interval, Interval::FifteenMinute);
        assert_eq!(done.datetime, at(9, 0, 0));
        assert_eq!(done.open, 100.0);
        assert_eq!(done.high, 120.0);
        assert_eq!(done.low, 99.0);
        assert_eq!(done.close, 118.0);
        assert_eq!(done.volume, 150.0);

        // Next window starts fresh.
        let next = minute_bar(15, 200.0, 201.0, 199.0, 200.0);
        assert!(bg.update_bar(&next).is_none());
    }

    #[test]
    fn partial_first_window_closes_on_boundary() {
        let mut bg = BarGenerator::default();
        assert!(bg.update_bar(&minute_bar(12, 1.0, 2.0, 0.5, 1.5)).is_none());
        assert!(bg.update_bar(&minute_bar(13, 1.5, 2.5, 1.0, 2.0)).is_none());
        let done = bg.update_bar(&minute_bar(14, 2.0, 3.0, 1.5, 2.5)).unwrap();
        assert_eq!(done.datetime, at(9, 12, 0));
        assert_eq!(done.high, 3.0);
        assert_eq!(done.low, 0.5);
    }

    #[test]
    #[should_panic(expected = "cycle window must divide 60")]
    fn rejects_window_not_dividing_hour() {
        BarGenerator::new(7);
    }
}
