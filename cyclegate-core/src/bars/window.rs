//! Indicator window: bounded history of cycle bars.
//!
//! Fixed-capacity arrays that shift left on every update, so the most recent
//! value is always last. The window reports itself initialized only once it
//! has seen `capacity` bars; until then the strategy skips the cycle.

use crate::domain::Bar;
use crate::indicators::rolling_sma;

#[derive(Debug, Clone)]
pub struct IndicatorWindow {
    capacity: usize,
    count: usize,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

impl IndicatorWindow {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "indicator window needs at least two bars");
        Self {
            capacity,
            count: 0,
            high: vec![0.0; capacity],
            low: vec![0.0; capacity],
            close: vec![0.0; capacity],
        }
    }

    pub fn update_bar(&mut self, bar: &Bar) {
        self.count += 1;
        push_shift(&mut self.high, bar.high);
        push_shift(&mut self.low, bar.low);
        push_shift(&mut self.close, bar.close);
    }

    pub fn is_initialized(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bars seen so far (not capped at capacity).
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// High of the most recently completed bar.
    pub fn last_high(&self) -> f64 {
        self.high[self.capacity - 1]
    }

    /// Low of the most recently completed bar.
    pub fn last_low(&self) -> f64 {
        self.low[self.capacity - 1]
    }

    pub fn last_close(&self) -> f64 {
        self.close[self.capacity - 1]
    }

    /// Moving average of closes over `period`, aligned with the window.
    pub fn sma_series(&self, period: usize) -> Vec<f64> {
        rolling_sma(&self.close, period)
    }
}

impl Default for IndicatorWindow {
    fn default() -> Self {
        Self::new(100)
    }
}

fn push_shift(values: &mut [f64], value: f64) {
    values.copy_within(1.., 0);
    if let Some(last) = values.last_mut() {
        *last = value;
    }
}
