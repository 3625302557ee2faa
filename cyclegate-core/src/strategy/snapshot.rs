//! Indicator snapshot: the cycle's frozen view of the indicator window.

use crate::bars::IndicatorWindow;
use serde::{Deserialize, Serialize};

/// Extremes and close of the most recently completed cycle bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorBar {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriorBar {
    /// Live read of the window's latest bar. `None` until the window is
    /// initialized.
    pub fn from_window(window: &IndicatorWindow) -> Option<Self> {
        window.is_initialized().then(|| Self {
            high: window.last_high(),
            low: window.last_low(),
            close: window.last_close(),
        })
    }
}

/// Captured once per cycle and replaced wholesale at the next cycle.
///
/// Two-element arrays are `[previous, latest]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ma_current: f64,
    pub ma_previous: f64,
    pub high: [f64; 2],
    pub low: [f64; 2],
    pub close: [f64; 2],
}

impl IndicatorSnapshot {
    /// Capture from an initialized window. Returns `None` if the window is
    /// not initialized or the moving average is not yet defined.
    pub fn capture(window: &IndicatorWindow, ma_window: usize) -> Option<Self> {
        if !window.is_initialized() {
            return None;
        }
        let ma = window.sma_series(ma_window);
        let n = ma.len();
        if n < 2 || ma[n - 1].is_nan() || ma[n - 2].is_nan() {
            return None;
        }
        let last_two = |values: &[f64]| [values[n - 2], values[n - 1]];
        Some(Self {
            ma_current: ma[n - 1],
            ma_previous: ma[n - 2],
            high: last_two(window.high()),
            low: last_two(window.low()),
            close: last_two(window.close()),
        })
    }

    pub fn prior_bar(&self) -> PriorBar {
        PriorBar {
            high: self.high[1],
            low: self.low[1],
            close: self.close[1],
        }
    }
}
