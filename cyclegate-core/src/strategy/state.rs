//! Strategy-owned position state and the host-facing variables view.

use super::gate::{EntryLock, ExitLatch};
use crate::domain::{Direction, Trade};
use serde::{Deserialize, Serialize};

/// Net position plus the stop levels fixed at the opening fill.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionState {
    pub net: f64,
    pub long_stop: Option<f64>,
    pub short_stop: Option<f64>,
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        self.net == 0.0
    }

    /// Apply a fill to the net volume. Stop levels are cleared once flat.
    pub fn apply_fill(&mut self, trade: &Trade) {
        self.net += trade.signed_volume();
        if self.net.abs() < 1e-9 {
            self.net = 0.0;
            self.long_stop = None;
            self.short_stop = None;
        }
    }

    pub fn record_stop(&mut self, side: Direction, price: f64) {
        match side {
            Direction::Long => self.long_stop = Some(price),
            Direction::Short => self.short_stop = Some(price),
        }
    }
}

/// Serializable view of strategy state for host display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyVariables {
    pub symbol: String,
    pub inited: bool,
    pub trading: bool,
    pub ma_current: Option<f64>,
    pub ma_previous: Option<f64>,
    pub entry_lock: EntryLock,
    pub exit_latch: ExitLatch,
    pub position: PositionState,
    pub working_orders: usize,
}
