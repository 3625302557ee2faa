use serde::{Deserialize, Serialize};

/// Gateway-side position record for one symbol and side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub symbol: String,
    /// Net signed volume: positive = long, negative = short.
    pub volume: f64,
    pub avg_price: f64,
}

impl PositionSnapshot {
    pub fn is_long(&self) -> bool {
        self.volume > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.volume < 0.0
    }

    pub fn is_flat(&self) -> bool {
        self.volume == 0.0
    }
}
