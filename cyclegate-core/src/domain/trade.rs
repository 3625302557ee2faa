use super::ids::{OrderId, TradeId};
use super::order::{Direction, Offset};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fill report from the execution gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub order_id: OrderId,
    pub symbol: String,
    pub direction: Direction,
    pub offset: Offset,
    pub price: f64,
    pub volume: f64,
    pub datetime: DateTime<Utc>,
}

impl Trade {
    /// Signed change this fill makes to the net position.
    pub fn signed_volume(&self) -> f64 {
        self.direction.sign() * self.volume
    }

    /// The fill opened (or added to) a position on `direction`'s side.
    pub fn opens(&self, direction: Direction) -> bool {
        self.offset == Offset::Open && self.direction == direction
    }
}
