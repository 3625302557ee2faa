//! Stop attachment: protective stops placed on opening fills.

use super::snapshot::PriorBar;
use crate::domain::{Direction, OrderRequest, Trade};
use serde::{Deserialize, Serialize};

/// Protective stop derived from an opening fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectiveStop {
    /// Side of the position being protected.
    pub side: Direction,
    pub stop_price: f64,
    pub request: OrderRequest,
}

/// Stop for `trade`, or `None` for fills that do not open a position.
///
/// Longs are stopped at the prior bar's low, shorts at its high, for the
/// filled volume.
pub fn protective_stop(trade: &Trade, prior: &PriorBar) -> Option<ProtectiveStop> {
    let side = if trade.opens(Direction::Long) {
        Direction::Long
    } else if trade.opens(Direction::Short) {
        Direction::Short
    } else {
        return None;
    };
    let stop_price = match side {
        Direction::Long => prior.low,
        Direction::Short => prior.high,
    };
    Some(ProtectiveStop {
        side,
        stop_price,
        request: OrderRequest::stop(side.closing(), stop_price, trade.volume),
    })
}
