//! Exit evaluator: tick-level breach of the prior bar's extremes.

use super::entry::OrderParams;
use super::gate::CycleGate;
use super::snapshot::PriorBar;
use crate::domain::{Direction, Order, OrderRequest};

/// Decide whether `price` should close the open position.
///
/// A long is closed when price trades below the prior bar's low, a short when
/// it trades above the prior bar's high. The closing order is priced
/// `price_offset` through the market for the full position. No order is
/// produced when a closing order for this position is already resting in
/// `working_orders`, or when the exit latch has fired this cycle.
pub fn evaluate_exit(
    symbol: &str,
    price: f64,
    prior: &PriorBar,
    gate: &CycleGate,
    net_position: f64,
    working_orders: &[Order],
    params: &OrderParams,
) -> Option<OrderRequest> {
    let side = if net_position > 0.0 {
        Direction::Long
    } else if net_position < 0.0 {
        Direction::Short
    } else {
        return None;
    };

    let breached = match side {
        Direction::Long => price < prior.low,
        Direction::Short => price > prior.high,
    };
    if !breached {
        return None;
    }

    if working_orders
        .iter()
        .any(|o| o.is_resting_close_for(symbol, side))
    {
        return None;
    }
    if !gate.exit_armed() {
        return None;
    }

    let exit_price = match side {
        Direction::Long => price - params.price_offset,
        Direction::Short => price + params.price_offset,
    };
    Some(OrderRequest::close(side.closing(), exit_price, net_position.abs()))
}
