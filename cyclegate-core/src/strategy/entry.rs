//! Entry evaluator: moving-average breakout with a prior-bar filter.
//!
//! Long when the bar's high clears both the current average and the prior
//! bar's high, and the prior bar closed at or below the previous average.
//! Short is the mirror image, using the prior bar's high as the filter. The
//! long test runs first; the short test only runs when the long test fails.

use super::gate::CycleGate;
use super::snapshot::IndicatorSnapshot;
use crate::domain::{Bar, Direction, OrderRequest};
use serde::{Deserialize, Serialize};

/// Sizing and price buffer shared by entry and exit orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderParams {
    pub fixed_size: f64,
    pub price_offset: f64,
}

/// Which breakout pattern, if any, `bar` completes against `snapshot`.
pub fn breakout_direction(bar: &Bar, snapshot: &IndicatorSnapshot) -> Option<Direction> {
    let prior = snapshot.prior_bar();
    if bar.high > snapshot.ma_current && bar.high > prior.high && prior.close <= snapshot.ma_previous
    {
        Some(Direction::Long)
    } else if bar.low < snapshot.ma_current
        && bar.low < prior.low
        && prior.high > snapshot.ma_previous
    {
        Some(Direction::Short)
    } else {
        None
    }
}

/// Decide whether to open a position on `bar`.
///
/// Returns the order to submit; the caller locks the gate once it has been
/// sent. Nothing is returned while a position is held or the entry lock is
/// already taken for this cycle.
pub fn evaluate_entry(
    bar: &Bar,
    snapshot: &IndicatorSnapshot,
    gate: &CycleGate,
    net_position: f64,
    params: &OrderParams,
) -> Option<OrderRequest> {
    let direction = breakout_direction(bar, snapshot)?;
    if net_position != 0.0 || !gate.entry_open() {
        return None;
    }
    let price = match direction {
        Direction::Long => bar.high + params.price_offset,
        Direction::Short => bar.low - params.price_offset,
    };
    Some(OrderRequest::open(direction, price, params.fixed_size))
}
