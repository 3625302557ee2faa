//! Replay host loop: drives a strategy over recorded ticks against the
//! paper gateway.
//!
//! Each tick first lets the gateway match resting orders (delivering order,
//! stop-order and fill callbacks), then reaches the strategy's `on_tick`.

use crate::domain::{Offset, Tick};
use crate::execution::{ExecutionGateway, PaperGateway};
use crate::strategy::{BreakoutStrategy, StrategyVariables};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of a replay run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub symbol: String,
    pub ticks_processed: usize,
    pub entries_submitted: usize,
    pub exits_submitted: usize,
    pub stops_submitted: usize,
    pub trades: usize,
    pub final_position: f64,
    pub realized_pnl: f64,
    pub variables: StrategyVariables,
}

pub fn run_replay(strategy: &mut BreakoutStrategy<PaperGateway>, ticks: &[Tick]) -> ReplaySummary {
    let submitted_before = strategy.gateway().submitted().len();
    let trades_before = strategy.gateway().trades().len();
    let symbol = strategy.config().symbol.clone();

    let mut processed = 0;
    for tick in ticks {
        let events = strategy.gateway_mut().match_tick(tick);
        for event in &events {
            strategy.dispatch(event);
        }
        strategy.on_tick(tick);
        processed += 1;
    }
    // Deliver anything queued by the last tick's submissions.
    for event in strategy.gateway_mut().drain_events() {
        strategy.dispatch(&event);
    }

    let gateway = strategy.gateway();
    let new_orders = &gateway.submitted()[submitted_before..];
    let summary = ReplaySummary {
        ticks_processed: processed,
        entries_submitted: new_orders
            .iter()
            .filter(|s| s.request.offset == Offset::Open)
            .count(),
        exits_submitted: new_orders
            .iter()
            .filter(|s| s.request.offset == Offset::Close && !s.request.is_stop)
            .count(),
        stops_submitted: new_orders.iter().filter(|s| s.request.is_stop).count(),
        trades: gateway.trades().len() - trades_before,
        final_position: gateway.current_position(&symbol),
        realized_pnl: gateway.realized_pnl(&symbol),
        variables: strategy.variables(),
        symbol,
    };
    info!(
        "{}: replayed {} ticks, {} entries, {} exits, {} stops, {} trades, pnl {:.2}",
        summary.symbol,
        summary.ticks_processed,
        summary.entries_submitted,
        summary.exits_submitted,
        summary.stops_submitted,
        summary.trades,
        summary.realized_pnl
    );
    summary
}
