//! Breakout strategy: the per-instrument callback surface.
//!
//! One `BreakoutStrategy` owns all signal state for one instrument: the bar
//! generator, indicator window, cycle gate, indicator snapshot, the
//! working-order list captured at cycle start, and the position with its stop
//! levels. The host delivers callbacks strictly in order on a single thread.
//!
//! Flow per tick:
//! 1. The tick goes through the bar generator; a completed 1-minute bar is
//!    handled by `on_bar`, which may complete a cycle bar and start a cycle.
//! 2. The tick is wrapped in a synthetic bar and run through the entry
//!    evaluator against the current snapshot.
//! 3. If a position is open, the exit evaluator checks for a breach.

use super::entry::{evaluate_entry, OrderParams};
use super::exit::evaluate_exit;
use super::gate::CycleGate;
use super::snapshot::{IndicatorSnapshot, PriorBar};
use super::state::{PositionState, StrategyVariables};
use super::stop::protective_stop;
use crate::bars::{BarGenerator, IndicatorWindow};
use crate::bars::trailing_days;
use crate::config::{ConfigError, StrategyConfig};
use crate::domain::{
    Bar, Direction, Order, OrderId, OrderRequest, PositionSnapshot, StopOrder, Tick, Trade,
};
use crate::execution::{ExecutionGateway, GatewayEvent};
use tracing::{debug, info, warn};

pub struct BreakoutStrategy<G> {
    config: StrategyConfig,
    params: OrderParams,
    generator: BarGenerator,
    window: IndicatorWindow,
    gate: CycleGate,
    snapshot: Option<IndicatorSnapshot>,
    working_orders: Vec<Order>,
    position: PositionState,
    position_snapshots: Vec<PositionSnapshot>,
    inited: bool,
    trading: bool,
    gateway: G,
}

impl<G: ExecutionGateway> BreakoutStrategy<G> {
    /// Build a strategy for `config.symbol`. The config is validated first,
    /// so window and cycle lengths are known to be usable.
    pub fn new(config: StrategyConfig, gateway: G) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            params: OrderParams {
                fixed_size: config.fixed_size,
                price_offset: config.price_offset,
            },
            generator: BarGenerator::new(config.cycle_minutes),
            window: IndicatorWindow::new(config.window_capacity),
            gate: CycleGate::new(),
            snapshot: None,
            working_orders: Vec::new(),
            position: PositionState::default(),
            position_snapshots: Vec::new(),
            inited: false,
            trading: false,
            gateway,
            config,
        })
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Warm up from historical 1-minute bars. Only the last `warmup_days`
    /// days before the newest bar are replayed. Trading stays disabled, so
    /// the replay builds indicator state without touching the gateway.
    pub fn on_init(&mut self, history: &[Bar]) {
        let warmup = trailing_days(history, self.config.warmup_days);
        info!(
            "{}: strategy init, replaying {} of {} history bars",
            self.config.symbol,
            warmup.len(),
            history.len()
        );
        for bar in warmup {
            self.on_bar(bar);
        }
        self.inited = true;
    }

    pub fn on_start(&mut self) {
        if !self.inited {
            warn!("{}: start ignored, strategy not initialized", self.config.symbol);
            return;
        }
        info!("{}: strategy started", self.config.symbol);
        self.trading = true;
    }

    pub fn on_stop(&mut self) {
        info!("{}: strategy stopped", self.config.symbol);
        self.trading = false;
    }

    // ── Market data ────────────────────────────────────────────────────

    pub fn on_tick(&mut self, tick: &Tick) {
        if tick.symbol != self.config.symbol || tick.is_void() {
            return;
        }
        if self.generator.is_stale(tick) {
            debug!("{}: stale tick at {} ignored", tick.symbol, tick.datetime);
            return;
        }
        if let Some(bar) = self.generator.update_tick(tick) {
            self.on_bar(&bar);
        }
        self.try_entry(&Bar::synthetic(tick));
        self.try_exit(tick);
    }

    /// Completed 1-minute bar.
    pub fn on_bar(&mut self, bar: &Bar) {
        if let Some(cycle_bar) = self.generator.update_bar(bar) {
            self.on_fifteen_minute_bar(&cycle_bar);
        }
    }

    /// Completed cycle bar: start a new cycle, then run the entry check on it.
    ///
    /// The bar is already the window's last bar when the check runs, so it is
    /// its own prior bar and cannot clear its own high or low. Entries come
    /// from the per-tick check in `on_tick`.
    pub fn on_fifteen_minute_bar(&mut self, bar: &Bar) {
        if self.begin_cycle(bar) {
            self.try_entry(bar);
        }
    }

    // ── Gateway callbacks ──────────────────────────────────────────────

    /// Order status changes need no reaction; fills arrive via `on_trade_fill`.
    pub fn on_order_update(&mut self, _order: &Order) {}

    pub fn on_stop_order_update(&mut self, _stop_order: &StopOrder) {}

    pub fn on_trade_fill(&mut self, trade: &Trade) {
        if trade.symbol != self.config.symbol {
            return;
        }
        self.position.apply_fill(trade);
        self.position_snapshots = self.gateway.current_position_snapshots();

        let Some(prior) = PriorBar::from_window(&self.window) else {
            debug!("{}: fill {} before window initialized", trade.symbol, trade.id);
            return;
        };
        let Some(stop) = protective_stop(trade, &prior) else {
            debug!(
                "{}: {} {} fill {} @ {}, no stop attached",
                trade.symbol, trade.direction, trade.offset, trade.volume, trade.price
            );
            return;
        };
        self.position.record_stop(stop.side, stop.stop_price);
        if self.submit(&stop.request).is_some() {
            info!(
                "{}: {} {} fill {} @ {}, protective stop set at {}",
                trade.symbol, trade.direction, trade.offset, trade.volume, trade.price, stop.stop_price
            );
        }
    }

    /// Route a gateway event to its callback.
    pub fn dispatch(&mut self, event: &GatewayEvent) {
        match event {
            GatewayEvent::OrderUpdate(order) => self.on_order_update(order),
            GatewayEvent::StopOrderUpdate(stop) => self.on_stop_order_update(stop),
            GatewayEvent::Trade(trade) => self.on_trade_fill(trade),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn gate(&self) -> &CycleGate {
        &self.gate
    }

    pub fn snapshot(&self) -> Option<&IndicatorSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn position(&self) -> &PositionState {
        &self.position
    }

    pub fn position_snapshots(&self) -> &[PositionSnapshot] {
        &self.position_snapshots
    }

    pub fn working_orders(&self) -> &[Order] {
        &self.working_orders
    }

    pub fn window(&self) -> &IndicatorWindow {
        &self.window
    }

    pub fn is_inited(&self) -> bool {
        self.inited
    }

    pub fn is_trading(&self) -> bool {
        self.trading
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn variables(&self) -> StrategyVariables {
        StrategyVariables {
            symbol: self.config.symbol.clone(),
            inited: self.inited,
            trading: self.trading,
            ma_current: self.snapshot.map(|s| s.ma_current),
            ma_previous: self.snapshot.map(|s| s.ma_previous),
            entry_lock: self.gate.entry(),
            exit_latch: self.gate.exit(),
            position: self.position,
            working_orders: self.working_orders.len(),
        }
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Reset the gate and capture the cycle's state. Returns false while the
    /// window is still warming up, in which case the cycle takes no action.
    fn begin_cycle(&mut self, bar: &Bar) -> bool {
        self.gate.reset();
        self.window.update_bar(bar);
        if !self.window.is_initialized() {
            debug!(
                "{}: cycle {} skipped, window {}/{}",
                self.config.symbol,
                bar.datetime,
                self.window.count(),
                self.window.capacity()
            );
            return false;
        }

        if self.trading {
            self.gateway.cancel_all_working_orders(&self.config.symbol);
        }
        self.snapshot = IndicatorSnapshot::capture(&self.window, self.config.ma_window);
        self.working_orders = self.gateway.list_working_orders(&self.config.symbol);
        debug!(
            "{}: cycle {} ma={:?} working_orders={}",
            self.config.symbol,
            bar.datetime,
            self.snapshot.map(|s| (s.ma_previous, s.ma_current)),
            self.working_orders.len()
        );
        true
    }

    fn try_entry(&mut self, bar: &Bar) {
        if !self.trading {
            return;
        }
        let Some(snapshot) = self.snapshot.as_ref() else {
            return;
        };
        let Some(request) =
            evaluate_entry(bar, snapshot, &self.gate, self.position.net, &self.params)
        else {
            return;
        };
        // The lock closes on the attempt, whether or not the gateway accepts it.
        self.gate.lock_entry();
        if self.submit(&request).is_some() {
            info!(
                "{}: open {} at {}, volume {}",
                self.config.symbol, request.direction, request.price, request.volume
            );
        }
    }

    fn try_exit(&mut self, tick: &Tick) {
        if !self.trading || self.position.is_flat() {
            return;
        }
        let Some(prior) = PriorBar::from_window(&self.window) else {
            return;
        };
        let Some(request) = evaluate_exit(
            &self.config.symbol,
            tick.last_price,
            &prior,
            &self.gate,
            self.position.net,
            &self.working_orders,
            &self.params,
        ) else {
            return;
        };
        self.gate.latch_exit();
        if self.submit(&request).is_some() {
            let level = match request.direction {
                Direction::Short => prior.low,
                Direction::Long => prior.high,
            };
            info!(
                "{}: exit {} at {}, volume {} (tick {} breached {})",
                self.config.symbol,
                request.direction,
                request.price,
                request.volume,
                tick.last_price,
                level
            );
        }
    }

    fn submit(&mut self, request: &OrderRequest) -> Option<OrderId> {
        if !self.trading {
            return None;
        }
        match self.gateway.submit(&self.config.symbol, request) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(
                    "{}: {} {} order at {} rejected: {}",
                    self.config.symbol, request.direction, request.offset, request.price, err
                );
                None
            }
        }
    }
}
