//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use cyclegate_core::domain::{
    Bar, Direction, Interval, Offset, OrderId, Tick, Trade, TradeId,
};
use cyclegate_core::execution::{ExecutionGateway, PaperGateway};
use cyclegate_core::{BreakoutStrategy, StrategyConfig};

pub const SYMBOL: &str = "rb2410";

/// Small window so three cycle bars initialize it: ma_window = 2,
/// window_capacity = 3, lot = 1, offset = 2.
pub fn small_config() -> StrategyConfig {
    StrategyConfig {
        symbol: SYMBOL.to_string(),
        ma_window: 2,
        fixed_size: 1.0,
        price_offset: 2.0,
        window_capacity: 3,
        cycle_minutes: 15,
        warmup_days: 1,
    }
}

pub fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

/// Cycle bar number `index` (0-based), starting at 09:00.
pub fn cycle_bar(index: i64, open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar {
        symbol: SYMBOL.to_string(),
        interval: Interval::FifteenMinute,
        datetime: session_start() + Duration::minutes(15 * index),
        open,
        high,
        low,
        close,
        volume: 100.0,
        open_interest: 1000.0,
    }
}

/// Tick `seconds` after the start of cycle `cycle`.
pub fn tick_in_cycle(cycle: i64, seconds: i64, price: f64) -> Tick {
    Tick::new(
        SYMBOL,
        session_start() + Duration::minutes(15 * cycle) + Duration::seconds(seconds),
        price,
    )
}

/// Feed the three cycle bars that leave the snapshot at
/// ma_previous = 100, ma_current = 101, prior bar h=104 l=98 c=99.
pub fn prime<G: ExecutionGateway>(strategy: &mut BreakoutStrategy<G>) {
    strategy.on_init(&[]);
    strategy.on_start();
    strategy.on_fifteen_minute_bar(&cycle_bar(0, 97.0, 98.0, 96.0, 97.0));
    strategy.on_fifteen_minute_bar(&cycle_bar(1, 101.0, 105.0, 100.0, 103.0));
    strategy.on_fifteen_minute_bar(&cycle_bar(2, 103.0, 104.0, 98.0, 99.0));
}

pub fn primed() -> BreakoutStrategy<PaperGateway> {
    let mut strategy = BreakoutStrategy::new(small_config(), PaperGateway::new()).unwrap();
    prime(&mut strategy);
    strategy
}

pub fn fill(order_id: &OrderId, direction: Direction, offset: Offset, price: f64, volume: f64) -> Trade {
    Trade {
        id: TradeId::new(format!("t-{order_id}")),
        order_id: order_id.clone(),
        symbol: SYMBOL.to_string(),
        direction,
        offset,
        price,
        volume,
        datetime: session_start(),
    }
}

/// Gateway whose cancellations have not been processed yet: orders stay
/// working after `cancel_all_working_orders`.
#[derive(Default)]
pub struct LaggingCancelGateway {
    pub inner: PaperGateway,
    pub cancel_requests: usize,
}

impl ExecutionGateway for LaggingCancelGateway {
    fn submit_open_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
    ) -> Result<OrderId, cyclegate_core::execution::GatewayError> {
        self.inner.submit_open_order(symbol, direction, price, volume)
    }

    fn submit_close_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
        is_stop: bool,
    ) -> Result<OrderId, cyclegate_core::execution::GatewayError> {
        self.inner
            .submit_close_order(symbol, direction, price, volume, is_stop)
    }

    fn cancel_all_working_orders(&mut self, _symbol: &str) {
        self.cancel_requests += 1;
    }

    fn list_working_orders(&self, symbol: &str) -> Vec<cyclegate_core::domain::Order> {
        self.inner.list_working_orders(symbol)
    }

    fn current_position(&self, symbol: &str) -> f64 {
        self.inner.current_position(symbol)
    }

    fn current_position_snapshots(&self) -> Vec<cyclegate_core::domain::PositionSnapshot> {
        self.inner.current_position_snapshots()
    }
}
