//! Paper gateway: in-memory order matching against incoming ticks.
//!
//! Matching rules, applied in `match_tick`:
//! - Stop orders trigger when a sell stop sees `price <= stop` or a buy stop
//!   sees `price >= stop`, then fill at the tick price.
//! - Limit buys fill when `price <= limit`, limit sells when `price >= limit`,
//!   at the limit price.
//!
//! Positions are updated before the fill events are returned, so a strategy
//! handling the `Trade` event sees the gateway already reflecting it.

use super::gateway::{validate_request, ExecutionGateway, GatewayError, GatewayEvent};
use crate::domain::{
    Direction, Offset, Order, OrderId, OrderRequest, OrderStatus, PositionSnapshot, StopOrder,
    StopOrderStatus, Tick, Trade, TradeId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Audit record of an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedOrder {
    pub id: OrderId,
    pub symbol: String,
    pub request: OrderRequest,
    pub datetime: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct Holding {
    volume: f64,
    avg_price: f64,
    realized_pnl: f64,
}

impl Holding {
    fn apply_fill(&mut self, signed_qty: f64, price: f64) {
        let prev = self.volume;
        let next = prev + signed_qty;
        if prev == 0.0 || (prev > 0.0) == (signed_qty > 0.0) {
            let total = prev.abs() + signed_qty.abs();
            if total > 0.0 {
                self.avg_price = (self.avg_price * prev.abs() + price * signed_qty.abs()) / total;
            }
        } else {
            let closed = signed_qty.abs().min(prev.abs());
            self.realized_pnl += closed * (price - self.avg_price) * prev.signum();
            if next == 0.0 {
                self.avg_price = 0.0;
            } else if (next > 0.0) != (prev > 0.0) {
                self.avg_price = price;
            }
        }
        self.volume = next;
    }
}

#[derive(Debug, Default)]
pub struct PaperGateway {
    symbols: Option<HashSet<String>>,
    orders: Vec<Order>,
    stop_orders: Vec<StopOrder>,
    holdings: BTreeMap<String, Holding>,
    submitted: Vec<SubmittedOrder>,
    pending: Vec<GatewayEvent>,
    trades: Vec<Trade>,
    next_order: u64,
    next_trade: u64,
    now: Option<DateTime<Utc>>,
}

impl PaperGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that rejects orders for any symbol outside `symbols`.
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: Some(symbols.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every accepted submission, in order.
    pub fn submitted(&self) -> &[SubmittedOrder] {
        &self.submitted
    }

    /// Every fill produced so far, in order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn stop_orders(&self) -> &[StopOrder] {
        &self.stop_orders
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn realized_pnl(&self, symbol: &str) -> f64 {
        self.holdings
            .get(symbol)
            .map(|h| h.realized_pnl)
            .unwrap_or(0.0)
    }

    /// Events queued since the last drain (submissions, cancellations).
    pub fn drain_events(&mut self) -> Vec<GatewayEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Advance the clock to `tick` and match working orders against its price.
    ///
    /// Returns queued events followed by the fills this tick produced.
    pub fn match_tick(&mut self, tick: &Tick) -> Vec<GatewayEvent> {
        self.now = Some(tick.datetime);
        let mut events = self.drain_events();
        if tick.is_void() {
            return events;
        }
        let price = tick.last_price;

        let triggered: Vec<usize> = self
            .stop_orders
            .iter()
            .enumerate()
            .filter(|(_, s)| s.symbol == tick.symbol && s.is_waiting() && s.is_triggered_by(price))
            .map(|(i, _)| i)
            .collect();
        for i in triggered {
            self.stop_orders[i].status = StopOrderStatus::Triggered;
            let stop = self.stop_orders[i].clone();
            let trade = self.record_trade(
                &stop.id,
                &stop.symbol,
                stop.direction,
                stop.offset,
                price,
                stop.volume,
            );
            events.push(GatewayEvent::StopOrderUpdate(stop));
            events.push(GatewayEvent::Trade(trade));
        }

        let crossed: Vec<usize> = self
            .orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.symbol == tick.symbol && o.is_active() && crosses(o, price))
            .map(|(i, _)| i)
            .collect();
        for i in crossed {
            let order = &mut self.orders[i];
            let volume = order.remaining();
            order.traded = order.volume;
            order.status = OrderStatus::AllTraded;
            let order = order.clone();
            let trade = self.record_trade(
                &order.id,
                &order.symbol,
                order.direction,
                order.offset,
                order.price,
                volume,
            );
            events.push(GatewayEvent::OrderUpdate(order));
            events.push(GatewayEvent::Trade(trade));
        }

        events
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), GatewayError> {
        match &self.symbols {
            Some(known) if !known.contains(symbol) => {
                Err(GatewayError::UnknownSymbol(symbol.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn allocate_order_id(&mut self) -> OrderId {
        self.next_order += 1;
        OrderId::from(self.next_order)
    }

    fn record_trade(
        &mut self,
        order_id: &OrderId,
        symbol: &str,
        direction: Direction,
        offset: Offset,
        price: f64,
        volume: f64,
    ) -> Trade {
        self.next_trade += 1;
        let trade = Trade {
            id: TradeId::from(self.next_trade),
            order_id: order_id.clone(),
            symbol: symbol.to_string(),
            direction,
            offset,
            price,
            volume,
            datetime: self.now(),
        };
        self.holdings
            .entry(symbol.to_string())
            .or_default()
            .apply_fill(trade.signed_volume(), price);
        self.trades.push(trade.clone());
        trade
    }

    fn place(&mut self, symbol: &str, request: OrderRequest) -> Result<OrderId, GatewayError> {
        self.check_symbol(symbol)?;
        validate_request(request.price, request.volume)?;

        let id = self.allocate_order_id();
        let datetime = self.now();
        if request.is_stop {
            let stop = StopOrder {
                id: id.clone(),
                symbol: symbol.to_string(),
                direction: request.direction,
                offset: request.offset,
                stop_price: request.price,
                volume: request.volume,
                status: StopOrderStatus::Waiting,
                datetime,
            };
            self.pending.push(GatewayEvent::StopOrderUpdate(stop.clone()));
            self.stop_orders.push(stop);
        } else {
            let order = Order {
                id: id.clone(),
                symbol: symbol.to_string(),
                direction: request.direction,
                offset: request.offset,
                price: request.price,
                volume: request.volume,
                traded: 0.0,
                status: OrderStatus::NotTraded,
                datetime,
            };
            self.pending.push(GatewayEvent::OrderUpdate(order.clone()));
            self.orders.push(order);
        }
        self.submitted.push(SubmittedOrder {
            id: id.clone(),
            symbol: symbol.to_string(),
            request,
            datetime,
        });
        Ok(id)
    }
}

fn crosses(order: &Order, price: f64) -> bool {
    match order.direction {
        Direction::Long => price <= order.price,
        Direction::Short => price >= order.price,
    }
}

impl ExecutionGateway for PaperGateway {
    fn submit_open_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
    ) -> Result<OrderId, GatewayError> {
        self.place(symbol, OrderRequest::open(direction, price, volume))
    }

    fn submit_close_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
        is_stop: bool,
    ) -> Result<OrderId, GatewayError> {
        let request = if is_stop {
            OrderRequest::stop(direction, price, volume)
        } else {
            OrderRequest::close(direction, price, volume)
        };
        self.place(symbol, request)
    }

    fn cancel_all_working_orders(&mut self, symbol: &str) {
        for order in self
            .orders
            .iter_mut()
            .filter(|o| o.symbol == symbol && o.is_active())
        {
            order.status = OrderStatus::Cancelled;
            self.pending.push(GatewayEvent::OrderUpdate(order.clone()));
        }
        for stop in self
            .stop_orders
            .iter_mut()
            .filter(|s| s.symbol == symbol && s.is_waiting())
        {
            stop.status = StopOrderStatus::Cancelled;
            self.pending.push(GatewayEvent::StopOrderUpdate(stop.clone()));
        }
    }

    fn list_working_orders(&self, symbol: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.symbol == symbol && o.is_active())
            .cloned()
            .collect()
    }

    fn current_position(&self, symbol: &str) -> f64 {
        self.holdings.get(symbol).map(|h| h.volume).unwrap_or(0.0)
    }

    fn current_position_snapshots(&self) -> Vec<PositionSnapshot> {
        self.holdings
            .iter()
            .map(|(symbol, h)| PositionSnapshot {
                symbol: symbol.clone(),
                volume: h.volume,
                avg_price: h.avg_price,
            })
            .collect()
    }
}
