//! Gateway trait, events, and errors.

use crate::domain::{
    Direction, Offset, Order, OrderId, OrderRequest, PositionSnapshot, StopOrder, Trade,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a gateway may return when accepting an order request.
#[derive(Debug, Error, PartialEq)]
pub enum GatewayError {
    #[error("invalid volume {0}: must be finite and positive")]
    InvalidVolume(f64),

    #[error("invalid price {0}: must be finite")]
    InvalidPrice(f64),

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),
}

/// Callback payloads the gateway delivers back to the strategy, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GatewayEvent {
    OrderUpdate(Order),
    StopOrderUpdate(StopOrder),
    Trade(Trade),
}

/// Order routing and position queries for one account.
///
/// Cancellation is fire-and-forget: `cancel_all_working_orders` returns
/// immediately and the resulting status updates arrive later as events.
pub trait ExecutionGateway {
    fn submit_open_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
    ) -> Result<OrderId, GatewayError>;

    fn submit_close_order(
        &mut self,
        symbol: &str,
        direction: Direction,
        price: f64,
        volume: f64,
        is_stop: bool,
    ) -> Result<OrderId, GatewayError>;

    fn cancel_all_working_orders(&mut self, symbol: &str);

    fn list_working_orders(&self, symbol: &str) -> Vec<Order>;

    /// Net signed volume held in `symbol`.
    fn current_position(&self, symbol: &str) -> f64;

    fn current_position_snapshots(&self) -> Vec<PositionSnapshot>;

    /// Route an evaluator's request to the matching submit call.
    fn submit(&mut self, symbol: &str, request: &OrderRequest) -> Result<OrderId, GatewayError> {
        match request.offset {
            Offset::Open => {
                self.submit_open_order(symbol, request.direction, request.price, request.volume)
            }
            Offset::Close => self.submit_close_order(
                symbol,
                request.direction,
                request.price,
                request.volume,
                request.is_stop,
            ),
        }
    }
}

/// Shared request validation for gateway implementations.
pub(crate) fn validate_request(price: f64, volume: f64) -> Result<(), GatewayError> {
    if !volume.is_finite() || volume <= 0.0 {
        return Err(GatewayError::InvalidVolume(volume));
    }
    if !price.is_finite() {
        return Err(GatewayError::InvalidPrice(price));
    }
    Ok(())
}
