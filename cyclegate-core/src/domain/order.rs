//! Order types: direction/offset, limit orders, local stop orders, requests.

use super::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Direction of the order that closes a position held in `self`.
    pub fn closing(self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }

    /// +1 for long, -1 for short.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// Whether an order opens or closes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Offset {
    Open,
    Close,
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Open => write!(f, "open"),
            Offset::Close => write!(f, "close"),
        }
    }
}

/// Limit order lifecycle as reported by the execution gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Submitting,
    NotTraded,
    PartTraded,
    AllTraded,
    Cancelled,
    Rejected,
}

/// A limit order known to the execution gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub symbol: String,
    pub direction: Direction,
    pub offset: Offset,
    pub price: f64,
    pub volume: f64,
    pub traded: f64,
    pub status: OrderStatus,
    pub datetime: DateTime<Utc>,
}

impl Order {
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Submitting | OrderStatus::NotTraded | OrderStatus::PartTraded
        )
    }

    pub fn remaining(&self) -> f64 {
        self.volume - self.traded
    }

    /// True if this is a working order that would close a position held in
    /// `position_side`.
    pub fn is_resting_close_for(&self, symbol: &str, position_side: Direction) -> bool {
        self.is_active()
            && self.symbol == symbol
            && self.offset == Offset::Close
            && self.direction == position_side.closing()
    }
}

/// Local stop order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopOrderStatus {
    Waiting,
    Triggered,
    Cancelled,
}

/// A stop order held by the gateway until its trigger price trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopOrder {
    pub id: OrderId,
    pub symbol: String,
    pub direction: Direction,
    pub offset: Offset,
    pub stop_price: f64,
    pub volume: f64,
    pub status: StopOrderStatus,
    pub datetime: DateTime<Utc>,
}

impl StopOrder {
    pub fn is_waiting(&self) -> bool {
        self.status == StopOrderStatus::Waiting
    }

    /// Sell stops trigger at or below the stop price, buy stops at or above.
    pub fn is_triggered_by(&self, price: f64) -> bool {
        match self.direction {
            Direction::Short => price <= self.stop_price,
            Direction::Long => price >= self.stop_price,
        }
    }
}

/// What the strategy asks the gateway to do. Produced by the evaluators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub direction: Direction,
    pub offset: Offset,
    pub price: f64,
    pub volume: f64,
    /// Protective stop rather than a resting limit order.
    pub is_stop: bool,
}

impl OrderRequest {
    pub fn open(direction: Direction, price: f64, volume: f64) -> Self {
        Self {
            direction,
            offset: Offset::Open,
            price,
            volume,
            is_stop: false,
        }
    }

    pub fn close(direction: Direction, price: f64, volume: f64) -> Self {
        Self {
            direction,
            offset: Offset::Close,
            price,
            volume,
            is_stop: false,
        }
    }

    pub fn stop(direction: Direction, price: f64, volume: f64) -> Self {
        Self {
            direction,
            offset: Offset::Close,
            price,
            volume,
            is_stop: true,
        }
    }
}
