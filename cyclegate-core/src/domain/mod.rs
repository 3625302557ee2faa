//! Domain types: ticks, bars, orders, trades, positions.

pub mod bar;
pub mod ids;
pub mod order;
pub mod position;
pub mod tick;
pub mod trade;

pub use bar::{Bar, Interval};
pub use ids::{OrderId, TradeId};
pub use order::{Direction, Offset, Order, OrderRequest, OrderStatus, StopOrder, StopOrderStatus};
pub use position::PositionSnapshot;
pub use tick::Tick;
pub use trade::Trade;
