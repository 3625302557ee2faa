//! Execution gateway: the order-routing collaborator.
//!
//! The strategy talks to the execution side only through `ExecutionGateway`.
//! `PaperGateway` is the in-memory implementation used for replay and tests;
//! a live adapter implements the same trait.

pub mod gateway;
pub mod paper;

pub use gateway::{ExecutionGateway, GatewayError, GatewayEvent};
pub use paper::{PaperGateway, SubmittedOrder};
