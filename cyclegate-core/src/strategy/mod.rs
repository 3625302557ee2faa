//! Strategy core: cycle control, breakout entry, protective stops, exits.
//!
//! The evaluators are pure functions of their declared inputs; all mutable
//! state lives in `BreakoutStrategy`, which calls them from the host's
//! callbacks.

pub mod breakout;
pub mod entry;
pub mod exit;
pub mod gate;
pub mod snapshot;
pub mod state;
pub mod stop;

pub use breakout::BreakoutStrategy;
pub use entry::{breakout_direction, evaluate_entry, OrderParams};
pub use exit::evaluate_exit;
pub use gate::{CycleGate, EntryLock, ExitLatch};
pub use snapshot::{IndicatorSnapshot, PriorBar};
pub use state::{PositionState, StrategyVariables};
pub use stop::{protective_stop, ProtectiveStop};
