//! Cycle gate: per-cycle entry lock and exit latch.
//!
//! Both flags reset at the start of every cycle bar and move one way only
//! within a cycle:
//!
//! ```text
//! EntryLock: Ready ──submit entry──▶ EntrySubmitted
//! ExitLatch: Idle  ──submit exit───▶ ExitSubmitted
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryLock {
    #[default]
    Ready,
    EntrySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExitLatch {
    #[default]
    Idle,
    ExitSubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CycleGate {
    entry: EntryLock,
    exit: ExitLatch,
}

impl CycleGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of a new cycle: both flags return to their initial state.
    pub fn reset(&mut self) {
        self.entry = EntryLock::Ready;
        self.exit = ExitLatch::Idle;
    }

    pub fn entry(&self) -> EntryLock {
        self.entry
    }

    pub fn exit(&self) -> ExitLatch {
        self.exit
    }

    pub fn entry_open(&self) -> bool {
        self.entry == EntryLock::Ready
    }

    pub fn exit_armed(&self) -> bool {
        self.exit == ExitLatch::Idle
    }

    pub fn lock_entry(&mut self) {
        self.entry = EntryLock::EntrySubmitted;
    }

    pub fn latch_exit(&mut self) {
        self.exit = ExitLatch::ExitSubmitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open_and_armed() {
        let gate = CycleGate::new();
        assert!(gate.entry_open());
        assert!(gate.exit_armed());
    }

    #[test]
    fn flags_are_independent() {
        let mut gate = CycleGate::new();
        gate.lock_entry();
        assert!(!gate.entry_open());
        assert!(gate.exit_armed());

        let mut gate = CycleGate::new();
        gate.latch_exit();
        assert!(gate.entry_open());
        assert_eq!(gate.exit(), ExitLatch::ExitSubmitted);
    }

    #[test]
    fn reset_reopens_both() {
        let mut gate = CycleGate::new();
        gate.lock_entry();
        gate.latch_exit();
        gate.reset();
        assert_eq!(gate, CycleGate::new());
    }

    #[test]
    fn transitions_are_idempotent() {
        let mut gate = CycleGate::new();
        gate.lock_entry();
        gate.lock_entry();
        assert_eq!(gate.entry(), EntryLock::EntrySubmitted);
    }
}
