//! Property tests for the cycle gate invariants.
//!
//! Uses proptest to verify:
//! 1. At most one entry per cycle, however often the breakout re-triggers
//! 2. At most one exit per cycle while the breach persists
//! 3. Cycle-boundary cancellation never touches the position or its stops

mod common;

use common::*;
use cyclegate_core::domain::{Direction, Offset};
use proptest::prelude::*;

fn arb_prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((85.0..120.0_f64).prop_map(|p| (p * 4.0).round() / 4.0), 1..60)
}

fn count(s: &cyclegate_core::BreakoutStrategy<cyclegate_core::execution::PaperGateway>, offset: Offset, stop: bool) -> usize {
    s.gateway()
        .submitted()
        .iter()
        .filter(|o| o.request.offset == offset && o.request.is_stop == stop)
        .count()
}

proptest! {
    /// Any tick path inside one cycle submits at most one entry.
    #[test]
    fn at_most_one_entry_per_cycle(prices in arb_prices()) {
        let mut s = primed();
        for (i, price) in prices.iter().enumerate() {
            s.on_tick(&tick_in_cycle(3, 5 * i as i64, *price));
        }
        prop_assert!(count(&s, Offset::Open, false) <= 1);
    }

    /// Entries across several cycles: never more than one between resets.
    #[test]
    fn at_most_one_entry_between_resets(
        cycles in prop::collection::vec((arb_prices(), 95.0..105.0_f64), 1..5),
    ) {
        let mut s = primed();
        for (k, (prices, close)) in cycles.iter().enumerate() {
            let cycle = 3 + k as i64;
            let before = count(&s, Offset::Open, false);
            for (i, price) in prices.iter().enumerate() {
                s.on_tick(&tick_in_cycle(cycle, 5 * i as i64, *price));
            }
            prop_assert!(count(&s, Offset::Open, false) - before <= 1);
            s.on_fifteen_minute_bar(&cycle_bar(cycle, *close, close + 2.0, close - 2.0, *close));
        }
    }

    /// With a long open, a persistent breach produces a single exit per cycle.
    #[test]
    fn at_most_one_exit_per_cycle(prices in arb_prices()) {
        let mut s = primed();
        s.on_tick(&tick_in_cycle(3, 0, 105.0));
        let entry_id = s.gateway().submitted()[0].id.clone();
        s.on_trade_fill(&fill(&entry_id, Direction::Long, Offset::Open, 107.0, 1.0));

        for (i, price) in prices.iter().enumerate() {
            s.on_tick(&tick_in_cycle(3, 1 + 5 * i as i64, *price));
        }
        let exits = count(&s, Offset::Close, false);
        prop_assert!(exits <= 1);
        prop_assert_eq!(exits == 1, prices.iter().any(|p| *p < 98.0));
        // Stop attachment happened exactly once.
        prop_assert_eq!(count(&s, Offset::Close, true), 1);
    }

    /// Cancelling at the cycle boundary leaves net volume and stops intact.
    #[test]
    fn boundary_cancel_preserves_position(
        long in any::<bool>(),
        volume in 1..5u32,
        close in 90.0..110.0_f64,
    ) {
        let mut s = primed();
        let (direction, price) = if long { (Direction::Long, 105.0) } else { (Direction::Short, 97.0) };
        s.on_tick(&tick_in_cycle(3, 0, price));
        let entry_id = s.gateway().submitted()[0].id.clone();
        s.on_trade_fill(&fill(&entry_id, direction, Offset::Open, price, volume as f64));
        let before = *s.position();

        s.on_fifteen_minute_bar(&cycle_bar(3, close, close + 1.0, close - 1.0, close));

        prop_assert_eq!(*s.position(), before);
        prop_assert!(s.working_orders().is_empty());
    }
}
