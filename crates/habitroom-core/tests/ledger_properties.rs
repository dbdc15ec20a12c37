//! Property tests for ledger invariants.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use habitroom_core::{LedgerOptions, MemoryStore, RunPosition, SeedPlan, StreakLedger};
use proptest::prelude::*;

const WINDOW: u64 = 40;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
}

fn offset(n: u64) -> NaiveDate {
    base() + Days::new(n)
}

#[derive(Debug, Clone)]
enum Op {
    Break(u64, String),
    Undo(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..WINDOW, "[A-Za-z]{1,8}").prop_map(|(d, r)| Op::Break(d, r)),
        (0..WINDOW).prop_map(Op::Undo),
    ]
}

fn ledger_with(seeded: &[u64]) -> StreakLedger<MemoryStore> {
    let dates = seeded.iter().map(|n| offset(*n).format("%Y-%m-%d").to_string()).collect();
    let options = LedgerOptions::new("prop").with_seed(SeedPlan::Explicit { dates });
    StreakLedger::open(MemoryStore::new(), &options, offset(WINDOW))
}

proptest! {
    #[test]
    fn active_and_broken_never_overlap(
        seeded in prop::collection::vec(0..WINDOW, 1..20),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut ledger = ledger_with(&seeded);
        for op in ops {
            match op {
                Op::Break(d, reason) => ledger.record_break(offset(d), reason).unwrap(),
                Op::Undo(d) => {
                    ledger.undo_break(offset(d));
                }
            }
            let active: HashSet<_> = ledger.active_days().into_iter().collect();
            for (date, _) in ledger.broken_days() {
                prop_assert!(!active.contains(&date));
            }
        }
    }

    #[test]
    fn undo_restores_active_after_break(
        seeded in prop::collection::vec(0..WINDOW, 1..20),
        d in 0..WINDOW,
        reason in "[a-z ]{0,10}[a-z]",
    ) {
        let mut ledger = ledger_with(&seeded);
        ledger.record_break(offset(d), reason).unwrap();
        prop_assert!(ledger.undo_break(offset(d)));
        prop_assert!(ledger.day_status(offset(d)).is_active());
        prop_assert!(ledger.break_reason(offset(d)).is_none());
    }

    #[test]
    fn run_end_predecessor_is_in_same_run(
        seeded in prop::collection::vec(0..WINDOW, 1..30),
        d in 1..WINDOW,
    ) {
        let ledger = ledger_with(&seeded);
        if ledger.run_boundary(offset(d)).position() == Some(RunPosition::End) {
            let prev = ledger.run_boundary(offset(d - 1)).position();
            prop_assert!(matches!(prev, Some(RunPosition::Middle) | Some(RunPosition::Start)));
        }
    }

    #[test]
    fn streak_equals_contiguous_run_length(len in 1..WINDOW) {
        let seeded: Vec<u64> = (WINDOW - len..WINDOW).collect();
        let ledger = ledger_with(&seeded);
        prop_assert_eq!(ledger.current_streak(offset(WINDOW)), len as u32);
        // growing the run backward never shrinks the streak
        if len > 1 {
            let shorter: Vec<u64> = (WINDOW - len + 1..WINDOW).collect();
            let smaller = ledger_with(&shorter);
            prop_assert!(smaller.current_streak(offset(WINDOW)) <= ledger.current_streak(offset(WINDOW)));
        }
    }

    #[test]
    fn streak_is_zero_when_predecessor_not_active(
        seeded in prop::collection::vec(0..WINDOW - 1, 1..20),
    ) {
        let ledger = ledger_with(&seeded);
        prop_assert_eq!(ledger.current_streak(offset(WINDOW)), 0);
    }
}
