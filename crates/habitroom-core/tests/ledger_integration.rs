//! Integration tests for the streak ledger.
//!
//! Walks the demo habit through a break and its undo, and checks recovery
//! from bad persisted state against both shipped providers.

use chrono::NaiveDate;
use habitroom_core::{
    parse_day, DayStatus, LedgerOptions, MemoryStore, ReasonCatalog, RunPosition, SeedPlan,
    SqliteStore, StreakLedger,
};

fn day(s: &str) -> NaiveDate {
    parse_day(s).unwrap()
}

fn demo_options() -> LedgerOptions {
    LedgerOptions::new("read-on-kindle").with_seed(SeedPlan::Explicit {
        dates: vec!["2025-05-23".into(), "2025-05-24".into(), "2025-05-25".into()],
    })
}

#[test]
fn test_streak_before_non_active_day() {
    let ledger = StreakLedger::open(MemoryStore::new(), &demo_options(), day("2025-05-26"));
    assert_eq!(ledger.current_streak(day("2025-05-26")), 3);
}

#[test]
fn test_break_then_undo_workflow() {
    let mut ledger = StreakLedger::open(MemoryStore::new(), &demo_options(), day("2025-05-26"));

    ledger.record_break(day("2025-05-25"), "Felt tired").unwrap();
    assert_eq!(ledger.active_days(), vec![day("2025-05-23"), day("2025-05-24")]);
    assert_eq!(
        ledger.broken_days(),
        vec![(day("2025-05-25"), "Felt tired".to_string())]
    );
    let boundary = ledger.run_boundary(day("2025-05-24"));
    assert!(!boundary.has_next_active);
    assert_eq!(boundary.position(), Some(RunPosition::End));
    assert_eq!(ledger.current_streak(day("2025-05-26")), 0);

    assert!(ledger.undo_break(day("2025-05-25")));
    assert_eq!(
        ledger.active_days(),
        vec![day("2025-05-23"), day("2025-05-24"), day("2025-05-25")]
    );
    assert!(ledger.broken_days().is_empty());
    assert_eq!(ledger.current_streak(day("2025-05-26")), 3);
}

#[test]
fn test_non_array_streak_state_falls_back_to_seed() {
    let store = MemoryStore::new().with_entry("read-on-kindle-streaks", r#"{"not":"an array"}"#);
    let ledger = StreakLedger::open(store, &demo_options(), day("2025-05-26"));

    assert_eq!(ledger.active_days().len(), 3);
    // the malformed bytes were replaced with the seed
    assert_eq!(
        ledger.provider().get("read-on-kindle-streaks"),
        Some(&br#"["2025-05-23","2025-05-24","2025-05-25"]"#[..])
    );
}

#[test]
fn test_default_seed_covers_days_before_today() {
    let options = LedgerOptions::new("meditate");
    let ledger = StreakLedger::open(MemoryStore::new(), &options, day("2025-01-05"));

    assert_eq!(ledger.active_days().len(), 10);
    assert_eq!(ledger.day_status(day("2025-01-05")), DayStatus::Unmarked);
    assert_eq!(ledger.day_status(day("2024-12-26")), DayStatus::Active);
    assert_eq!(ledger.current_streak(day("2025-01-05")), 10);
}

#[test]
fn test_habits_use_separate_namespaces() {
    let mut ledger = StreakLedger::open(MemoryStore::new(), &demo_options(), day("2025-05-26"));
    ledger.record_break(day("2025-05-24"), "Too busy").unwrap();
    let store = ledger.close();

    let other = StreakLedger::open(
        store,
        &LedgerOptions::new("run").with_seed(SeedPlan::Preceding { days: 2 }),
        day("2025-05-26"),
    );
    assert_eq!(other.day_status(day("2025-05-24")), DayStatus::Unmarked);
    assert_eq!(other.active_days(), vec![day("2025-05-24"), day("2025-05-25")]);
    assert!(other.provider().get("read-on-kindle-breaks").is_some());
}

#[test]
fn test_catalog_reason_recorded_through_ledger() {
    let catalog = ReasonCatalog::default();
    let mut ledger = StreakLedger::open(MemoryStore::new(), &demo_options(), day("2025-05-26"));

    let reason = catalog.resolve("Other", Some("Travelling")).unwrap();
    ledger.record_break(day("2025-05-23"), reason).unwrap();
    assert_eq!(ledger.break_reason(day("2025-05-23")), Some("Travelling"));
}

#[test]
fn test_sqlite_store_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitroom.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut ledger = StreakLedger::open(store, &demo_options(), day("2025-05-26"));
        ledger.record_break(day("2025-05-25"), "Felt tired").unwrap();
        ledger.close();
    }

    let store = SqliteStore::open_at(&path).unwrap();
    // a different seed must not be applied once state exists
    let options = demo_options().with_seed(SeedPlan::Preceding { days: 30 });
    let ledger = StreakLedger::open(store, &options, day("2025-06-30"));
    assert_eq!(ledger.active_days(), vec![day("2025-05-23"), day("2025-05-24")]);
    assert_eq!(ledger.break_reason(day("2025-05-25")), Some("Felt tired"));
}

#[test]
fn test_sqlite_garbage_is_recovered() {
    let mut store = SqliteStore::open_memory().unwrap();
    habitroom_core::PersistenceProvider::save(&mut store, "read-on-kindle-streaks", b"\xff\xfe")
        .unwrap();
    habitroom_core::PersistenceProvider::save(&mut store, "read-on-kindle-breaks", b"null")
        .unwrap();

    let ledger = StreakLedger::open(store, &demo_options(), day("2025-05-26"));
    assert_eq!(ledger.current_streak(day("2025-05-26")), 3);
    assert!(ledger.broken_days().is_empty());
}
