//! Streak ledger.
//!
//! Owns the per-day state of one habit: the set of active days and the map
//! of broken days with their reasons. The two are kept disjoint; a day is
//! never active and broken at the same time.
//!
//! The ledger is synchronous and single-writer. Hosts that share one ledger
//! across threads must wrap the whole instance in a lock, since
//! `record_break` and `undo_break` are read-modify-write sequences.
//!
//! Every mutation is followed by a save of both namespaces through the
//! [`PersistenceProvider`]. Save failures are logged and dropped.

mod codec;
mod types;

pub use codec::MalformedState;
pub use types::{DayStatus, RunBoundary, RunPosition, StreakAnchor};

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::seed::SeedPlan;
use crate::storage::{breaks_key, streaks_key, PersistenceProvider};

/// How a ledger is initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerOptions {
    /// Habit identifier; selects the two persistence namespaces.
    pub habit_key: String,
    /// Fallback active days when nothing usable is persisted.
    pub seed: SeedPlan,
    pub anchor: StreakAnchor,
}

impl LedgerOptions {
    pub fn new(habit_key: impl Into<String>) -> Self {
        Self {
            habit_key: habit_key.into(),
            seed: SeedPlan::default(),
            anchor: StreakAnchor::default(),
        }
    }

    pub fn with_seed(mut self, seed: SeedPlan) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_anchor(mut self, anchor: StreakAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

pub struct StreakLedger<P: PersistenceProvider> {
    provider: P,
    habit_key: String,
    anchor: StreakAnchor,
    active: BTreeSet<NaiveDate>,
    broken: BTreeMap<NaiveDate, String>,
}

impl<P: PersistenceProvider> StreakLedger<P> {
    /// Load ledger state from `provider`, falling back to the seed plan.
    ///
    /// Never fails: an absent, unreadable or malformed active-day list is
    /// replaced by the seed; a malformed broken-day map is replaced by an
    /// empty one. An empty active list is only seeded when no breaks are
    /// recorded either, i.e. the habit has never been touched. The resulting
    /// state is persisted immediately.
    pub fn open(provider: P, options: &LedgerOptions, today: NaiveDate) -> Self {
        let habit_key = options.habit_key.clone();

        let broken = match load_namespace(&provider, &breaks_key(&habit_key)) {
            Some(bytes) => codec::decode_broken(&bytes).unwrap_or_else(|e| {
                warn!(habit = %habit_key, error = %e, "discarding malformed break state");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };

        let loaded = load_namespace(&provider, &streaks_key(&habit_key))
            .map(|bytes| codec::decode_active(&bytes));
        let mut active = match loaded {
            Some(Ok(active)) if !active.is_empty() || !broken.is_empty() => active,
            Some(Ok(_)) => {
                debug!(habit = %habit_key, "habit has no recorded days yet; seeding");
                options.seed.dates(today)
            }
            Some(Err(e)) => {
                warn!(habit = %habit_key, error = %e, "discarding malformed streak state; seeding");
                options.seed.dates(today)
            }
            None => {
                info!(habit = %habit_key, "no stored streak state; seeding");
                options.seed.dates(today)
            }
        };

        let before = active.len();
        active.retain(|date| !broken.contains_key(date));
        if active.len() != before {
            warn!(
                habit = %habit_key,
                dropped = before - active.len(),
                "days marked both active and broken; keeping them broken"
            );
        }

        let mut ledger = Self {
            provider,
            habit_key,
            anchor: options.anchor,
            active,
            broken,
        };
        ledger.persist();
        ledger
    }

    pub fn habit_key(&self) -> &str {
        &self.habit_key
    }

    pub fn anchor(&self) -> StreakAnchor {
        self.anchor
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mark `date` as broken with `reason`, removing it from the active set.
    ///
    /// Recording the same `(date, reason)` twice leaves the state unchanged;
    /// a new reason for an already broken day overwrites the old one.
    ///
    /// # Errors
    /// `EmptyReason` if `reason` is empty or whitespace.
    pub fn record_break(&mut self, date: NaiveDate, reason: impl Into<String>) -> Result<(), ValidationError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ValidationError::EmptyReason);
        }

        let was_active = self.active.remove(&date);
        info!(habit = %self.habit_key, %date, %reason, was_active, "recorded break");
        self.broken.insert(date, reason);
        self.persist();
        Ok(())
    }

    /// Reinstate a broken day as active.
    ///
    /// Returns `false` and changes nothing when `date` is not currently
    /// broken.
    pub fn undo_break(&mut self, date: NaiveDate) -> bool {
        if self.broken.remove(&date).is_none() {
            debug!(habit = %self.habit_key, %date, "undo on a day that is not broken; ignoring");
            return false;
        }

        self.active.insert(date);
        info!(habit = %self.habit_key, %date, "undid break");
        self.persist();
        true
    }

    pub fn day_status(&self, date: NaiveDate) -> DayStatus {
        if self.active.contains(&date) {
            DayStatus::Active
        } else if let Some(reason) = self.broken.get(&date) {
            DayStatus::Broken {
                reason: reason.clone(),
            }
        } else {
            DayStatus::Unmarked
        }
    }

    /// Reason recorded for a broken day.
    pub fn break_reason(&self, date: NaiveDate) -> Option<&str> {
        self.broken.get(&date).map(String::as_str)
    }

    /// Adjacency of `date` to the active set. Looks at the two neighbours
    /// only; nothing about runs is cached.
    pub fn run_boundary(&self, date: NaiveDate) -> RunBoundary {
        RunBoundary {
            is_active: self.active.contains(&date),
            has_prev_active: date.pred_opt().is_some_and(|d| self.active.contains(&d)),
            has_next_active: date.succ_opt().is_some_and(|d| self.active.contains(&d)),
        }
    }

    /// Number of contiguous active days walking backward from the anchor day
    /// of `reference`.
    pub fn current_streak(&self, reference: NaiveDate) -> u32 {
        let mut cursor = match self.anchor {
            StreakAnchor::PreviousDay => reference.pred_opt(),
            StreakAnchor::ReferenceDay => Some(reference),
        };

        let mut count = 0;
        while let Some(day) = cursor {
            if !self.active.contains(&day) {
                break;
            }
            count += 1;
            cursor = day.pred_opt();
        }
        count
    }

    /// Active days in ascending order.
    pub fn active_days(&self) -> Vec<NaiveDate> {
        self.active.iter().copied().collect()
    }

    /// Broken days and their reasons in ascending date order.
    pub fn broken_days(&self) -> Vec<(NaiveDate, String)> {
        self.broken
            .iter()
            .map(|(date, reason)| (*date, reason.clone()))
            .collect()
    }

    /// Final persist; hands the provider back.
    pub fn close(mut self) -> P {
        self.persist();
        debug!(habit = %self.habit_key, "ledger closed");
        self.provider
    }

    fn persist(&mut self) {
        let writes = [
            (streaks_key(&self.habit_key), codec::encode_active(&self.active)),
            (breaks_key(&self.habit_key), codec::encode_broken(&self.broken)),
        ];
        for (key, bytes) in writes {
            if let Err(e) = self.provider.save(&key, &bytes) {
                warn!(%key, error = %e, "failed to persist ledger state");
            }
        }
    }
}

fn load_namespace<P: PersistenceProvider>(provider: &P, key: &str) -> Option<Vec<u8>> {
    match provider.load(key) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%key, error = %e, "failed to load ledger state; treating as missing");
            None
        }
    }
}
