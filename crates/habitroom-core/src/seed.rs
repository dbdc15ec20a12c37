//! Initial active days for a ledger with no usable persisted state.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::date::parse_day;

/// Days seeded before today when nothing else is configured.
pub const DEFAULT_SEED_DAYS: u32 = 10;

/// Upper bound on `Preceding` seeds; larger values are clamped.
pub const MAX_SEED_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedPlan {
    /// The `days` calendar days immediately before today. Today is excluded.
    Preceding { days: u32 },
    /// A fixed list of ISO dates.
    Explicit { dates: Vec<String> },
}

impl Default for SeedPlan {
    fn default() -> Self {
        SeedPlan::Preceding {
            days: DEFAULT_SEED_DAYS,
        }
    }
}

impl SeedPlan {
    /// Resolve the plan into concrete days relative to `today`.
    pub fn dates(&self, today: NaiveDate) -> BTreeSet<NaiveDate> {
        match self {
            SeedPlan::Preceding { days } => (1..=u64::from((*days).min(MAX_SEED_DAYS)))
                .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
                .collect(),
            SeedPlan::Explicit { dates } => dates
                .iter()
                .filter_map(|raw| match parse_day(raw) {
                    Ok(date) => Some(date),
                    Err(e) => {
                        warn!(%e, "skipping seed date");
                        None
                    }
                })
                .collect(),
        }
    }
}
