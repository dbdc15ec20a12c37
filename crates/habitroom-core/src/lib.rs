//! # Habitroom Core Library
//!
//! Core logic for the Habitroom habit tracker. Each calendar day of a habit
//! is either part of an unbroken streak (active), a break with a recorded
//! reason, or untouched. The CLI is a thin presentation layer over this
//! library.
//!
//! ## Architecture
//!
//! - **Streak Ledger**: owns day state, enforces that active and broken days
//!   never overlap, and derives run boundaries and the current streak
//! - **Storage**: load/save contract consumed by the ledger, with in-memory
//!   and SQLite key-value implementations
//! - **Seed**: initial active days when nothing is stored yet
//! - **Reasons**: the break reason menu with its free-text "Other" option
//!
//! ## Key Components
//!
//! - [`StreakLedger`]: the ledger itself
//! - [`PersistenceProvider`]: storage contract
//! - [`Config`]: application configuration management

pub mod config;
pub mod date;
pub mod error;
pub mod ledger;
pub mod reasons;
pub mod seed;
pub mod storage;

pub use config::Config;
pub use date::{format_day, parse_day, parse_month};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use ledger::{DayStatus, LedgerOptions, RunBoundary, RunPosition, StreakAnchor, StreakLedger};
pub use reasons::ReasonCatalog;
pub use seed::SeedPlan;
pub use storage::{MemoryStore, PersistenceProvider, SqliteStore};
