pub mod config;
pub mod day;
pub mod mark;
pub mod status;

use chrono::NaiveDate;
use habitroom_core::{Config, SqliteStore, StreakLedger};
use habitroom_core::error::Result;

/// Ledger for `habit` backed by the on-disk store, plus the loaded config.
pub fn open_ledger(habit: Option<&str>) -> Result<(Config, StreakLedger<SqliteStore>)> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let ledger = StreakLedger::open(store, &config.ledger_options(habit), today());
    Ok((config, ledger))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
