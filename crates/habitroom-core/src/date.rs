//! Canonical calendar-day keys.
//!
//! Every day the ledger knows about is a `NaiveDate`; strings only exist at
//! the edges (persisted bytes, CLI arguments). Parsing is strict so that one
//! calendar day can never map to two differently formatted keys.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// Key format used for persisted state and caller input.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` day key.
///
/// Only the zero-padded canonical form is accepted: `2025-5-3`,
/// `2025-02-30` and `2025-05-03T00:00` are all rejected.
pub fn parse_day(input: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(input.to_string());
    if input.len() != 10 {
        return Err(invalid());
    }
    let date = NaiveDate::parse_from_str(input, DAY_FORMAT).map_err(|_| invalid())?;
    if format_day(date) != input {
        return Err(invalid());
    }
    Ok(date)
}

/// Render a day as its canonical key.
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Parse a `YYYY-MM` month into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidMonth(input.to_string());
    if input.len() != 7 {
        return Err(invalid());
    }
    let first = parse_day(&format!("{input}-01")).map_err(|_| invalid())?;
    Ok((first.year(), first.month()))
}

/// All days of a month in ascending order.
pub fn month_days(year: i32, month: u32) -> Result<Vec<NaiveDate>, ValidationError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ValidationError::InvalidMonth(format!("{year:04}-{month:02}")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}
