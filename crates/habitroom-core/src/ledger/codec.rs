//! Wire format of the two ledger namespaces.
//!
//! Active days: JSON array of ISO day strings, ascending.
//! Broken days: JSON object mapping ISO day string to reason.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::date::{format_day, parse_day};
use crate::error::ValidationError;

/// Persisted bytes that do not have the expected collection shape.
#[derive(Error, Debug)]
pub enum MalformedState {
    #[error("unexpected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error(transparent)]
    Day(#[from] ValidationError),
}

pub fn encode_active(active: &BTreeSet<NaiveDate>) -> Vec<u8> {
    let keys: Vec<String> = active.iter().copied().map(format_day).collect();
    serde_json::to_vec(&keys).unwrap_or_else(|_| b"[]".to_vec())
}

pub fn encode_broken(broken: &BTreeMap<NaiveDate, String>) -> Vec<u8> {
    let map: BTreeMap<String, &str> = broken
        .iter()
        .map(|(date, reason)| (format_day(*date), reason.as_str()))
        .collect();
    serde_json::to_vec(&map).unwrap_or_else(|_| b"{}".to_vec())
}

/// Decode the active-day list. One bad entry rejects the whole list.
pub fn decode_active(bytes: &[u8]) -> Result<BTreeSet<NaiveDate>, MalformedState> {
    let keys: Vec<String> = serde_json::from_slice(bytes)?;
    keys.iter()
        .map(|key| parse_day(key).map_err(MalformedState::from))
        .collect()
}

/// Decode the broken-day map. One bad key rejects the whole map.
pub fn decode_broken(bytes: &[u8]) -> Result<BTreeMap<NaiveDate, String>, MalformedState> {
    let entries: BTreeMap<String, String> = serde_json::from_slice(bytes)?;
    entries
        .into_iter()
        .map(|(key, reason)| -> Result<_, MalformedState> { Ok((parse_day(&key)?, reason)) })
        .collect()
}
