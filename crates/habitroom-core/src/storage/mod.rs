//! Persistence for ledger state.
//!
//! The ledger only consumes the [`PersistenceProvider`] contract: opaque
//! bytes loaded and saved under a namespace key. Two providers ship with the
//! crate, an in-memory map and a SQLite key-value table.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Load/save contract for serialized ledger collections.
///
/// `save` errors are reported back to the ledger, which logs and drops them;
/// they are never surfaced to the caller of a mutation.
pub trait PersistenceProvider {
    /// Bytes stored under `key`, or `None` when nothing was stored.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `data` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError>;
}

impl<P: PersistenceProvider + ?Sized> PersistenceProvider for Box<P> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, data)
    }
}

/// Namespace holding the active-day list of a habit.
pub fn streaks_key(habit_key: &str) -> String {
    format!("{habit_key}-streaks")
}

/// Namespace holding the broken-day map of a habit.
pub fn breaks_key(habit_key: &str) -> String {
    format!("{habit_key}-breaks")
}

/// Returns the habitroom data directory, creating it if needed.
///
/// `HABITROOM_DATA_DIR` wins when set. Otherwise `~/.config/habitroom`, or
/// `~/.config/habitroom-dev` with `HABITROOM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("HABITROOM_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HABITROOM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("habitroom-dev")
            } else {
                base_dir.join("habitroom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(StorageError::DataDir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaces_are_per_habit() {
        assert_eq!(streaks_key("read"), "read-streaks");
        assert_eq!(breaks_key("read"), "read-breaks");
        assert_ne!(streaks_key("read"), streaks_key("run"));
    }

    #[test]
    fn boxed_provider_delegates() {
        let mut store: Box<dyn PersistenceProvider> = Box::new(MemoryStore::new());
        store.save("k", b"v").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some(&b"v"[..]));
    }
}
