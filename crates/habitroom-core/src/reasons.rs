//! Break reason catalog.
//!
//! Users pick a reason from a fixed list when they record a break. One entry
//! is the "other" sentinel, which needs a free-text description instead.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sentinel option that asks for a free-text reason.
pub const OTHER_REASON: &str = "Other";

fn default_options() -> Vec<String> {
    [
        "Felt tired",
        "Too busy",
        "Lost motivation",
        "Unexpected interruption",
        OTHER_REASON,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_other() -> String {
    OTHER_REASON.to_string()
}

/// Enumerated break reasons plus the free-text sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCatalog {
    #[serde(default = "default_options")]
    pub options: Vec<String>,
    #[serde(default = "default_other")]
    pub other: String,
}

impl Default for ReasonCatalog {
    fn default() -> Self {
        Self {
            options: default_options(),
            other: default_other(),
        }
    }
}

impl ReasonCatalog {
    /// Build a catalog from caller-supplied options.
    ///
    /// The sentinel is appended when the list does not already contain it.
    pub fn new(options: Vec<String>, other: impl Into<String>) -> Self {
        let other = other.into();
        let mut options = options;
        if !options.iter().any(|o| *o == other) {
            options.push(other.clone());
        }
        Self { options, other }
    }

    pub fn is_other(&self, selection: &str) -> bool {
        selection == self.other
    }

    pub fn contains(&self, selection: &str) -> bool {
        self.is_other(selection) || self.options.iter().any(|o| o == selection)
    }

    /// Turn a menu selection into the reason string stored for a break.
    ///
    /// # Errors
    /// - `UnknownReason` if `selection` is not in the catalog
    /// - `MissingCustomReason` if the sentinel was picked without text
    pub fn resolve(&self, selection: &str, free_text: Option<&str>) -> Result<String, ValidationError> {
        if !self.contains(selection) {
            return Err(ValidationError::UnknownReason {
                selection: selection.to_string(),
                options: self.options.join(", "),
            });
        }

        if self.is_other(selection) {
            return match free_text.map(str::trim) {
                Some(text) if !text.is_empty() => Ok(text.to_string()),
                _ => Err(ValidationError::MissingCustomReason(selection.to_string())),
            };
        }

        Ok(selection.to_string())
    }
}
