//! Validation messages by key.
//!
//! The catalog is built once at start-up and shared read-only between
//! requests.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Appointment reference is absent or blank.
pub const APPOINTMENT_ID_MISSING: &str = "reference-appointment-id-missing";
/// Resignation date is absent.
pub const RESIGNED_ON_MISSING: &str = "resigned-on-missing";
/// Resignation date is not a real date.
pub const RESIGNED_ON_INVALID: &str = "resigned-on-invalid";
/// Resignation date lies in the future.
pub const RESIGNED_ON_IN_FUTURE: &str = "resigned-on-in-future";

const DEFAULT_MESSAGES: [(&str, &str); 4] = [
    (APPOINTMENT_ID_MISSING, "Select the director you are removing"),
    (
        RESIGNED_ON_MISSING,
        "Enter the date the director stopped being a director",
    ),
    (
        RESIGNED_ON_INVALID,
        "Date the director stopped being a director must be a real date",
    ),
    (
        RESIGNED_ON_IN_FUTURE,
        "Date the director stopped being a director must be today or in the past",
    ),
];

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read message catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not a JSON object of strings.
    #[error("Failed to parse message catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// An immutable table of validation messages.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES
                .into_iter()
                .map(|(key, message)| (key.to_owned(), message.to_owned()))
                .collect(),
        }
    }
}

impl MessageCatalog {
    /// The built-in catalog with the entries of the JSON object in `path`
    /// layered on top.
    pub fn with_overrides(path: &Path) -> Result<Self, CatalogError> {
        let overrides: HashMap<String, String> =
            serde_json::from_slice(&std::fs::read(path)?)?;

        let mut catalog = Self::default();
        catalog.messages.extend(overrides);
        Ok(catalog)
    }

    /// The message for `key`. Unknown keys are logged and echoed back so a
    /// missing entry never hides the underlying error.
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        match self.messages.get(key) {
            Some(message) => message,
            None => {
                tracing::warn!(%key, "no message for key");
                key
            }
        }
    }
}
