//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Entry of a provider's built-in symbol directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Provider symbol (e.g., "1155.KL")
    pub symbol: String,

    /// Display name (e.g., "Maybank")
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
