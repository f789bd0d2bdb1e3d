//! External-handoff settings boundary.
//!
//! The original tool reads these two strings from a user settings area; the
//! core only decides whether a handoff is possible, never how the settings
//! are edited.

use serde::{Deserialize, Serialize};

/// Destination settings for the external note-application handoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffSettings {
    /// Destination vault name; handoff is blocked while this is blank.
    #[serde(default)]
    pub vault: String,
    /// Optional subfolder inside the vault.
    #[serde(default)]
    pub folder: Option<String>,
}

impl HandoffSettings {
    pub fn new(vault: impl Into<String>, folder: Option<String>) -> Self {
        Self {
            vault: vault.into(),
            folder,
        }
    }

    /// Trimmed vault name, or `None` when blank.
    pub fn vault_name(&self) -> Option<&str> {
        let trimmed = self.vault.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Trimmed subfolder path, or `None` when blank or unset.
    pub fn folder_path(&self) -> Option<&str> {
        self.folder
            .as_deref()
            .map(str::trim)
            .filter(|folder| !folder.is_empty())
    }
}
