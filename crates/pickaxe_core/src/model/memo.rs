//! Memo domain model.
//!
//! # Responsibility
//! - Define the single persisted record type and its validation rules.
//! - Provide display projections (placeholder title, list snippet).
//!
//! # Invariants
//! - `id` is assigned by the store and immutable once set.
//! - `created_at` is an RFC 3339 timestamp, set exactly once at creation,
//!   and is the sole sort key for listing.
//! - `title` and `url` are stored as empty strings when absent, never NULL.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Store-assigned sequential identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemoId = i64;

/// Placeholder shown in place of an empty title.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// Validation failure for memo inputs and persisted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoValidationError {
    /// `content` is empty or whitespace-only.
    EmptyContent,
    /// A memo submitted for creation already carries a store id.
    IdAlreadyAssigned(MemoId),
    /// `created_at` does not parse as an RFC 3339 timestamp.
    InvalidCreatedAt(String),
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "memo content must not be empty"),
            Self::IdAlreadyAssigned(id) => {
                write!(f, "memo already has store id {id}; ids are store-assigned")
            }
            Self::InvalidCreatedAt(value) => {
                write!(f, "memo created_at `{value}` is not a valid RFC 3339 timestamp")
            }
        }
    }
}

impl Error for MemoValidationError {}

/// The sole persisted record: one clipped or hand-written note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Store-assigned id; `None` until the memo is first saved.
    #[serde(default)]
    pub id: Option<MemoId>,
    /// Optional user-entered title; empty string when absent.
    #[serde(default)]
    pub title: String,
    /// Required body text; may embed a quoted source excerpt.
    pub content: String,
    /// Optional source page address; empty string when absent.
    #[serde(default)]
    pub url: String,
    /// Serialized as `createdAt` to match the external record naming.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Memo {
    /// Creates an unsaved memo with all fields supplied by the caller.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            url: url.into(),
            created_at: created_at.into(),
        }
    }

    /// Checks field-level invariants shared by write and read-back paths.
    ///
    /// Does not check `id`; a loaded memo legitimately carries one while a
    /// memo submitted for creation must not (the store enforces that).
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.content.trim().is_empty() {
            return Err(MemoValidationError::EmptyContent);
        }
        if chrono::DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(MemoValidationError::InvalidCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }

    /// Creation instant parsed from `created_at`, normalized to UTC.
    ///
    /// `None` when the string is malformed; callers that ran `validate()`
    /// first always get a value. RFC 3339 permits any UTC offset, so
    /// ordering must compare instants, not the raw strings.
    pub fn created_at_instant(&self) -> Option<DateTime<Utc>> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }

    /// Title to display in list rows; falls back to a placeholder.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            UNTITLED_PLACEHOLDER
        } else {
            trimmed
        }
    }

    /// Whitespace-normalized leading excerpt of the body for list rows.
    pub fn snippet(&self, max_chars: usize) -> String {
        let normalized = WHITESPACE_RE.replace_all(self.content.trim(), " ");
        let mut excerpt = normalized.chars().take(max_chars).collect::<String>();
        if normalized.chars().count() > max_chars {
            excerpt.push_str("...");
        }
        excerpt
    }
}
