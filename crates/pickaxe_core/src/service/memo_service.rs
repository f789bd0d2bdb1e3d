//! Memo use-case service.
//!
//! # Responsibility
//! - Provide save/list/detail/delete flows over the memo repository.
//! - Consume the quick-capture side channel when the form opens.
//! - Gate the external-handoff export on the configured vault name.
//!
//! # Invariants
//! - `save_memo` stamps `created_at` exactly once, at save time.
//! - A pending capture payload is consumed by exactly one form open.
//! - Export never mutates store state.

use crate::capture::CaptureSlot;
use crate::model::memo::{Memo, MemoId, MemoValidationError};
use crate::settings::HandoffSettings;
use crate::store::memo_store::{MemoRepository, StoreError};
use chrono::{SecondsFormat, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form input for a memo that has not been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMemo {
    pub title: String,
    pub content: String,
    pub url: String,
}

/// Failure reported by an export collaborator.
#[derive(Debug)]
pub struct ExportError {
    message: String,
}

impl ExportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "export failed: {}", self.message)
    }
}

impl Error for ExportError {}

/// Export collaborator boundary.
///
/// Implementations are pure functions of the memo and settings (Markdown
/// file writers, deep-link builders); they must not touch store state.
pub trait MemoExporter {
    fn export(&self, memo: &Memo, settings: &HandoffSettings) -> Result<(), ExportError>;
}

/// Service error for memo use-cases.
#[derive(Debug)]
pub enum MemoServiceError {
    /// Form input failed field-level validation.
    Validation(MemoValidationError),
    /// Target memo does not exist.
    MemoNotFound(MemoId),
    /// External handoff requires a configured vault name.
    HandoffUnavailable,
    /// An export collaborator reported a failure.
    Export(ExportError),
    /// Persistence-layer failure.
    Store(StoreError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::MemoNotFound(id) => write!(f, "memo not found: {id}"),
            Self::HandoffUnavailable => {
                write!(f, "external handoff is blocked: no vault name configured")
            }
            Self::Export(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent memo state: {details}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for MemoServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// Memo service facade over repository implementations.
pub struct MemoService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new memo, stamping the creation timestamp.
    ///
    /// Returns the stored memo read back under its assigned id.
    pub fn save_memo(&self, draft: NewMemo) -> Result<Memo, MemoServiceError> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let memo = Memo::new(draft.title, draft.content, draft.url, created_at);

        let id = self.repo.create(&memo)?;
        self.repo
            .get_by_id(id)?
            .ok_or(MemoServiceError::InconsistentState(
                "created memo not found in read-back",
            ))
    }

    /// Builds the form prefill, consuming a pending capture exactly once.
    ///
    /// A captured selection is embedded as a quoted excerpt so the user can
    /// write below it; with no capture pending the form starts blank.
    pub fn open_capture_form(&self, slot: &CaptureSlot) -> NewMemo {
        match slot.take() {
            Some(draft) => NewMemo {
                title: String::new(),
                content: quoted_excerpt(&draft.content),
                url: draft.url,
            },
            None => NewMemo::default(),
        }
    }

    /// Lists every memo, newest first.
    pub fn list_memos(&self) -> Result<Vec<Memo>, MemoServiceError> {
        Ok(self.repo.list_all()?)
    }

    /// Gets one memo for the detail view.
    pub fn get_memo(&self, id: MemoId) -> Result<Option<Memo>, MemoServiceError> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Deletes one memo; deleting an absent id is a successful no-op.
    pub fn delete_memo(&self, id: MemoId) -> Result<(), MemoServiceError> {
        Ok(self.repo.delete_by_id(id)?)
    }

    /// Hands one memo to an export collaborator.
    ///
    /// Blocked while no vault name is configured; the memo itself must
    /// exist, since the detail view exports what it displays.
    pub fn export_memo(
        &self,
        id: MemoId,
        settings: &HandoffSettings,
        exporter: &dyn MemoExporter,
    ) -> Result<(), MemoServiceError> {
        if settings.vault_name().is_none() {
            return Err(MemoServiceError::HandoffUnavailable);
        }

        let memo = self
            .repo
            .get_by_id(id)?
            .ok_or(MemoServiceError::MemoNotFound(id))?;
        exporter
            .export(&memo, settings)
            .map_err(MemoServiceError::Export)
    }
}

/// Prefixes each selection line with a Markdown quote marker.
fn quoted_excerpt(selection: &str) -> String {
    if selection.trim().is_empty() {
        return String::new();
    }

    let mut quoted = String::new();
    for line in selection.lines() {
        quoted.push_str("> ");
        quoted.push_str(line);
        quoted.push('\n');
    }
    quoted.push('\n');
    quoted
}
