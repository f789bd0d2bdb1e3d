//! Quick-capture side channel.
//!
//! # Responsibility
//! - Hand a selection-derived draft from a background capture listener to
//!   the form-opening flow.
//!
//! # Invariants
//! - At most one payload is pending; a new capture overwrites the old one.
//! - A payload is consumed exactly once: `take` returns it and clears the
//!   slot in the same step.

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Selection-derived draft produced by a capture event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureDraft {
    /// Selected page text.
    pub content: String,
    /// Address of the page the selection came from.
    pub url: String,
}

/// Single-slot holder for the pending capture payload.
#[derive(Debug, Default)]
pub struct CaptureSlot {
    pending: Mutex<Option<CaptureDraft>>,
}

impl CaptureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new payload, replacing any capture not yet consumed.
    pub fn publish(&self, draft: CaptureDraft) {
        let mut pending = self.lock_pending();
        let replaced = pending.replace(draft).is_some();
        debug!("event=capture_publish module=capture status=ok replaced={replaced}");
    }

    /// Returns and clears the pending payload, if any.
    pub fn take(&self) -> Option<CaptureDraft> {
        let mut pending = self.lock_pending();
        let draft = pending.take();
        debug!(
            "event=capture_take module=capture status=ok consumed={}",
            draft.is_some()
        );
        draft
    }

    /// Returns whether a payload is waiting to be consumed.
    pub fn has_pending(&self) -> bool {
        self.lock_pending().is_some()
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<CaptureDraft>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
