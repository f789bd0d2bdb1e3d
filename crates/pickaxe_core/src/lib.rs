//! Core domain logic for Pickaxe, a local-first web-clipping memo tool.
//! This crate is the single source of truth for memo persistence invariants.

pub mod capture;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod settings;
pub mod store;

pub use capture::{CaptureDraft, CaptureSlot};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoId, MemoValidationError};
pub use service::memo_service::{
    ExportError, MemoExporter, MemoService, MemoServiceError, NewMemo,
};
pub use settings::HandoffSettings;
pub use store::memo_store::{MemoRepository, MemoStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
