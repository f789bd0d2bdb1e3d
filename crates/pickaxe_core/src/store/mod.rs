//! Record store layer: durable memo persistence behind a typed lifecycle.
//!
//! # Responsibility
//! - Define the use-case oriented persistence contract (`MemoRepository`).
//! - Own the SQLite connection lifecycle so callers never see it.
//!
//! # Invariants
//! - Writes must pass `Memo::validate()` before touching SQL.
//! - Absent rows are reported as values (`None`), not as errors.

pub mod memo_store;
