//! Domain model for clipped memos.
//!
//! # Responsibility
//! - Define the canonical memo record shared by store, service and export
//!   boundaries.
//!
//! # Invariants
//! - A memo is created, read or deleted; no update-in-place path exists.
//! - `created_at` is assigned once at creation and never mutated.

pub mod memo;
