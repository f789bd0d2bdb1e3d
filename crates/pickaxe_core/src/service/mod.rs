//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into the flows a view controller consumes.
//! - Keep UI layers decoupled from storage and export details.

pub mod memo_service;
