//! Domain model for tracked job applications.
//!
//! # Responsibility
//! - Define the canonical record shape shared by repository and view layers.
//! - Own required-field and status-enumeration validation rules.
//!
//! # Invariants
//! - Every record is identified by a stable store-assigned `JobId`.
//! - `JobStatus` is a closed enumeration; no other value reaches storage.

pub mod job;
