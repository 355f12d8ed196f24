//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define owner-scoped data access contracts for application records.
//! - Isolate SQLite query details from service/view orchestration.
//!
//! # Invariants
//! - Every statement carries the owner filter; there is no unfiltered
//!   fetch followed by an ownership check.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   store transport errors.

pub mod job_repo;
