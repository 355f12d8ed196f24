//! Guarded use-case services.
//!
//! # Responsibility
//! - Orchestrate the access gate and repository into the surface the
//!   presentation layer consumes.
//! - Keep UI layers decoupled from storage and session details.

pub mod job_service;
