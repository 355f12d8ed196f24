//! Core domain logic for the job application tracker.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use auth::guard::{AccessGuard, Unauthenticated};
pub use auth::oracle::{IdentityOracle, MemorySessionOracle, PrincipalId};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::job::{
    Job, JobDraft, JobId, JobStatus, JobStatusParseError, JobValidationError,
};
pub use repo::job_repo::{JobRepository, RepoError, RepoResult, SqliteJobRepository};
pub use service::job_service::{JobService, ServiceError, ServiceResult};
pub use view::dashboard::{DashboardState, SubmitPhase};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
