//! Session-gated job application service.
//!
//! # Responsibility
//! - Pass every operation through the access gate before any store call.
//! - Map gate, validation, and repository failures into one taxonomy for
//!   the presentation layer.
//!
//! # Invariants
//! - The principal is resolved per operation, never cached between calls.
//! - Caller-supplied status text is parsed against the closed enumeration
//!   before the store is touched.
//! - Errors are terminal here: no retries, no partial application.

use crate::auth::guard::{AccessGuard, Unauthenticated};
use crate::auth::oracle::IdentityOracle;
use crate::model::job::{Job, JobDraft, JobId, JobStatus, JobStatusParseError};
use crate::repo::job_repo::{JobRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Presentation-facing error taxonomy.
///
/// `Unauthenticated` means no data operation was attempted; the UI
/// translates it into a redirect to sign-in. Not-found and forbidden are
/// unified inside `Repo(RepoError::NotFound)`.
#[derive(Debug)]
pub enum ServiceError {
    Unauthenticated,
    InvalidStatus(JobStatusParseError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => Display::fmt(&Unauthenticated, f),
            Self::InvalidStatus(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unauthenticated => None,
            Self::InvalidStatus(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<Unauthenticated> for ServiceError {
    fn from(_: Unauthenticated) -> Self {
        Self::Unauthenticated
    }
}

impl From<JobStatusParseError> for ServiceError {
    fn from(value: JobStatusParseError) -> Self {
        Self::InvalidStatus(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Guarded surface over the job repository.
///
/// Owns the access gate so no call site can reach the repository without
/// passing identity resolution first.
pub struct JobService<O: IdentityOracle, R: JobRepository> {
    guard: AccessGuard<O>,
    repo: R,
}

impl<O: IdentityOracle, R: JobRepository> JobService<O, R> {
    pub fn new(oracle: O, repo: R) -> Self {
        Self {
            guard: AccessGuard::new(oracle),
            repo,
        }
    }

    /// Lists the caller's records, newest applied date first.
    pub fn list(&self) -> ServiceResult<Vec<Job>> {
        self.guard.with_principal(|principal| {
            let jobs = self.repo.list_for_owner(principal)?;
            info!(
                "event=job_list module=service status=ok owner={principal} count={}",
                jobs.len()
            );
            Ok(jobs)
        })
    }

    /// Creates one record owned by the caller; status always starts as
    /// `Applied` regardless of draft content.
    pub fn create(&self, draft: &JobDraft) -> ServiceResult<Job> {
        self.guard.with_principal(|principal| {
            match self.repo.create(principal, draft) {
                Ok(job) => {
                    info!(
                        "event=job_create module=service status=ok owner={principal} job_id={}",
                        job.id
                    );
                    Ok(job)
                }
                Err(err) => {
                    warn!("event=job_create module=service status=error owner={principal} error={err}");
                    Err(err.into())
                }
            }
        })
    }

    /// Updates the status of one record the caller owns.
    pub fn update_status(&self, id: JobId, status: JobStatus) -> ServiceResult<()> {
        self.guard.with_principal(|principal| {
            match self.repo.update_status(principal, id, status) {
                Ok(()) => {
                    info!(
                        "event=job_status module=service status=ok owner={principal} job_id={id} new_status={status}"
                    );
                    Ok(())
                }
                Err(err) => {
                    warn!(
                        "event=job_status module=service status=error owner={principal} job_id={id} error={err}"
                    );
                    Err(err.into())
                }
            }
        })
    }

    /// Updates record status from caller-supplied text (UI select values).
    ///
    /// Anything outside the closed enumeration is rejected before any
    /// store access.
    pub fn update_status_value(&self, id: JobId, value: &str) -> ServiceResult<()> {
        self.guard.with_principal(|principal| {
            let status = JobStatus::parse(value)?;
            self.repo.update_status(principal, id, status)?;
            info!(
                "event=job_status module=service status=ok owner={principal} job_id={id} new_status={status}"
            );
            Ok(())
        })
    }

    /// Deletes one record the caller owns. Immediate and irreversible.
    pub fn delete(&self, id: JobId) -> ServiceResult<()> {
        self.guard.with_principal(|principal| {
            match self.repo.delete(principal, id) {
                Ok(()) => {
                    info!("event=job_delete module=service status=ok owner={principal} job_id={id}");
                    Ok(())
                }
                Err(err) => {
                    warn!(
                        "event=job_delete module=service status=error owner={principal} job_id={id} error={err}"
                    );
                    Err(err.into())
                }
            }
        })
    }

    /// Ends the active session.
    pub fn sign_out(&self) {
        self.guard.sign_out();
    }
}
