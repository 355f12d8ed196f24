//! Dashboard list state controller.
//!
//! # Responsibility
//! - Hold the caller-visible job list and its submit phase.
//! - Apply the mutate-then-full-refresh protocol for every mutation.
//!
//! # Invariants
//! - No optimistic mutation: the held list changes only through `refresh`.
//! - Submit phase always returns to `Idle`, on success and on failure.
//! - Mutations are serialized by the exclusive borrow; a second intent
//!   cannot be issued while one is in flight.

use crate::auth::oracle::IdentityOracle;
use crate::model::job::{Job, JobDraft, JobId};
use crate::repo::job_repo::JobRepository;
use crate::service::job_service::{JobService, ServiceResult};

/// Lifecycle of one pending submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
}

/// Holds the job list currently shown and keeps it consistent with the
/// store by replacing it wholesale after each successful mutation.
///
/// Full refresh trades update efficiency for guaranteed consistency with
/// the store's own filtering and ordering; there is no patch/merge logic.
pub struct DashboardState<O: IdentityOracle, R: JobRepository> {
    service: JobService<O, R>,
    jobs: Vec<Job>,
    phase: SubmitPhase,
}

impl<O: IdentityOracle, R: JobRepository> DashboardState<O, R> {
    /// Creates an empty dashboard; call `refresh` to load the first list.
    pub fn new(service: JobService<O, R>) -> Self {
        Self {
            service,
            jobs: Vec::new(),
            phase: SubmitPhase::Idle,
        }
    }

    /// Records currently shown, newest applied date first.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Number of tracked applications in the held list.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// The single synchronization primitive: replaces the held list with a
    /// fresh owner-scoped read. On failure the held list stays unchanged.
    pub fn refresh(&mut self) -> ServiceResult<()> {
        self.jobs = self.service.list()?;
        Ok(())
    }

    /// Creates one record, then refreshes on success.
    pub fn submit_create(&mut self, draft: &JobDraft) -> ServiceResult<Job> {
        self.submit(|service| service.create(draft))
    }

    /// Changes one record's status from caller-supplied text, then
    /// refreshes on success.
    pub fn submit_status_change(&mut self, id: JobId, status_value: &str) -> ServiceResult<()> {
        self.submit(|service| service.update_status_value(id, status_value))
    }

    /// Deletes one record, then refreshes on success.
    pub fn submit_delete(&mut self, id: JobId) -> ServiceResult<()> {
        self.submit(|service| service.delete(id))
    }

    /// Ends the session and drops the held list; the next operation will
    /// surface `Unauthenticated` until a new session is active.
    pub fn sign_out(&mut self) {
        self.service.sign_out();
        self.jobs.clear();
    }

    fn submit<T>(
        &mut self,
        op: impl FnOnce(&JobService<O, R>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        self.phase = SubmitPhase::Submitting;
        let outcome = op(&self.service);

        let outcome = match outcome {
            // A confirmed mutation is only reported as success once the
            // held list reflects it; a failed refresh surfaces instead.
            Ok(value) => self.refresh().map(|()| value),
            Err(err) => Err(err),
        };

        self.phase = SubmitPhase::Idle;
        outcome
    }
}
