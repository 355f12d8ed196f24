//! Job application domain model.
//!
//! # Responsibility
//! - Define the canonical application record and its creation input.
//! - Validate required fields and the applied-date shape before persistence.
//!
//! # Invariants
//! - `id` is store-assigned and never reused for another record.
//! - `owner_id` is fixed at creation and never exposed for cross-owner access.
//! - `status` only ever holds a member of the closed enumeration.

use crate::auth::oracle::PrincipalId;
use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier for a tracked application.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type JobId = i64;

/// Lifecycle state of one tracked application.
///
/// Serialized names match the `jobs.status` column values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Submitted, no response yet. Every new record starts here.
    Applied,
    /// Interview process is running.
    Interview,
    /// An offer was extended.
    Offer,
    /// Application was declined.
    Rejected,
}

impl JobStatus {
    /// Stable string value used in storage and UI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Interview => "Interview",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }

    /// All supported statuses in presentation order.
    pub fn all() -> &'static [JobStatus] {
        &[
            Self::Applied,
            Self::Interview,
            Self::Offer,
            Self::Rejected,
        ]
    }

    /// Parses one status from caller-supplied text.
    ///
    /// Values are matched exactly; anything outside the closed enumeration
    /// is rejected before a store call can be attempted.
    pub fn parse(value: &str) -> Result<Self, JobStatusParseError> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(JobStatusParseError::EmptyStatus);
        }

        match normalized {
            "Applied" => Ok(Self::Applied),
            "Interview" => Ok(Self::Interview),
            "Offer" => Ok(Self::Offer),
            "Rejected" => Ok(Self::Rejected),
            other => Err(JobStatusParseError::UnsupportedStatus(other.to_string())),
        }
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status parse errors for caller-supplied text values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatusParseError {
    EmptyStatus,
    UnsupportedStatus(String),
}

impl Display for JobStatusParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStatus => write!(f, "status value must not be empty"),
            Self::UnsupportedStatus(value) => {
                write!(f, "status is not a supported value: {value}")
            }
        }
    }
}

impl Error for JobStatusParseError {}

/// Canonical record for one tracked job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Store-assigned stable ID.
    pub id: JobId,
    /// Principal that created the record; fixed for the record lifetime.
    pub owner_id: PrincipalId,
    pub company_name: String,
    pub job_title: String,
    /// ISO `YYYY-MM-DD` calendar date.
    pub date_applied: String,
    pub status: JobStatus,
    /// Optional posting URL; `None` when the caller supplied nothing.
    pub url: Option<String>,
    /// Optional free-form notes; `None` when the caller supplied nothing.
    pub notes: Option<String>,
}

/// Creation input for one application record.
///
/// Carries only caller-editable fields; `id` and `owner_id` are assigned
/// by the store and the access gate respectively. A `status` value may
/// arrive in deserialized form payloads but is ignored: new entries always
/// start as `Applied`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub company_name: String,
    pub job_title: String,
    /// ISO `YYYY-MM-DD` calendar date.
    pub date_applied: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl JobDraft {
    /// Checks required-field presence and the applied-date shape.
    ///
    /// # Contract
    /// - The first failing field is reported; nothing is persisted.
    /// - Optional fields are never validated beyond presence normalization.
    pub fn validate(&self) -> Result<(), JobValidationError> {
        if self.company_name.trim().is_empty() {
            return Err(JobValidationError::MissingField("company_name"));
        }
        if self.job_title.trim().is_empty() {
            return Err(JobValidationError::MissingField("job_title"));
        }

        let date = self.date_applied.trim();
        if date.is_empty() {
            return Err(JobValidationError::MissingField("date_applied"));
        }
        if !is_calendar_date(date) {
            return Err(JobValidationError::InvalidDate(
                self.date_applied.trim().to_string(),
            ));
        }

        Ok(())
    }

    /// Posting URL normalized for storage: trimmed, empty treated as absent.
    pub fn normalized_url(&self) -> Option<&str> {
        normalize_optional(self.url.as_deref())
    }

    /// Notes normalized for storage: trimmed, empty treated as absent.
    pub fn normalized_notes(&self) -> Option<&str> {
        normalize_optional(self.notes.as_deref())
    }
}

/// Validation errors for application creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobValidationError {
    /// A required field was empty or absent; carries the field name.
    MissingField(&'static str),
    /// The applied date did not match the `YYYY-MM-DD` shape.
    InvalidDate(String),
}

impl Display for JobValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is empty: {field}"),
            Self::InvalidDate(value) => {
                write!(f, "date_applied must be YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for JobValidationError {}

fn normalize_optional(value: Option<&str>) -> Option<&str> {
    match value {
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        None => None,
    }
}

fn is_calendar_date(value: &str) -> bool {
    static DATE_SHAPE: OnceCell<Regex> = OnceCell::new();
    let pattern = DATE_SHAPE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date shape pattern is a valid regex")
    });
    pattern.is_match(value)
}
