//! Job repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide owner-scoped CRUD APIs over the canonical `jobs` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `JobDraft::validate()` before SQL mutations.
//! - Every statement is scoped by `user_id`; absent and foreign records
//!   are indistinguishable to callers (`NotFound` for both).
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::auth::oracle::PrincipalId;
use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::job::{Job, JobDraft, JobId, JobStatus, JobValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const JOB_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    company_name,
    job_title,
    date_applied,
    status,
    url,
    notes
FROM jobs";

const REQUIRED_JOB_COLUMNS: &[&str] = &[
    "id",
    "user_id",
    "company_name",
    "job_title",
    "date_applied",
    "status",
    "url",
    "notes",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for job persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(JobValidationError),
    Db(DbError),
    /// Target record absent or owned by another principal. Deliberately
    /// unified so callers cannot probe for other owners' record ids.
    NotFound(JobId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "job not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted job data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column is missing: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JobValidationError> for RepoError {
    fn from(value: JobValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for owner-scoped job operations.
pub trait JobRepository {
    /// Lists the owner's records ordered by applied date descending,
    /// insertion order breaking ties. Empty result is not an error.
    fn list_for_owner(&self, owner: PrincipalId) -> RepoResult<Vec<Job>>;

    /// Validates and persists one record stamped with `owner`.
    ///
    /// New records always start as `JobStatus::Applied`; any status the
    /// draft carries is ignored. Returns the created record with its
    /// store-assigned id.
    fn create(&self, owner: PrincipalId, draft: &JobDraft) -> RepoResult<Job>;

    /// Updates the status of one record scoped by id and owner together.
    fn update_status(&self, owner: PrincipalId, id: JobId, status: JobStatus) -> RepoResult<()>;

    /// Hard-deletes one record scoped by id and owner together.
    /// Immediate and irreversible.
    fn delete(&self, owner: PrincipalId, id: JobId) -> RepoResult<()>;
}

impl<R: JobRepository + ?Sized> JobRepository for &R {
    fn list_for_owner(&self, owner: PrincipalId) -> RepoResult<Vec<Job>> {
        (**self).list_for_owner(owner)
    }

    fn create(&self, owner: PrincipalId, draft: &JobDraft) -> RepoResult<Job> {
        (**self).create(owner, draft)
    }

    fn update_status(&self, owner: PrincipalId, id: JobId, status: JobStatus) -> RepoResult<()> {
        (**self).update_status(owner, id, status)
    }

    fn delete(&self, owner: PrincipalId, id: JobId) -> RepoResult<()> {
        (**self).delete(owner, id)
    }
}

/// SQLite-backed job repository.
pub struct SqliteJobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections whose schema version or `jobs` layout does not
    /// match what this binary was built against.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl JobRepository for SqliteJobRepository<'_> {
    fn list_for_owner(&self, owner: PrincipalId) -> RepoResult<Vec<Job>> {
        let mut stmt = self.conn.prepare(&format!(
            "{JOB_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY date_applied DESC, id ASC;"
        ))?;

        let mut rows = stmt.query([owner.to_string()])?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(parse_job_row(row)?);
        }

        Ok(jobs)
    }

    fn create(&self, owner: PrincipalId, draft: &JobDraft) -> RepoResult<Job> {
        draft.validate()?;

        let company_name = draft.company_name.trim().to_string();
        let job_title = draft.job_title.trim().to_string();
        let date_applied = draft.date_applied.trim().to_string();
        let url = draft.normalized_url().map(str::to_string);
        let notes = draft.normalized_notes().map(str::to_string);

        self.conn.execute(
            "INSERT INTO jobs (
                user_id,
                company_name,
                job_title,
                date_applied,
                status,
                url,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                owner.to_string(),
                company_name,
                job_title,
                date_applied,
                JobStatus::Applied.as_str(),
                url.as_deref(),
                notes.as_deref(),
            ],
        )?;

        Ok(Job {
            id: self.conn.last_insert_rowid(),
            owner_id: owner,
            company_name,
            job_title,
            date_applied,
            status: JobStatus::Applied,
            url,
            notes,
        })
    }

    fn update_status(&self, owner: PrincipalId, id: JobId, status: JobStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE jobs
             SET status = ?1
             WHERE id = ?2
               AND user_id = ?3;",
            params![status.as_str(), id, owner.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, owner: PrincipalId, id: JobId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM jobs
             WHERE id = ?1
               AND user_id = ?2;",
            params![id, owner.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_job_row(row: &Row<'_>) -> RepoResult<Job> {
    let owner_text: String = row.get("user_id")?;
    let owner_id = Uuid::parse_str(&owner_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid principal value `{owner_text}` in jobs.user_id"))
    })?;

    let status_text: String = row.get("status")?;
    let status = JobStatus::parse(&status_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid status value `{status_text}` in jobs.status"))
    })?;

    Ok(Job {
        id: row.get("id")?,
        owner_id,
        company_name: row.get("company_name")?,
        job_title: row.get("job_title")?,
        date_applied: row.get("date_applied")?,
        status,
        url: row.get("url")?,
        notes: row.get("notes")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'jobs'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("jobs"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(jobs);")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }

    for &column in REQUIRED_JOB_COLUMNS {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "jobs",
                column,
            });
        }
    }

    Ok(())
}
