use jobtrack_core::db::migrations::latest_version;
use jobtrack_core::db::open_db_in_memory;
use jobtrack_core::{
    JobDraft, JobRepository, JobStatus, JobValidationError, PrincipalId, RepoError,
    SqliteJobRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn draft(company: &str, title: &str, date: &str) -> JobDraft {
    JobDraft {
        company_name: company.to_string(),
        job_title: title.to_string(),
        date_applied: date.to_string(),
        ..JobDraft::default()
    }
}

fn owner_row_count(conn: &Connection, owner: PrincipalId) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM jobs WHERE user_id = ?1;",
        [owner.to_string()],
        |row| row.get(0),
    )
    .unwrap()
}

#[test]
fn create_assigns_id_and_forces_applied_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let mut input = draft("Acme", "Engineer", "2024-01-10");
    input.status = Some(JobStatus::Offer);

    let created = repo.create(owner, &input).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.owner_id, owner);
    assert_eq!(created.status, JobStatus::Applied);

    let listed = repo.list_for_owner(owner).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[test]
fn list_orders_by_date_desc_with_insertion_order_ties() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let older = repo.create(owner, &draft("Acme", "Engineer", "2024-01-10")).unwrap();
    let newer = repo.create(owner, &draft("Globex", "Analyst", "2024-03-01")).unwrap();
    let tie_first = repo.create(owner, &draft("Initech", "Developer", "2024-02-15")).unwrap();
    let tie_second = repo.create(owner, &draft("Hooli", "Developer", "2024-02-15")).unwrap();

    let listed = repo.list_for_owner(owner).unwrap();
    let ids: Vec<_> = listed.iter().map(|job| job.id).collect();
    assert_eq!(ids, vec![newer.id, tie_first.id, tie_second.id, older.id]);
}

#[test]
fn list_is_empty_not_an_error_for_owner_without_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();

    let listed = repo.list_for_owner(Uuid::new_v4()).unwrap();
    assert!(listed.is_empty());
}

#[test]
fn list_never_includes_other_owners_records() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    repo.create(owner_a, &draft("Acme", "Engineer", "2024-01-10")).unwrap();
    repo.create(owner_b, &draft("Globex", "Analyst", "2024-03-01")).unwrap();

    let listed_a = repo.list_for_owner(owner_a).unwrap();
    assert_eq!(listed_a.len(), 1);
    assert!(listed_a.iter().all(|job| job.owner_id == owner_a));

    let listed_b = repo.list_for_owner(owner_b).unwrap();
    assert_eq!(listed_b.len(), 1);
    assert!(listed_b.iter().all(|job| job.owner_id == owner_b));
}

#[test]
fn create_with_missing_required_field_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let err = repo
        .create(owner, &draft("", "Engineer", "2024-01-10"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(JobValidationError::MissingField("company_name"))
    ));
    assert_eq!(owner_row_count(&conn, owner), 0);
}

#[test]
fn create_with_malformed_date_inserts_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let err = repo
        .create(owner, &draft("Acme", "Engineer", "Jan 10 2024"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(JobValidationError::InvalidDate(_))
    ));
    assert_eq!(owner_row_count(&conn, owner), 0);
}

#[test]
fn create_stores_empty_optionals_as_null() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let mut input = draft("Acme", "Engineer", "2024-01-10");
    input.url = Some("   ".to_string());
    input.notes = Some("referred by a friend".to_string());

    let created = repo.create(owner, &input).unwrap();
    assert_eq!(created.url, None);
    assert_eq!(created.notes.as_deref(), Some("referred by a friend"));

    let stored_url: Option<String> = conn
        .query_row("SELECT url FROM jobs WHERE id = ?1;", [created.id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored_url, None);
}

#[test]
fn update_status_changes_owned_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let created = repo.create(owner, &draft("Acme", "Engineer", "2024-01-10")).unwrap();
    repo.update_status(owner, created.id, JobStatus::Interview).unwrap();

    let listed = repo.list_for_owner(owner).unwrap();
    assert_eq!(listed[0].status, JobStatus::Interview);
}

#[test]
fn update_status_on_foreign_record_reports_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    let created = repo.create(owner_a, &draft("Acme", "Engineer", "2024-01-10")).unwrap();

    let err = repo
        .update_status(owner_b, created.id, JobStatus::Offer)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == created.id));

    let listed = repo.list_for_owner(owner_a).unwrap();
    assert_eq!(listed[0].status, JobStatus::Applied);
}

#[test]
fn update_status_on_unknown_id_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();

    let err = repo
        .update_status(Uuid::new_v4(), 4242, JobStatus::Rejected)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(4242)));
}

#[test]
fn delete_removes_owned_record_immediately() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let created = repo.create(owner, &draft("Acme", "Engineer", "2024-01-10")).unwrap();
    repo.delete(owner, created.id).unwrap();

    let listed = repo.list_for_owner(owner).unwrap();
    assert!(listed.iter().all(|job| job.id != created.id));
    assert_eq!(owner_row_count(&conn, owner), 0);
}

#[test]
fn delete_on_foreign_record_reports_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner_a = Uuid::new_v4();
    let owner_b = Uuid::new_v4();

    let created = repo.create(owner_a, &draft("Acme", "Engineer", "2024-01-10")).unwrap();

    let err = repo.delete(owner_b, created.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == created.id));
    assert_eq!(owner_row_count(&conn, owner_a), 1);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteJobRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_jobs_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteJobRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("jobs"))));
}

#[test]
fn repository_rejects_connection_missing_required_jobs_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            company_name TEXT NOT NULL,
            job_title TEXT NOT NULL,
            date_applied TEXT NOT NULL,
            status TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteJobRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "jobs",
            column: "url"
        })
    ));
}

#[test]
fn listed_records_serialize_for_ui_payloads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteJobRepository::try_new(&conn).unwrap();
    let owner = Uuid::new_v4();

    let created = repo.create(owner, &draft("Acme", "Engineer", "2024-01-10")).unwrap();

    let json = serde_json::to_string(&created).unwrap();
    assert!(json.contains("\"status\":\"Applied\""));
    assert!(json.contains("\"company_name\":\"Acme\""));
}
