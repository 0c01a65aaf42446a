//! Integration tests for the employee repository.
//!
//! Exercises the repository layer against a real database:
//! - Create with defaults
//! - Unique constraint violations on employee code and email
//! - Filtered listing
//! - Status and profile updates
//! - Deleting an employee together with their tasks

use chrono::NaiveDate;
use hrdesk_core::checklist;
use hrdesk_core::lifecycle::{EmployeeStatus, TaskType};
use hrdesk_core::search::like_pattern;
use hrdesk_db::models::employee::{CreateEmployee, EmployeeFilter, UpdateEmployeeProfile};
use hrdesk_db::repositories::{EmployeeRepo, TaskRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_employee(code: &str, name: &str) -> CreateEmployee {
    CreateEmployee {
        name: name.to_string(),
        employee_id: code.to_string(),
        email: format!("{}@company.com", code.to_lowercase()),
        department: "Engineering".to_string(),
        manager: "Grace Hopper".to_string(),
        position: None,
        phone: None,
        start_date: NaiveDate::from_ymd_opt(2025, 3, 10),
        birthday: None,
        status: None,
    }
}

fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_employee(pool: PgPool) {
    let employee = EmployeeRepo::create(
        &pool,
        &new_employee("E001", "Ada Lovelace"),
        EmployeeStatus::default(),
    )
    .await
    .unwrap();

    assert_eq!(employee.name, "Ada Lovelace");
    assert_eq!(employee.employee_id, "E001");
    assert_eq!(employee.status, "onboarding");
    assert!(employee.exit_date.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_employee_code_rejected(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Active)
        .await
        .unwrap();

    let mut dup = new_employee("E001", "Other");
    dup.email = "other@company.com".to_string();
    let err = EmployeeRepo::create(&pool, &dup, EmployeeStatus::Active)
        .await
        .unwrap_err();

    assert_eq!(
        unique_violation(&err).as_deref(),
        Some("uq_employees_employee_id")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Active)
        .await
        .unwrap();

    let mut dup = new_employee("E002", "Other");
    dup.email = "e001@company.com".to_string();
    let err = EmployeeRepo::create(&pool, &dup, EmployeeStatus::Active)
        .await
        .unwrap_err();

    assert_eq!(unique_violation(&err).as_deref(), Some("uq_employees_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_conflicting_excludes_self(pool: PgPool) {
    let ada = EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Active)
        .await
        .unwrap();

    let hit = EmployeeRepo::find_conflicting(&pool, Some("E001"), None, None)
        .await
        .unwrap();
    assert_eq!(hit.map(|e| e.id), Some(ada.id));

    let none = EmployeeRepo::find_conflicting(&pool, Some("E001"), Some(&ada.email), Some(ada.id))
        .await
        .unwrap();
    assert!(none.is_none());
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_search(pool: PgPool) {
    EmployeeRepo::create(&pool, &new_employee("E001", "Ada Lovelace"), EmployeeStatus::Active)
        .await
        .unwrap();
    EmployeeRepo::create(&pool, &new_employee("E002", "Alan Turing"), EmployeeStatus::Onboarding)
        .await
        .unwrap();
    let mut sales = new_employee("E003", "Adele Goldberg");
    sales.department = "Sales".to_string();
    EmployeeRepo::create(&pool, &sales, EmployeeStatus::Active)
        .await
        .unwrap();

    let active = EmployeeRepo::list(
        &pool,
        &EmployeeFilter {
            status: Some(EmployeeStatus::Active),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(active.len(), 2);

    let ad_in_engineering = EmployeeRepo::list(
        &pool,
        &EmployeeFilter {
            department: Some("Engineering".to_string()),
            search_pattern: like_pattern("ad"),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(ad_in_engineering.len(), 1);
    assert_eq!(ad_in_engineering[0].name, "Ada Lovelace");

    let literal_percent = EmployeeRepo::list(
        &pool,
        &EmployeeFilter {
            search_pattern: like_pattern("%"),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(literal_percent.is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_keeps_exit_date_when_omitted(pool: PgPool) {
    let ada = EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Active)
        .await
        .unwrap();
    let exit = NaiveDate::from_ymd_opt(2025, 6, 30);

    let exiting = EmployeeRepo::update_status(&pool, ada.id, EmployeeStatus::Exiting, exit)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exiting.status, "exiting");
    assert_eq!(exiting.exit_date, exit);

    let exited = EmployeeRepo::update_status(&pool, ada.id, EmployeeStatus::Exited, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(exited.status, "exited");
    assert_eq!(exited.exit_date, exit);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let status = EmployeeRepo::update_status(&pool, 999_999, EmployeeStatus::Active, None)
        .await
        .unwrap();
    assert!(status.is_none());

    let profile = EmployeeRepo::update_profile(&pool, 999_999, &UpdateEmployeeProfile::default())
        .await
        .unwrap();
    assert!(profile.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_leaves_status_alone(pool: PgPool) {
    let ada = EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Exiting)
        .await
        .unwrap();

    let updated = EmployeeRepo::update_profile(
        &pool,
        ada.id,
        &UpdateEmployeeProfile {
            position: Some("Staff Engineer".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.position.as_deref(), Some("Staff Engineer"));
    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.status, "exiting");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_employee_and_tasks(pool: PgPool) {
    let ada = EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Onboarding)
        .await
        .unwrap();
    let alan = EmployeeRepo::create(&pool, &new_employee("E002", "Alan"), EmployeeStatus::Onboarding)
        .await
        .unwrap();
    for id in [ada.id, alan.id] {
        let tasks = checklist::expand(id, TaskType::Onboarding, ada.start_date, None).unwrap();
        TaskRepo::create_batch(&pool, &tasks).await.unwrap();
    }

    let removed = EmployeeRepo::delete_with_tasks(&pool, ada.id).await.unwrap();
    assert_eq!(removed, Some(25));

    assert!(EmployeeRepo::find_by_id(&pool, ada.id).await.unwrap().is_none());
    assert_eq!(TaskRepo::count_by_employee(&pool, ada.id).await.unwrap(), 0);
    assert_eq!(TaskRepo::count_by_employee(&pool, alan.id).await.unwrap(), 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_returns_none(pool: PgPool) {
    let result = EmployeeRepo::delete_with_tasks(&pool, 999_999).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_plain_delete_with_tasks_is_restricted(pool: PgPool) {
    let ada = EmployeeRepo::create(&pool, &new_employee("E001", "Ada"), EmployeeStatus::Onboarding)
        .await
        .unwrap();
    let tasks = checklist::expand(ada.id, TaskType::Onboarding, None, None).unwrap();
    TaskRepo::create_batch(&pool, &tasks).await.unwrap();

    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(ada.id)
        .execute(&pool)
        .await;
    assert!(result.is_err(), "FK should block orphaning tasks");
}
