//! HTTP-level integration tests for the `/tasks` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_employee, delete_auth, employee_body, get_auth, post_json_auth,
    put_json_auth, token_with_role,
};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Create an onboarding employee (25 seeded tasks) and return its id.
async fn seeded_employee(pool: &PgPool, token: &str, code: &str) -> i64 {
    let employee = create_employee(common::build_test_app(pool.clone()), token, employee_body(code)).await;
    employee["id"].as_i64().unwrap()
}

async fn list_tasks(pool: &PgPool, token: &str, query: &str) -> Vec<Value> {
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks{query}"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_are_conjunctive(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let first = seeded_employee(&pool, &hr, "E001").await;
    let second = seeded_employee(&pool, &hr, "E002").await;
    put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/employees/{first}"),
        json!({ "status": "exiting", "exit_date": "2025-06-30" }),
        &hr,
    )
    .await;

    let tasks = list_tasks(&pool, &hr, &format!("?employee_id={first}&task_type=onboarding")).await;
    assert_eq!(tasks.len(), 25);
    assert!(tasks
        .iter()
        .all(|t| t["employee_id"] == first && t["task_type"] == "onboarding"));

    // Complete one so the status filter has something to exclude.
    let done = tasks[0]["id"].as_i64().unwrap();
    put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{done}"),
        json!({ "status": "completed" }),
        &hr,
    )
    .await;

    let pending = list_tasks(
        &pool,
        &hr,
        &format!("?employee_id={first}&task_type=onboarding&status=pending"),
    )
    .await;
    assert_eq!(pending.len(), 24);

    let exit = list_tasks(&pool, &hr, &format!("?employee_id={first}&task_type=exit")).await;
    assert_eq!(exit.len(), 18);

    let other = list_tasks(&pool, &hr, &format!("?employee_id={second}")).await;
    assert_eq!(other.len(), 25);

    let all = list_tasks(&pool, &hr, "").await;
    assert_eq!(all.len(), 68);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_title_case_insensitively(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;

    let tasks = list_tasks(&pool, &hr, &format!("?employee_id={id}&search=PAYROLL")).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Payroll enrollment");

    // Blank filters are ignored.
    let tasks = list_tasks(&pool, &hr, "?status=&task_type=&search=").await;
    assert_eq!(tasks.len(), 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_filter_value_is_rejected(pool: PgPool) {
    let token = token_with_role(&pool, "employee").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/tasks?task_type=offboarding",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("onboarding, exit"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_employee_filter_is_rejected(pool: PgPool) {
    let token = token_with_role(&pool, "employee").await;
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/tasks?employee_id=abc",
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].is_string());
}

// ---------------------------------------------------------------------------
// Single updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completed_date_follows_status(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let staff = token_with_role(&pool, "employee").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let task_id = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await[0]["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/tasks/{task_id}");

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "status": "completed" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let task = body_json(response).await["data"].clone();
    assert_eq!(task["status"], "completed");
    assert!(task["completed_date"].is_string());

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        json!({ "status": "in_progress", "due_date": "2025-04-01" }),
        &staff,
    )
    .await;
    let task = body_json(response).await["data"].clone();
    assert_eq!(task["status"], "in_progress");
    assert!(task["completed_date"].is_null());
    assert_eq!(task["due_date"], "2025-04-01");

    let response = get_auth(common::build_test_app(pool), &uri, &staff).await;
    let task = body_json(response).await["data"].clone();
    assert!(task["completed_date"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_errors(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let task_id = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await[0]["id"]
        .as_i64()
        .unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/tasks/{task_id}"),
        json!({ "status": "done" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/tasks/999999",
        json!({ "status": "completed" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Bulk updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_skips_unknown_ids(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let tasks = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await;
    let a = tasks[0]["id"].as_i64().unwrap();
    let b = tasks[1]["id"].as_i64().unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks/bulk",
        json!({ "task_ids": [a, b, 987654], "status": "completed" }),
        &hr,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["updated_count"], 2);

    let completed = list_tasks(&pool, &hr, &format!("?employee_id={id}&status=completed")).await;
    assert_eq!(completed.len(), 2);
    assert!(completed.iter().all(|t| t["completed_date"].is_string()));

    // Moving back out of completed clears the date for every task.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks/bulk",
        json!({ "task_ids": [a, b], "status": "pending" }),
        &hr,
    )
    .await;
    assert_eq!(body_json(response).await["updated_count"], 2);
    let pending = list_tasks(&pool, &hr, &format!("?employee_id={id}&status=pending")).await;
    assert_eq!(pending.len(), 25);
    assert!(pending.iter().all(|t| t["completed_date"].is_null()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_accepts_string_ids(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let tasks = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await;
    let a = tasks[0]["id"].as_i64().unwrap().to_string();
    let b = tasks[1]["id"].as_i64().unwrap().to_string();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks/bulk",
        json!({ "task_ids": [a, b, "not-a-task"], "status": "in_progress" }),
        &hr,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["updated_count"], 2);
    assert!(body.get("data").is_none());

    let started = list_tasks(&pool, &hr, &format!("?employee_id={id}&status=in_progress")).await;
    assert_eq!(started.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_rejects_bad_input(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let a = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await[0]["id"]
        .as_i64()
        .unwrap();

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks/bulk",
        json!({ "task_ids": [], "status": "completed" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks/bulk",
        json!({ "task_ids": [a], "status": "archived" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was touched by the rejected requests.
    let pending = list_tasks(&pool, &hr, &format!("?employee_id={id}&status=pending")).await;
    assert_eq!(pending.len(), 25);
}

// ---------------------------------------------------------------------------
// Create / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_ad_hoc_task(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let manager = token_with_role(&pool, "manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks",
        json!({
            "employee_id": id,
            "title": "Order business cards",
            "task_type": "onboarding",
            "due_date": "2025-03-20",
        }),
        &manager,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await["data"].clone();
    assert_eq!(task["status"], "pending");
    assert_eq!(task["description"], "");
    assert_eq!(task["assigned_by"], "manager@company.com");
    assert_eq!(list_tasks(&pool, &hr, &format!("?employee_id={id}")).await.len(), 26);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_task_validation(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let id = seeded_employee(&pool, &hr, "E001").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks",
        json!({ "employee_id": 999999, "title": "Orphan", "task_type": "exit" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/tasks",
        json!({ "employee_id": id, "title": "  ", "task_type": "exit" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/tasks",
        json!({ "employee_id": id, "title": "Something", "task_type": "transfer" }),
        &hr,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_task(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let staff = token_with_role(&pool, "employee").await;
    let id = seeded_employee(&pool, &hr, "E001").await;
    let task_id = list_tasks(&pool, &hr, &format!("?employee_id={id}")).await[0]["id"]
        .as_i64()
        .unwrap();
    let uri = format!("/api/v1/tasks/{task_id}");

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &hr).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &hr).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(common::build_test_app(pool), &uri, &hr).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_employee_role_cannot_create_tasks(pool: PgPool) {
    let hr = token_with_role(&pool, "hr_manager").await;
    let staff = token_with_role(&pool, "employee").await;
    let id = seeded_employee(&pool, &hr, "E001").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/tasks",
        json!({ "employee_id": id, "title": "Sneaky", "task_type": "onboarding" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
