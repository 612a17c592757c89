//! HTTP-level integration tests for the `/api/data` record endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json, record_body};
use sqlx::PgPool;

async fn create_record(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(common::build_test_app(pool.clone()), "/api/data", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_201_with_message(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/data", record_body("Gemma-2B", "T4", 60.0, 2.0)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Data added successfully!");
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["model"], "Gemma-2B");
    assert_eq!(json["data"]["emissions_rate"], 0.5);
    assert_eq!(json["data"]["date_added"].as_str().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_missing_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = record_body("Gemma-2B", "T4", 25.0, 25.0);
    body.as_object_mut().unwrap().remove("github_user");

    let response = post_json(app, "/api/data", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("github_user"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_invalid_values_return_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = record_body("  ", "T4", 25.0, 0.0);
    body["energy"] = serde_json::json!(-0.1);

    let response = post_json(app, "/api/data", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("model"));
    assert!(error.contains("runtime"));
    assert!(error.contains("energy"));
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_store_returns_empty_array(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_by_id_and_missing(pool: PgPool) {
    let created = create_record(&pool, record_body("Mistral-7B", "L4", 40.0, 20.0)).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(common::build_test_app(pool.clone()), &format!("/api/data/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["model"], "Mistral-7B");

    let response = get(common::build_test_app(pool), "/api/data/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Data entry with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_sorts(pool: PgPool) {
    create_record(&pool, record_body("Gemma-2B", "T4", 25.0, 25.0)).await;
    create_record(&pool, record_body("LLaMA-2-7B", "A100", 56.0, 24.0)).await;
    create_record(&pool, record_body("Gemma-7B", "A100", 70.0, 32.0)).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/data?model=GEMMA&sort=emissions&direction=descending",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let models: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["model"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["Gemma-7B", "Gemma-2B"]);

    let response = get(
        common::build_test_app(pool),
        "/api/data?sort=emissions_rate",
    )
    .await;
    let json = body_json(response).await;
    let models: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["model"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["Gemma-2B", "Gemma-7B", "LLaMA-2-7B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_rejects_unknown_sort_key(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/data?sort=colour").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial(pool: PgPool) {
    let created = create_record(&pool, record_body("Gemma-2B", "T4", 25.0, 25.0)).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/data/{id}"),
        serde_json::json!({ "runtime": 50.0, "code_environment": "Colab" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Data entry updated successfully");
    assert_eq!(json["data"]["runtime"], 50.0);
    assert_eq!(json["data"]["code_environment"], "Colab");
    assert_eq!(json["data"]["model"], "Gemma-2B");
    assert_eq!(json["data"]["date_added"], created["date_added"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_bad_date(pool: PgPool) {
    let created = create_record(&pool, record_body("Gemma-2B", "T4", 25.0, 25.0)).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/data/{id}"),
        serde_json::json!({ "date_added": "03/09/2025" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("not a valid date format"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_returns_404(pool: PgPool) {
    let response = put_json(
        common::build_test_app(pool),
        "/api/data/424242",
        serde_json::json!({ "remarks": "nothing here" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_deleted_record(pool: PgPool) {
    let created = create_record(&pool, record_body("Gemma-7B", "A100", 70.0, 32.0)).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(common::build_test_app(pool.clone()), &format!("/api/data/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Data entry deleted successfully");
    assert_eq!(json["data"]["id"], id);

    let response = delete(common::build_test_app(pool), &format!("/api/data/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["message"].is_string());
}

// ---------------------------------------------------------------------------
// Malformed ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_id_returns_json_bad_request(pool: PgPool) {
    let responses = [
        get(common::build_test_app(pool.clone()), "/api/data/abc").await,
        put_json(
            common::build_test_app(pool.clone()),
            "/api/data/abc",
            serde_json::json!({ "remarks": "x" }),
        )
        .await,
        delete(common::build_test_app(pool), "/api/data/abc").await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json["error"].as_str().unwrap().contains("abc"));
    }
}
