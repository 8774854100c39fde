//! HTTP-level integration tests for the study-group CRUD endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, group_json, post_json, put_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn create_then_read_back(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/groups", group_json("AA-01", 1.5, 10, Some("AB1234"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "AA-01");
    assert_eq!(created["coordinates"]["y"], 10);
    assert_eq!(created["groupAdmin"]["passportID"], "AB1234");
    assert!(created["creationDate"].is_string());

    let response = get(&app, &format!("/api/groups/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["semesterEnum"], "THIRD");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_supports_name_filter(pool: PgPool) {
    let app = build_test_app(pool);

    post_json(&app, "/api/groups", group_json("Math-01", 1.0, 1, None)).await;
    post_json(&app, "/api/groups", group_json("Math-02", 2.0, 2, None)).await;
    post_json(&app, "/api/groups", group_json("Physics-01", 3.0, 3, None)).await;

    let response = get(&app, "/api/groups").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

    let response = get(&app, "/api/groups?name=math").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_record_is_rejected_with_descriptors(pool: PgPool) {
    let app = build_test_app(pool);

    let mut record = group_json("", 1.0, 1, None);
    record["shouldBeExpelled"] = serde_json::json!(0);
    let response = post_json(&app, "/api/groups", record).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[1]["field"], "shouldBeExpelled");
    assert!(errors.iter().all(|e| e["recordIndex"] == -1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_create_conflicts_on_every_matching_attribute(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/groups", group_json("AA-01", 1.0, 1, Some("AB1234"))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Collides on name, coordinates, and passport at once.
    let response = post_json(&app, "/api/groups", group_json("aa-01", 1.0, 1, Some("AB1234"))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Unique constraints validation failed");
    let fields: Vec<_> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["name", "coordinates", "groupAdmin.passportID"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_allows_self_match_but_not_foreign_match(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/groups", group_json("AA-01", 1.0, 1, None)).await;
    let first_id = body_json(response).await["id"].as_i64().unwrap();
    post_json(&app, "/api/groups", group_json("BB-01", 2.0, 2, None)).await;

    // Keeping its own name/coordinates is not a conflict.
    let mut same = group_json("AA-01", 1.0, 1, None);
    same["studentsCount"] = serde_json::json!(99);
    let response = put_json(&app, &format!("/api/groups/{first_id}"), same).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["studentsCount"], 99);

    // Taking the other group's name is.
    let response = put_json(
        &app,
        &format!("/api/groups/{first_id}"),
        group_json("bb-01", 1.0, 1, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_ids_return_not_found(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/api/groups/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        &app,
        "/api/groups/424242",
        group_json("AA-01", 1.0, 1, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(&app, "/api/groups/424242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_then_get_returns_not_found(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/groups", group_json("AA-01", 1.0, 1, None)).await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/groups/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/groups/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
