//! HTTP-level integration tests for the owner-scoped `/pipelines` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, login, post_json, post_json_auth, register,
    register_and_login,
};
use serde_json::json;
use sqlx::SqlitePool;

async fn create_pipeline(pool: &SqlitePool, token: &str, body: serde_json::Value) -> i64 {
    let response = post_json_auth(build_test_app(pool.clone()), "/pipelines", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// The end-to-end flow: register, conflict, login, create, list, detail,
/// and a foreign user's detail lookup.
#[sqlx::test(migrations = "../../db/migrations")]
async fn full_owner_scenario(pool: SqlitePool) {
    register(&pool, "alice", "a@x.com", "pw1").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/register",
        json!({ "username": "alice", "email": "a2@x.com", "password": "pw1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let token = login(&pool, "alice", "pw1").await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/pipelines",
        json!({ "name": "P1" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Pipeline created");
    let id = created["id"].as_i64().expect("id must be an integer");

    let response = get_auth(build_test_app(pool.clone()), "/pipelines", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().expect("list must be an array");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["name"], "P1");
    assert!(list[0]["created_at"].is_string());
    assert!(
        list[0].get("configuration").is_none(),
        "list view must withhold documents"
    );

    let response = get_auth(build_test_app(pool.clone()), &format!("/pipelines/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = body_json(response).await;
    assert_eq!(detail["id"], id);
    assert_eq!(detail["name"], "P1");
    assert_eq!(detail["configuration"], json!({}));
    assert_eq!(detail["permissions"], json!({}));
    assert_eq!(detail["limitations"], json!({}));
    assert_eq!(detail["billing_info"], json!({}));
    assert!(detail["created_at"].is_string());
    assert!(detail.get("owner_id").is_none());

    let bob_token = register_and_login(&pool, "bob", "pw2").await;
    let response = get_auth(build_test_app(pool), &format!("/pipelines/{id}"), &bob_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn documents_round_trip_verbatim(pool: SqlitePool) {
    let token = register_and_login(&pool, "alice", "pw1").await;
    let body = json!({
        "name": "billing-heavy",
        "configuration": { "steps": [1, 2, 3], "nested": { "on": true } },
        "permissions": { "read": ["alice"] },
        "limitations": { "max_runs": 10 },
        "billing_info": null
    });
    let id = create_pipeline(&pool, &token, body).await;

    let response = get_auth(build_test_app(pool), &format!("/pipelines/{id}"), &token).await;
    let detail = body_json(response).await;
    assert_eq!(
        detail["configuration"],
        json!({ "steps": [1, 2, 3], "nested": { "on": true } })
    );
    assert_eq!(detail["permissions"], json!({ "read": ["alice"] }));
    assert_eq!(detail["limitations"], json!({ "max_runs": 10 }));
    assert_eq!(detail["billing_info"], json!({}), "null defaults to empty object");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_only_contains_callers_pipelines(pool: SqlitePool) {
    let alice = register_and_login(&pool, "alice", "pw1").await;
    let bob = register_and_login(&pool, "bob", "pw2").await;

    create_pipeline(&pool, &alice, json!({ "name": "a1" })).await;
    create_pipeline(&pool, &bob, json!({ "name": "b1" })).await;
    create_pipeline(&pool, &alice, json!({ "name": "a2" })).await;

    let response = get_auth(build_test_app(pool.clone()), "/pipelines", &alice).await;
    let names: Vec<String> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a1", "a2"]);

    let response = get_auth(build_test_app(pool), "/pipelines", &bob).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_list_for_new_user(pool: SqlitePool) {
    let token = register_and_login(&pool, "alice", "pw1").await;
    let response = get_auth(build_test_app(pool), "/pipelines", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

/// "Not yours" and "does not exist" produce byte-identical responses apart
/// from the id echoed in the message.
#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_and_missing_pipelines_look_the_same(pool: SqlitePool) {
    let alice = register_and_login(&pool, "alice", "pw1").await;
    let bob = register_and_login(&pool, "bob", "pw2").await;
    let id = create_pipeline(&pool, &alice, json!({ "name": "private" })).await;

    let foreign = get_auth(build_test_app(pool.clone()), &format!("/pipelines/{id}"), &bob).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let foreign = body_json(foreign).await;
    assert_eq!(foreign["code"], "NOT_FOUND");
    assert_eq!(foreign["error"], format!("Pipeline with id {id} not found"));

    let missing_id = id + 1000;
    let missing = get_auth(build_test_app(pool), &format!("/pipelines/{missing_id}"), &bob).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let missing = body_json(missing).await;
    assert_eq!(missing["code"], "NOT_FOUND");
    assert_eq!(missing["error"], format!("Pipeline with id {missing_id} not found"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_cannot_be_supplied_by_client(pool: SqlitePool) {
    let alice = register_and_login(&pool, "alice", "pw1").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/pipelines",
        json!({ "name": "spoof", "owner_id": 999 }),
        &alice,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get_auth(build_test_app(pool), "/pipelines", &alice).await;
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_requires_a_valid_name(pool: SqlitePool) {
    let token = register_and_login(&pool, "alice", "pw1").await;

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "n".repeat(101) })] {
        let response =
            post_json_auth(build_test_app(pool.clone()), "/pipelines", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

/// Authorization runs before the body is parsed or the store is touched.
#[sqlx::test(migrations = "../../db/migrations")]
async fn pipeline_routes_require_authentication(pool: SqlitePool) {
    let response = get(build_test_app(pool.clone()), "/pipelines").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(build_test_app(pool.clone()), "/pipelines/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // An invalid body must not mask the missing credentials.
    let response = post_json(build_test_app(pool.clone()), "/pipelines", json!({ "bogus": 1 })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pipelines")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_pipeline_id_is_a_json_validation_error(pool: SqlitePool) {
    let token = register_and_login(&pool, "alice", "pw1").await;

    for uri in ["/pipelines/abc", "/pipelines/99999999999999999999"] {
        let response = get_auth(build_test_app(pool.clone()), uri, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR", "uri: {uri}");
        assert!(json["error"].is_string(), "uri: {uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unparsable_pipeline_id_still_requires_authentication(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/pipelines/abc").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
