//! User management and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth, TestApp,
};
use serde_json::json;

#[tokio::test]
async fn admin_creates_user_who_can_log_in() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/users",
        json!({
            "username": "dave",
            "password": "dave-password",
            "role": "candidate",
            "first_name": "Dave",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["first_name"], "Dave");
    assert!(created.get("password_hash").is_none());

    let login = post_json(
        app.router(),
        "/api/v1/auth/login",
        json!({ "username": "dave", "password": "dave-password" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_admin_cannot_create_users() {
    let app = TestApp::new();
    let (_editor, token) = app.token_for("ed", "editor").await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/users",
        json!({ "username": "x", "password": "long-enough", "role": "admin" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_rejects_short_password_and_unknown_role() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;

    let short = post_json_auth(
        app.router(),
        "/api/v1/users",
        json!({ "username": "x", "password": "short", "role": "editor" }),
        &token,
    )
    .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(short).await["code"], "VALIDATION_ERROR");

    let bad_role = post_json_auth(
        app.router(),
        "/api/v1/users",
        json!({ "username": "x", "password": "long-enough", "role": "root" }),
        &token,
    )
    .await;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;
    app.seed_user("erin", "candidate").await;

    let response = post_json_auth(
        app.router(),
        "/api/v1/users",
        json!({ "username": "erin", "password": "long-enough", "role": "candidate" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn any_authenticated_user_can_read_users() {
    let app = TestApp::new();
    let (candidate, token) = app.token_for("fred", "candidate").await;

    let list = get_auth(app.router(), "/api/v1/users", &token).await;
    assert_eq!(list.status(), StatusCode::OK);
    assert_eq!(body_json(list).await.as_array().unwrap().len(), 1);

    let one = get_auth(app.router(), &format!("/api/v1/users/{}", candidate.id), &token).await;
    assert_eq!(one.status(), StatusCode::OK);
    assert_eq!(body_json(one).await["username"], "fred");
}

#[tokio::test]
async fn admin_updates_role() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;
    let user = app.seed_user("gina", "candidate").await;

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/users/{}", user.id),
        json!({ "role": "editor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "editor");
    assert_eq!(json["username"], "gina");
}

#[tokio::test]
async fn reset_password_replaces_credentials() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;
    let user = app.seed_user("hank", "candidate").await;

    let response = post_json_auth(
        app.router(),
        &format!("/api/v1/users/{}/reset-password", user.id),
        json!({ "new_password": "brand-new-password" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let login = post_json(
        app.router(),
        "/api/v1/auth/login",
        json!({ "username": "hank", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_user_then_lookup_is_not_found() {
    let app = TestApp::new();
    let (_admin, token) = app.token_for("admin", "admin").await;
    let user = app.seed_user("ivy", "candidate").await;
    let uri = format!("/api/v1/users/{}", user.id);

    let deleted = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let again = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let lookup = get_auth(app.router(), &uri, &token).await;
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);
}
