mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_signup_login_and_profile() {
    let app = TestApp::new().await;
    let (user_id, token) = app.signup("google-ada", "  Ada  ").await;

    let (status, user) = app.request("GET", &format!("/users/{}", user_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["auth_provider"], "GOOGLE");
    assert_eq!(user["consent_terms"], true);
    assert!(!user["data_consent"].is_null());

    let (status, users) = app.request("GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_auth_subject_conflicts() {
    let app = TestApp::new().await;
    app.signup("google-dup", "First").await;

    let (status, body) = app.request("POST", "/users", None, Some(json!({
        "auth_subject": "google-dup",
        "name": "Second",
        "auth_provider": "GOOGLE",
        "consent_terms": true
    }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    let (status, _) = app.request("POST", "/users", None, Some(json!({
        "auth_subject": "s1", "name": "   ", "auth_provider": "GOOGLE", "consent_terms": true
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("POST", "/users", None, Some(json!({
        "auth_subject": "s2", "name": "Bob", "auth_provider": "FACEBOOK", "consent_terms": true
    }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.request("POST", "/users", None, Some(json!({ "name": 42 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_login_rules() {
    let app = TestApp::new().await;

    let (status, _) = app.request("POST", "/login", None, Some(json!({ "auth_subject": "nobody" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("POST", "/users", None, Some(json!({
        "auth_subject": "no-consent", "name": "Eve", "auth_provider": "PASSWORD", "consent_terms": false
    }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.request("POST", "/login", None, Some(json!({ "auth_subject": "no-consent" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let app = TestApp::new().await;

    let (status, _) = app.request("GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.request("GET", "/teams", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_only_self_can_update_or_delete() {
    let app = TestApp::new().await;
    let (ada, ada_token) = app.signup("ada", "Ada").await;
    let (bob, bob_token) = app.signup("bob", "Bob").await;

    let (status, _) = app.request("PATCH", &format!("/users/{}", ada), Some(&bob_token), Some(json!({ "name": "Hacked" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, user) = app.request("GET", &format!("/users/{}", ada), Some(&bob_token), None).await;
    assert_eq!(user["name"], "Ada");

    let (status, body) = app.request("PATCH", &format!("/users/{}", ada), Some(&ada_token), Some(json!({ "tax_id": " 99 " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected_rows"], 1);

    let (_, user) = app.request("GET", &format!("/users/{}", ada), Some(&ada_token), None).await;
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["tax_id"], "99");

    let (status, _) = app.request("PATCH", &format!("/users/{}", ada), Some(&ada_token), Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("DELETE", &format!("/users/{}", ada), Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.request("DELETE", &format!("/users/{}", bob), Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected_rows"], 1);

    let (status, _) = app.request("GET", &format!("/users/{}", bob), Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_token_of_deleted_user_is_unauthorized() {
    let app = TestApp::new().await;
    let (ada, token) = app.signup("ada", "Ada").await;

    let (status, _) = app.request("DELETE", &format!("/users/{}", ada), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.request("POST", "/teams", Some(&token), Some(json!({ "name": "Ghost", "domain": "ghost.com" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "user no longer exists");

    let (status, _) = app.request("GET", &format!("/users/{}/teams", ada), Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_teams_lists_memberships() {
    let app = TestApp::new().await;
    let (ada, token) = app.signup("ada", "Ada").await;
    let team_id = app.create_team(&token, "Acme").await;

    let (status, teams) = app.request("GET", &format!("/users/{}/teams", ada), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["team_id"], team_id);
    assert_eq!(teams[0]["team_name"], "Acme");
    assert_eq!(teams[0]["role"], "OWNER");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
