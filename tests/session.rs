//! Session lifecycle (restore, login, logout) against a mock API.

mod common;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use common::MockApi;
use timetable_portal::auth::{session, TokenStore};
use timetable_types::Role;

const ME: &str = r#"{"user": {"_id": "u1", "email": "lee@uni.ac.ke", "name": "Dr Lee", "role": "lecturer", "lecturer_id": "LEC-1"}}"#;

fn jwt(payload: &str) -> String {
    format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
}

#[tokio::test]
async fn test_restore_without_token_skips_request() {
    let mock = MockApi::start(vec![("GET", "/auth/me", 200, ME)]).await;

    assert!(session::restore(&mock.client()).await.is_none());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_restore_with_valid_token() {
    let mock = MockApi::start(vec![("GET", "/auth/me", 200, ME)]).await;
    let api = mock.client_with_token("stored");

    let user = session::restore(&api).await.unwrap();
    assert_eq!(user.id, "u1");
    assert_eq!(user.role, Role::Lecturer);
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer stored"));
    assert!(api.has_token());
}

#[tokio::test]
async fn test_restore_clears_rejected_token() {
    let mock = MockApi::start(vec![(
        "GET",
        "/auth/me",
        401,
        r#"{"detail": "Token expired"}"#,
    )])
    .await;
    let api = mock.client_with_token("stale");

    assert!(session::restore(&api).await.is_none());
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_login_uses_user_from_response() {
    let mock = MockApi::start(vec![(
        "POST",
        "/auth/login",
        200,
        r#"{"access_token": "abc", "user": {"id": "s1", "email": "amy@students.uni.ac.ke", "role": "student"}}"#,
    )])
    .await;
    let api = mock.client();

    let user = session::login(&api, " amy@students.uni.ac.ke ", "secret1", Role::Student)
        .await
        .unwrap();
    assert_eq!(user.id, "s1");
    assert_eq!(api.tokens().get().as_deref(), Some("abc"));
    assert_eq!(mock.hits("/auth/me"), 0);

    let body: serde_json::Value = serde_json::from_str(&mock.last().body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"email": "amy@students.uni.ac.ke", "password": "secret1", "role": "student"})
    );
}

#[tokio::test]
async fn test_login_fetches_me_when_user_missing() {
    let mock = MockApi::start(vec![
        ("POST", "/auth/login", 200, r#"{"access_token": "abc"}"#),
        ("GET", "/auth/me", 200, ME),
    ])
    .await;
    let api = mock.client();

    let user = session::login(&api, "lee@uni.ac.ke", "secret1", Role::Lecturer)
        .await
        .unwrap();
    assert_eq!(user.name, "Dr Lee");
    assert_eq!(mock.last().authorization.as_deref(), Some("Bearer abc"));
}

#[tokio::test]
async fn test_login_falls_back_to_token_claims() {
    let token = jwt(r#"{"user_id": "a1", "email": "root@uni.ac.ke", "role": "admin"}"#);
    let login_body: &'static str =
        Box::leak(format!(r#"{{"access_token": "{token}"}}"#).into_boxed_str());
    let mock = MockApi::start(vec![
        ("POST", "/auth/login", 200, login_body),
        ("GET", "/auth/me", 500, r#"{"detail": "Internal Server Error"}"#),
    ])
    .await;
    let api = mock.client();

    let user = session::login(&api, "root@uni.ac.ke", "secret1", Role::Admin)
        .await
        .unwrap();
    assert_eq!(user.id, "a1");
    assert_eq!(user.email, "root@uni.ac.ke");
    assert_eq!(user.role, Role::Admin);
    assert!(api.has_token());
}

#[tokio::test]
async fn test_opaque_token_without_me_is_rejected() {
    let mock = MockApi::start(vec![
        ("POST", "/auth/login", 200, r#"{"access_token": "opaque"}"#),
        ("GET", "/auth/me", 500, "{}"),
    ])
    .await;
    let api = mock.client();

    let err = session::login(&api, "lee@uni.ac.ke", "secret1", Role::Lecturer)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_failed_login_keeps_no_token() {
    let mock = MockApi::start(vec![(
        "POST",
        "/auth/login",
        401,
        r#"{"detail": "Invalid email or password"}"#,
    )])
    .await;
    let api = mock.client();

    let err = session::login(&api, "lee@uni.ac.ke", "wrong", Role::Lecturer)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_empty_access_token_is_an_error() {
    let mock = MockApi::start(vec![("POST", "/auth/login", 200, r#"{"access_token": ""}"#)]).await;
    let api = mock.client();

    let err = session::login(&api, "lee@uni.ac.ke", "secret1", Role::Lecturer)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid response format: No token received");
    assert!(!api.has_token());
}

#[tokio::test]
async fn test_logout_forgets_token() {
    let mock = MockApi::start(vec![]).await;
    let api = mock.client_with_token("abc");

    session::logout(&api);
    assert!(!api.has_token());
    assert!(mock.requests().is_empty());
}
