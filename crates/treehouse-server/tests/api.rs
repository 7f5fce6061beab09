//! HTTP API tests driven through the router without a socket

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use treehouse_core::{GoogleOAuth, Identity, ObjectStore, TreeHouse};
use treehouse_server::{router, AppState, SESSION_COOKIE, STATE_COOKIE};
use url::Url;

const JPEG: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF";
const BOUNDARY: &str = "treehouse-test-boundary";

// ============================================================================
// Helpers
// ============================================================================

fn oauth() -> GoogleOAuth {
    GoogleOAuth::new(
        "client-id",
        "client-secret",
        Url::parse("http://127.0.0.1:3000/api/auth/callback/google").unwrap(),
        "test-secret",
    )
    .unwrap()
}

fn state_with(store: ObjectStore) -> AppState {
    AppState::new(TreeHouse::new(store, "test-secret").unwrap(), oauth())
}

fn app() -> (AppState, Router) {
    let state = state_with(ObjectStore::new_memory());
    (state.clone(), router(state))
}

fn sign_in(state: &AppState, email: &str) -> String {
    let (token, _) = state
        .house()
        .sessions()
        .sign_in(Identity::new(email))
        .unwrap();
    token
}

/// Multipart body with an image `file` part and optional `user` part
fn multipart(file_name: &str, bytes: &[u8], user: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(user) = user {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"user\"\r\n\r\n{user}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(path: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::post(path).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

// ============================================================================
// Feed
// ============================================================================

#[tokio::test]
async fn test_feed_page() {
    let (_, app) = app();
    let (status, json) = send_json(&app, get("/api/feed?page=1&size=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cards"].as_array().unwrap().len(), 5);
    assert_eq!(json["page"], 1);
    assert_eq!(json["next_page"], 2);
    assert_eq!(json["cards"][0]["id"], "seed-5");
}

#[tokio::test]
async fn test_feed_defaults() {
    let (_, app) = app();
    let (status, json) = send_json(&app, get("/api/feed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["page"], 0);
    assert_eq!(json["cards"].as_array().unwrap().len(), 20);
}

// ============================================================================
// Assets
// ============================================================================

#[tokio::test]
async fn test_upload_then_fetch_banner() {
    let (state, app) = app();
    let token = sign_in(&state, "a.b@c.com");

    let body = multipart("photo.jpg", JPEG, None);
    let (status, json) =
        send_json(&app, upload_request("/api/upload-banner", Some(&token), body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["path"], "banners/a_b_c_com/photo.jpg");

    let (status, json) = send_json(&app, get("/api/banner?user=a_b_c_com")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["url"].as_str().unwrap().contains("banners/a_b_c_com/"));

    let (_, json) = send_json(&app, get("/api/profile-pic?user=a_b_c_com")).await;
    assert!(json["url"].is_null());
}

#[tokio::test]
async fn test_fetch_without_user_uses_session() {
    let (state, app) = app();
    let token = sign_in(&state, "me@x.io");

    let (status, _) = send_json(&app, get("/api/profile-pic")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::get("/api/profile-pic")
        .header(header::COOKIE, format!("{SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();
    let (status, json) = send_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["url"].is_null());
}

#[tokio::test]
async fn test_upload_requires_session() {
    let (_, app) = app();
    let body = multipart("photo.jpg", JPEG, None);
    let (status, json) = send_json(&app, upload_request("/api/upload-banner", None, body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(json["error"].as_str().unwrap().contains("logged in"));
}

#[tokio::test]
async fn test_upload_for_other_user_rejected() {
    let (state, app) = app();
    let token = sign_in(&state, "me@x.io");
    let body = multipart("photo.jpg", JPEG, Some("them_x_io"));
    let (status, _) = send(&app, upload_request("/api/upload-banner", Some(&token), body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let (state, app) = app();
    let token = sign_in(&state, "me@x.io");
    let body = multipart("notes.txt", b"just some text", None);
    let (status, _) =
        send(&app, upload_request("/api/upload-profile-pic", Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_storage_failure_is_bad_gateway() {
    let store = ObjectStore::new_memory();
    store.memory().unwrap().deny_writes(true);
    let state = state_with(store);
    let app = router(state.clone());
    let token = sign_in(&state, "me@x.io");

    let body = multipart("photo.jpg", JPEG, None);
    let (status, _) = send(&app, upload_request("/api/upload-banner", Some(&token), body)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_local_assets_served() {
    let temp = tempfile::tempdir().unwrap();
    let store = ObjectStore::new_local(temp.path(), "http://127.0.0.1:3000/assets")
        .await
        .unwrap();
    let state = state_with(store);
    let app = router(state.clone());
    let token = sign_in(&state, "a.b@c.com");

    let body = multipart("photo.jpg", JPEG, None);
    let (status, json) =
        send_json(&app, upload_request("/api/upload-banner", Some(&token), body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["url"],
        "http://127.0.0.1:3000/assets/banners/a_b_c_com/photo.jpg"
    );

    let (status, bytes) = send(&app, get("/assets/banners/a_b_c_com/photo.jpg")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, JPEG);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    let (state, app) = app();
    let (status, _) = send(&app, get("/api/auth/session")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = sign_in(&state, "a.b@c.com");
    let authed = |req: axum::http::request::Builder| {
        req.header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, json) = send_json(&app, authed(Request::get("/api/auth/session"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sanitized_key"], "a_b_c_com");

    let (status, _) = send(&app, authed(Request::post("/api/auth/signout"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, authed(Request::get("/api/auth/session"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signin_redirects_to_google() {
    let (_, app) = app();
    let response = app.oneshot(get("/api/auth/signin")).await.unwrap();
    assert!(response.status().is_redirection());
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://accounts.google.com/"));
    assert!(location.contains("client_id=client-id"));

    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("{STATE_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));
}

/// Start a sign-in and return the issued state value
async fn start_sign_in(app: &Router) -> String {
    let response = app.clone().oneshot(get("/api/auth/signin")).await.unwrap();
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value.to_string())
        .unwrap()
}

fn callback(state: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(format!("/api/auth/callback/google?code=&state={state}"));
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, format!("{STATE_COOKIE}={cookie}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_callback_requires_state_cookie() {
    let (_, app) = app();
    let issued = start_sign_in(&app).await;

    // Valid state replayed in a browser that never started sign-in
    let (status, _) = send(&app, callback(&issued, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = start_sign_in(&app).await;
    let (status, _) = send(&app, callback(&issued, Some(&other))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Matching cookie gets past the state check to the code exchange
    let (status, _) = send(&app, callback(&issued, Some(&issued))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_callback_errors() {
    let (_, app) = app();
    let (status, _) = send(&app, get("/api/auth/callback/google")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/auth/callback/google?error=access_denied")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/api/auth/callback/google?code=abc&state=forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Misc
// ============================================================================

#[tokio::test]
async fn test_env_report_shape() {
    let (_, app) = app();
    let (status, json) = send_json(&app, get("/api/test-env")).await;
    assert_eq!(status, StatusCode::OK);
    let report = json.as_object().unwrap();
    assert!(report.contains_key("GOOGLE_CLIENT_ID"));
    assert!(report.values().all(Value::is_boolean));
}

#[tokio::test]
async fn test_unknown_route_404() {
    let (_, app) = app();
    let (status, _) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
