//! Login, session cookie and seeding tests

mod common;

use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use common::*;
use serde_json::json;

use quiz_core::{lists, seed};

fn set_cookie(res: &TestResponse) -> &str {
	res.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
	let server = create_test_server().await;
	let (alice, _token) = server.create_user("Alice", "alice@example.com", false).await;

	let res = server
		.post("/api/auth/login", None, json!({ "email": "alice@example.com", "password": PASSWORD }))
		.await;
	assert_eq!(res.status, StatusCode::OK);
	assert_eq!(res.data()["id"], alice.id.0);
	assert_eq!(res.data()["isAdmin"], false);
	assert!(res.data()["token"].as_str().is_some_and(|t| !t.is_empty()));

	let cookie = set_cookie(&res);
	assert!(cookie.starts_with("quiz.sid="));
	assert!(cookie.contains("HttpOnly"));
	assert!(cookie.contains("Max-Age=2592000"));
	assert!(cookie.contains("SameSite=Strict"));
	assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
	let server = create_test_server().await;
	server.create_user("Alice", "alice@example.com", false).await;

	let res = server
		.post("/api/auth/login", None, json!({ "email": "alice@example.com", "password": PASSWORD }))
		.await;
	let cookie = set_cookie(&res).split(';').next().unwrap_or_default().to_string();

	let req = Request::builder()
		.uri("/api/auth/me")
		.header(header::COOKIE, cookie)
		.body(Body::empty())
		.unwrap();
	let res = server.send(req).await;
	assert_eq!(res.status, StatusCode::OK);
	assert_eq!(res.data()["email"], "alice@example.com");
	assert!(res.data().get("password").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
	let server = create_test_server().await;
	server.create_user("Alice", "alice@example.com", false).await;

	let wrong_password = server
		.post("/api/auth/login", None, json!({ "email": "alice@example.com", "password": "nope-nope" }))
		.await;
	let unknown_email = server
		.post("/api/auth/login", None, json!({ "email": "bob@example.com", "password": PASSWORD }))
		.await;

	assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
	assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
	assert_eq!(wrong_password.body, unknown_email.body);
	assert_eq!(wrong_password.error_code(), Some("E-AUTH"));
	assert!(wrong_password.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_clears_cookie() {
	let server = create_test_server().await;
	let (_alice, token) = server.create_user("Alice", "alice@example.com", false).await;

	let res = server.post("/api/auth/logout", Some(&token), json!({})).await;
	assert_eq!(res.status, StatusCode::OK);
	let cookie = set_cookie(&res);
	assert!(cookie.starts_with("quiz.sid=;"));
	assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_me_without_session_is_null() {
	let server = create_test_server().await;

	let res = server.get("/api/auth/me", None).await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.data().is_null());

	let res = server.get("/api/auth/me", Some("not-a-token")).await;
	assert_eq!(res.status, StatusCode::OK);
	assert!(res.data().is_null());
}

#[tokio::test]
async fn test_session_of_deleted_user_is_anonymous() {
	let server = create_test_server().await;
	let (_admin, admin_token) = server.create_user("Admin", "admin@example.com", true).await;
	let (alice, alice_token) = server.create_user("Alice", "alice@example.com", false).await;

	let res = server.delete(&format!("/api/users/{}", alice.id), Some(&admin_token)).await;
	assert_eq!(res.status, StatusCode::OK);

	let res = server.get("/api/auth/me", Some(&alice_token)).await;
	assert!(res.data().is_null());
	let res = server.get("/api/users", Some(&alice_token)).await;
	assert_eq!(res.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_changed_password_is_used_for_login() {
	let server = create_test_server().await;
	let (alice, token) = server.create_user("Alice", "alice@example.com", false).await;

	let res = server
		.patch(&format!("/api/users/{}", alice.id), Some(&token), json!({ "password": "brand-new-pass" }))
		.await;
	assert_eq!(res.status, StatusCode::OK);

	let res = server
		.post("/api/auth/login", None, json!({ "email": "alice@example.com", "password": PASSWORD }))
		.await;
	assert_eq!(res.status, StatusCode::UNAUTHORIZED);
	let res = server
		.post("/api/auth/login", None, json!({ "email": "alice@example.com", "password": "brand-new-pass" }))
		.await;
	assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_short_password_rejected() {
	let server = create_test_server().await;
	let (alice, token) = server.create_user("Alice", "alice@example.com", false).await;

	let res = server
		.patch(&format!("/api/users/{}", alice.id), Some(&token), json!({ "password": "short" }))
		.await;
	assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_build_seeds_initial_admin() {
	let server = create_test_server_with(|builder| {
		builder.create_tables(false);
	})
	.await;

	let adapter = &server.app.meta_adapter;
	assert_eq!(adapter.count_items(lists::USER, None).await.unwrap(), 1);
	let admin = adapter.find_item_by_field(lists::USER, "email", seed::ADMIN_EMAIL).await.unwrap();
	let admin = admin.expect("initial admin");
	assert_eq!(admin.fields["isAdmin"], true);
	assert!(adapter.read_global(seed::SEEDED_KEY).await.unwrap().is_some());

	// A second run is a no-op
	assert!(matches!(seed::seed(&server.app).await.unwrap(), seed::SeedOutcome::AlreadySeeded));
}

#[tokio::test]
async fn test_build_requires_cookie_secret() {
	let mut builder = quiz::AppBuilder::new();
	builder.create_tables(true);
	match builder.build().await {
		Err(quiz_types::error::Error::ConfigError(msg)) => assert!(msg.contains("COOKIE_SECRET")),
		other => panic!("expected config error, got {:?}", other.map(|_| ())),
	}
}

// vim: ts=4
