//! Test server builder and request helpers
//!
//! Every test server gets its own SQLite database in a temporary directory.
//! The TempDir is kept in the returned `TestServer` so cleanup happens when
//! it is dropped at the end of the test.

use axum::{
	Router,
	body::Body,
	http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use quiz_core::{engine, lists, session};
use quiz::{App, AppBuilder};
use quiz_meta_adapter_sqlite::MetaAdapterSqlite;
use quiz_types::auth::AuthCtx;
use quiz_types::types::{Fields, Item, ItemId};

pub const SECRET: &str = "test-cookie-secret";
pub const PASSWORD: &str = "password123";

pub struct TestServer {
	pub app: App,
	pub router: Router,
	_temp: TempDir,
}

pub struct TestResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Value,
}

/// Build a server with seeding disabled, so tests control every user
pub async fn create_test_server() -> TestServer {
	create_test_server_with(|builder| {
		builder.create_tables(true);
	})
	.await
}

pub async fn create_test_server_with(configure: impl FnOnce(&mut AppBuilder)) -> TestServer {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = MetaAdapterSqlite::open(temp_dir.path()).await.expect("Failed to create adapter");

	let mut builder = AppBuilder::new();
	builder.cookie_secret(SECRET).meta_adapter(Arc::new(adapter));
	configure(&mut builder);
	let app = builder.build().await.expect("Failed to build app");
	let router = quiz::routes::init(app.clone());

	TestServer { app, router, _temp: temp_dir }
}

impl TestServer {
	pub async fn request(
		&self,
		method: Method,
		uri: &str,
		token: Option<&str>,
		body: Option<Value>,
	) -> TestResponse {
		let mut req = Request::builder().method(method).uri(uri);
		if let Some(token) = token {
			req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
		}
		let req = match body {
			Some(body) => req
				.header(header::CONTENT_TYPE, "application/json")
				.body(Body::from(body.to_string())),
			None => req.body(Body::empty()),
		}
		.expect("Failed to build request");

		self.send(req).await
	}

	pub async fn send(&self, req: Request<Body>) -> TestResponse {
		let res = self.router.clone().oneshot(req).await.expect("Router failed");
		let status = res.status();
		let headers = res.headers().clone();
		let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("Failed to read body");
		let body = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
		};

		TestResponse { status, headers, body }
	}

	pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
		self.request(Method::GET, uri, token, None).await
	}

	pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
		self.request(Method::POST, uri, token, Some(body)).await
	}

	pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
		self.request(Method::PATCH, uri, token, Some(body)).await
	}

	pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
		self.request(Method::DELETE, uri, token, None).await
	}

	/// Create a user directly through the engine and return it with a session token
	pub async fn create_user(&self, name: &str, email: &str, is_admin: bool) -> (Item, String) {
		let root = AuthCtx { user_id: ItemId(0), name: "root".into(), email: "".into(), is_admin: true };
		let list = self.app.lists.get(lists::USER).expect("User list");
		let input: Fields = match json!({
			"name": name,
			"email": email,
			"isAdmin": is_admin,
			"password": PASSWORD,
		}) {
			Value::Object(map) => map,
			_ => unreachable!(),
		};
		let user = engine::create_item(&self.app, Some(&root), list, &input).await.expect("Failed to create user");
		let token = session::generate_session_token(user.id, SECRET).expect("Failed to create token");

		(user, token.to_string())
	}
}

impl TestResponse {
	pub fn data(&self) -> &Value {
		&self.body["data"]
	}

	pub fn error_code(&self) -> Option<&str> {
		self.body["error"]["code"].as_str()
	}

	pub fn id(&self) -> i64 {
		self.data()["id"].as_i64().expect("response has no id")
	}
}

// vim: ts=4
