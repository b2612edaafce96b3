//! Common test utilities and helpers

#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;

use quiz_core::app::{App, AppBuilderOpts, AppState};
use quiz_core::lists::ListRegistry;
use quiz_meta_adapter_sqlite::MetaAdapterSqlite;
use quiz_types::auth::AuthCtx;
use quiz_types::schema::ListDef;
use quiz_types::types::{Fields, ItemId};

pub const SECRET: &str = "test-cookie-secret";

pub async fn create_test_app(opts: AppBuilderOpts) -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = MetaAdapterSqlite::open(temp_dir.path()).await.expect("Failed to create adapter");
	let lists = ListRegistry::default();
	for list in lists.iter() {
		quiz_types::meta_adapter::MetaAdapter::prepare_list(&adapter, list)
			.await
			.expect("Failed to prepare list");
	}

	let app = Arc::new(AppState { opts, lists, meta_adapter: Arc::new(adapter) });
	(app, temp_dir)
}

pub async fn create_default_app() -> (App, TempDir) {
	create_test_app(AppBuilderOpts { cookie_secret: SECRET.into(), ..Default::default() }).await
}

pub fn list<'a>(app: &'a App, key: &str) -> &'a ListDef {
	app.lists.get(key).expect("list not declared")
}

pub fn fields(value: Value) -> Fields {
	match value {
		Value::Object(map) => map,
		_ => panic!("expected a JSON object"),
	}
}

pub fn actor(id: ItemId, is_admin: bool) -> AuthCtx {
	AuthCtx { user_id: id, name: "Test".into(), email: "test@example.com".into(), is_admin }
}

/// An admin actor not backed by a stored user
pub fn root() -> AuthCtx {
	actor(ItemId(0), true)
}

// vim: ts=4
