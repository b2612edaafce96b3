//! Handlers of the list API
//!
//! One set of routes serves every declared list, looked up by its plural path
//! segment (`/api/quizzes`, `/api/users`, ...).

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use quiz_core::engine;
use quiz_core::extract::{OptionalAuth, OptionalRequestId};
use quiz_types::schema::ListDef;
use quiz_types::types::{ApiResponse, Fields, Item};

fn lookup<'a>(app: &'a App, path: &str) -> ClResult<&'a ListDef> {
	app.lists.by_path(path).ok_or(Error::NotFound)
}

fn respond<T>(
	status: StatusCode,
	data: T,
	req_id: Option<String>,
) -> (StatusCode, Json<ApiResponse<T>>) {
	(status, Json(ApiResponse::new(data).with_req_id(req_id.unwrap_or_default())))
}

/// # GET /api/{list}
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
	first: Option<u32>,
	skip: Option<u32>,
}

pub async fn list_items(
	State(app): State<App>,
	Path(path): Path<String>,
	Query(query): Query<ListQuery>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<Item>>>)> {
	let list = lookup(&app, &path)?;
	let items = engine::list_items(&app, auth.as_ref(), list, query.first, query.skip).await?;

	Ok(respond(StatusCode::OK, items, req_id))
}

/// # GET /api/{list}/meta
#[derive(Debug, Serialize)]
pub struct ListMeta {
	count: u64,
}

pub async fn get_meta(
	State(app): State<App>,
	Path(path): Path<String>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<ListMeta>>)> {
	let list = lookup(&app, &path)?;
	let count = engine::count_items(&app, auth.as_ref(), list).await?;

	Ok(respond(StatusCode::OK, ListMeta { count }, req_id))
}

/// # GET /api/{list}/{id}
pub async fn get_item(
	State(app): State<App>,
	Path((path, id)): Path<(String, i64)>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let list = lookup(&app, &path)?;
	let item = engine::read_item(&app, auth.as_ref(), list, ItemId(id)).await?;

	Ok(respond(StatusCode::OK, item, req_id))
}

/// # POST /api/{list}
pub async fn post_item(
	State(app): State<App>,
	Path(path): Path<String>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(input): Json<Fields>,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let list = lookup(&app, &path)?;
	let item = engine::create_item(&app, auth.as_ref(), list, &input).await?;

	Ok(respond(StatusCode::CREATED, item, req_id))
}

/// # PATCH /api/{list}/{id}
pub async fn patch_item(
	State(app): State<App>,
	Path((path, id)): Path<(String, i64)>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(input): Json<Fields>,
) -> ClResult<(StatusCode, Json<ApiResponse<Item>>)> {
	let list = lookup(&app, &path)?;
	let item = engine::update_item(&app, auth.as_ref(), list, ItemId(id), &input).await?;

	Ok(respond(StatusCode::OK, item, req_id))
}

/// # DELETE /api/{list}/{id}
pub async fn delete_item(
	State(app): State<App>,
	Path((path, id)): Path<(String, i64)>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<()>>)> {
	let list = lookup(&app, &path)?;
	engine::delete_item(&app, auth.as_ref(), list, ItemId(id)).await?;

	Ok(respond(StatusCode::OK, (), req_id))
}

// vim: ts=4
