//! Admin API handlers
//!
//! The admin UI renders list views and forms from these descriptions. The
//! access shown is the caller's own, so the UI can hide what it cannot do.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

use crate::prelude::*;
use quiz_core::access;
use quiz_core::app::{PROJECT_NAME, VERSION};
use quiz_core::extract::{Auth, OptionalRequestId};
use quiz_types::schema::{FieldDef, FieldType, ListDef, Operation};
use quiz_types::types::ApiResponse;

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct FieldInfo {
	name: &'static str,
	#[serde(rename = "type")]
	typ: &'static str,
	required: bool,
	unique: bool,
	readable: bool,
	options: Option<&'static [&'static str]>,
	#[serde(rename = "ref")]
	ref_list: Option<&'static str>,
	many: Option<bool>,
}

impl From<&FieldDef> for FieldInfo {
	fn from(field: &FieldDef) -> Self {
		let (options, ref_list, many) = match field.typ {
			FieldType::Select(options) => (Some(options), None, None),
			FieldType::Relationship { list, many } => (None, Some(list), Some(many)),
			_ => (None, None, None),
		};
		FieldInfo {
			name: field.name,
			typ: field.typ.name(),
			required: field.required,
			unique: field.unique,
			readable: field.is_readable(),
			options,
			ref_list,
			many,
		}
	}
}

#[derive(Debug, Serialize)]
pub struct ListInfo {
	key: &'static str,
	path: &'static str,
	fields: Vec<FieldInfo>,
	/// Operation name to "all", "own" or "none"
	access: BTreeMap<&'static str, &'static str>,
}

fn list_info(list: &ListDef, auth: &quiz_types::auth::AuthCtx) -> ListInfo {
	let access = Operation::ALL
		.iter()
		.map(|op| (op.as_str(), access::describe(&access::evaluate(list.gate(*op), Some(auth)))))
		.collect();

	ListInfo {
		key: list.key,
		path: list.path,
		fields: list.fields.iter().map(FieldInfo::from).collect(),
		access,
	}
}

/// # GET /admin/api/lists
pub async fn get_lists(
	State(app): State<App>,
	Auth(auth): Auth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<ListInfo>>>)> {
	let lists = app.lists.iter().map(|list| list_info(list, &auth)).collect();

	let response = ApiResponse::new(lists).with_req_id(req_id.unwrap_or_default());
	Ok((StatusCode::OK, Json(response)))
}

/// # GET /admin/api/health
#[derive(Debug, Serialize)]
pub struct Health {
	name: &'static str,
	version: &'static str,
}

pub async fn get_health() -> (StatusCode, Json<Health>) {
	(StatusCode::OK, Json(Health { name: PROJECT_NAME, version: VERSION }))
}

// vim: ts=4
