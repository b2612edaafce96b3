//! CRUD engine
//!
//! Every data operation goes through here. The list gate of the operation is
//! evaluated first: `Denied` rejects, `RestrictedTo(f)` narrows the target
//! rows to `f` inside the storage query, `Unrestricted` applies as is. Field
//! gates are intersected with the list gate for the fields a request touches.
//!
//! A target row that does not exist and a row excluded by the filter are both
//! reported as `PermissionDenied`.

use serde_json::Value;

use crate::prelude::*;
use crate::{access, crypto, validate};
use quiz_types::access::Access;
use quiz_types::auth::AuthCtx;
use quiz_types::meta_adapter::ListItemOptions;
use quiz_types::schema::{FieldType, ListDef, Operation};
use quiz_types::types::{Fields, Item};

fn subject(auth: Option<&AuthCtx>) -> String {
	auth.map_or_else(|| "anonymous".to_string(), |a| a.user_id.to_string())
}

fn deny(list: &ListDef, op: Operation, auth: Option<&AuthCtx>, field: Option<&str>) -> Error {
	tracing::warn!(
		subject = %subject(auth),
		list = list.key,
		operation = %op,
		field = field.unwrap_or("-"),
		"Access denied"
	);
	Error::PermissionDenied
}

/// Storage says the row is not there (or not in the filter)
fn hide_not_found(
	err: Error,
	list: &ListDef,
	op: Operation,
	auth: Option<&AuthCtx>,
	id: ItemId,
) -> Error {
	match err {
		Error::NotFound => {
			debug!("{} {} {}: no matching row", op, list.key, id);
			deny(list, op, auth, None)
		}
		err => err,
	}
}

/// Evaluate the list gate of an operation, rejecting `Denied`
fn list_access(list: &ListDef, op: Operation, auth: Option<&AuthCtx>) -> ClResult<Access> {
	let access = access::evaluate(list.gate(op), auth);
	if access.is_denied() {
		return Err(deny(list, op, auth, None));
	}
	Ok(access)
}

/// Narrow `access` by the gates of the fields present in `input`
fn field_access(
	list: &ListDef,
	op: Operation,
	auth: Option<&AuthCtx>,
	input: &Fields,
	mut access: Access,
) -> ClResult<Access> {
	for field in &list.fields {
		if !input.contains_key(field.name) {
			continue;
		}
		if let Some(gate) = field.gate(op) {
			access = access.and(access::evaluate(gate, auth));
			if access.is_denied() {
				return Err(deny(list, op, auth, Some(field.name)));
			}
		}
	}
	Ok(access)
}

/// Drop fields the actor may not read from an item
pub fn strip_unreadable(list: &ListDef, auth: Option<&AuthCtx>, mut item: Item) -> Item {
	for field in &list.fields {
		let Some(gate) = field.gate(Operation::Read) else {
			continue;
		};
		if !access::evaluate(gate, auth).permits(&item) {
			item.fields.remove(field.name);
		}
	}
	item
}

/// Every referenced item must exist in its target list
async fn check_references(app: &App, list: &ListDef, fields: &Fields) -> ClResult<()> {
	for (target, ids) in validate::references(list, fields) {
		let existing = app.meta_adapter.existing_ids(target, &ids).await?;
		if let Some(missing) = ids.iter().find(|id| !existing.contains(id)) {
			return Err(Error::ValidationError(format!(
				"{}: referenced {} {} does not exist",
				list.key, target, missing
			)));
		}
	}
	Ok(())
}

/// Replace plaintext secrets with their hashes
async fn hash_passwords(list: &ListDef, fields: &mut Fields) -> ClResult<()> {
	for field in &list.fields {
		if field.typ != FieldType::Password {
			continue;
		}
		if let Some(Value::String(password)) = fields.get(field.name) {
			let hash = crypto::generate_password_hash(password.as_str().into()).await?;
			fields.insert(field.name.into(), Value::String(hash.into()));
		}
	}
	Ok(())
}

pub async fn list_items(
	app: &App,
	auth: Option<&AuthCtx>,
	list: &ListDef,
	first: Option<u32>,
	skip: Option<u32>,
) -> ClResult<Vec<Item>> {
	let access = list_access(list, Operation::Read, auth)?;
	let opts = ListItemOptions { filter: access.filter().cloned(), first, skip };

	let items = app.meta_adapter.list_items(list.key, &opts).await?;
	Ok(items.into_iter().map(|item| strip_unreadable(list, auth, item)).collect())
}

pub async fn count_items(app: &App, auth: Option<&AuthCtx>, list: &ListDef) -> ClResult<u64> {
	let access = list_access(list, Operation::Read, auth)?;
	app.meta_adapter.count_items(list.key, access.filter()).await
}

pub async fn read_item(
	app: &App,
	auth: Option<&AuthCtx>,
	list: &ListDef,
	id: ItemId,
) -> ClResult<Item> {
	let access = list_access(list, Operation::Read, auth)?;
	let item = app
		.meta_adapter
		.read_item(list.key, id, access.filter())
		.await
		.map_err(|err| hide_not_found(err, list, Operation::Read, auth, id))?;

	Ok(strip_unreadable(list, auth, item))
}

pub async fn create_item(
	app: &App,
	auth: Option<&AuthCtx>,
	list: &ListDef,
	input: &Fields,
) -> ClResult<Item> {
	let access = list_access(list, Operation::Create, auth)?;
	let access = field_access(list, Operation::Create, auth, input, access)?;
	// There is no row yet a filter could match
	if access.filter().is_some() {
		return Err(deny(list, Operation::Create, auth, None));
	}

	let mut fields = validate::validate_input(list, input, Operation::Create)?;
	check_references(app, list, &fields).await?;
	validate::check_membership(list, &fields)?;
	hash_passwords(list, &mut fields).await?;

	let item = app.meta_adapter.create_item(list.key, &fields).await?;
	info!("{} {} created by {}", list.key, item.id, subject(auth));

	Ok(strip_unreadable(list, auth, item))
}

pub async fn update_item(
	app: &App,
	auth: Option<&AuthCtx>,
	list: &ListDef,
	id: ItemId,
	input: &Fields,
) -> ClResult<Item> {
	let access = list_access(list, Operation::Update, auth)?;
	let access = field_access(list, Operation::Update, auth, input, access)?;

	let mut fields = validate::validate_input(list, input, Operation::Update)?;
	let existing = app
		.meta_adapter
		.read_item(list.key, id, access.filter())
		.await
		.map_err(|err| hide_not_found(err, list, Operation::Update, auth, id))?;

	check_references(app, list, &fields).await?;
	hash_passwords(list, &mut fields).await?;
	let mut merged = existing.fields;
	merged.extend(fields);
	validate::check_membership(list, &merged)?;

	let item = app
		.meta_adapter
		.update_item(list.key, id, access.filter(), &merged)
		.await
		.map_err(|err| hide_not_found(err, list, Operation::Update, auth, id))?;
	info!("{} {} updated by {}", list.key, id, subject(auth));

	Ok(strip_unreadable(list, auth, item))
}

pub async fn delete_item(
	app: &App,
	auth: Option<&AuthCtx>,
	list: &ListDef,
	id: ItemId,
) -> ClResult<()> {
	let access = list_access(list, Operation::Delete, auth)?;
	app.meta_adapter
		.delete_item(list.key, id, access.filter())
		.await
		.map_err(|err| hide_not_found(err, list, Operation::Delete, auth, id))?;
	info!("{} {} deleted by {}", list.key, id, subject(auth));

	Ok(())
}

// vim: ts=4
