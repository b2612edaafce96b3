//! Initial data seeding
//!
//! Runs once between connecting storage and serving requests. A persistent
//! marker keeps it from ever running twice against the same database.

use serde_json::Value;

use crate::prelude::*;
use crate::{crypto, lists, validate};
use quiz_types::schema::Operation;
use quiz_types::types::Fields;

pub const SEEDED_KEY: &str = "seeded";
pub const ADMIN_NAME: &str = "Admin";
pub const ADMIN_EMAIL: &str = "admin@example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
	/// Seeding disabled by configuration
	Disabled,
	/// The marker was already set
	AlreadySeeded,
	/// Users existed, nothing created
	UsersExist,
	/// The initial admin was created
	Created(ItemId),
}

async fn create_admin(app: &App) -> ClResult<ItemId> {
	let list = app
		.lists
		.get(lists::USER)
		.ok_or_else(|| Error::ConfigError("User list is not declared".into()))?;
	let password = crypto::random_password();

	let mut input = Fields::new();
	input.insert("name".into(), Value::from(ADMIN_NAME));
	input.insert("email".into(), Value::from(ADMIN_EMAIL));
	input.insert("isAdmin".into(), Value::Bool(true));
	input.insert("password".into(), Value::from(password.as_str()));

	let mut fields = validate::validate_input(list, &input, Operation::Create)?;
	let hash = crypto::generate_password_hash(password.as_str().into()).await?;
	fields.insert("password".into(), Value::from(hash.as_ref()));

	let user = app.meta_adapter.create_item(list.key, &fields).await?;
	warn!("Initial admin created: {} / {}", ADMIN_EMAIL, password);
	warn!("Change this password after the first login");

	Ok(user.id)
}

pub async fn seed(app: &App) -> ClResult<SeedOutcome> {
	if app.opts.create_tables {
		info!("CREATE_TABLES is set, skipping initial data");
		return Ok(SeedOutcome::Disabled);
	}
	if app.meta_adapter.read_global(SEEDED_KEY).await?.is_some() {
		debug!("initial data already seeded");
		return Ok(SeedOutcome::AlreadySeeded);
	}

	let outcome = if app.meta_adapter.count_items(lists::USER, None).await? > 0 {
		info!("users exist, no initial admin needed");
		SeedOutcome::UsersExist
	} else {
		SeedOutcome::Created(create_admin(app).await?)
	};

	app.meta_adapter.update_global(SEEDED_KEY, &Timestamp::now().to_string()).await?;
	Ok(outcome)
}

// vim: ts=4
