//! Database schema initialization
//!
//! Items of every list live in one `items` table as JSON documents. Item ids
//! come from a single AUTOINCREMENT sequence, so they are unique across lists.

use sqlx::SqlitePool;

use quiz::prelude::*;
use quiz::schema::ListDef;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS globals (
			key text NOT NULL,
			value text,
			PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Items
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS items (
		id integer PRIMARY KEY AUTOINCREMENT,
		list text NOT NULL,
		data json NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_list ON items(list, id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

/// Name of the unique index backing `list.field`
pub(crate) fn unique_index_name(list: &str, field: &str) -> String {
	format!("idx_unique_{}_{}", list, field)
}

fn is_identifier(s: &str) -> bool {
	!s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Create the partial unique indexes for every unique field of a list
pub(crate) async fn prepare_list(db: &SqlitePool, list: &ListDef) -> ClResult<()> {
	if !is_identifier(list.key) {
		return Err(Error::ConfigError(format!("invalid list name: {}", list.key)));
	}

	for field in list.unique_fields() {
		// Identifiers are interpolated into DDL, bind parameters are not allowed there
		if !is_identifier(field.name) {
			return Err(Error::ConfigError(format!(
				"invalid field name: {}.{}",
				list.key, field.name
			)));
		}
		let sql = format!(
			"CREATE UNIQUE INDEX IF NOT EXISTS {} ON items(json_extract(data, '$.{}')) WHERE list='{}'",
			unique_index_name(list.key, field.name),
			field.name,
			list.key
		);
		sqlx::query(&sql).execute(db).await.map_err(|err| {
			warn!("DB: {:#?}", err);
			Error::DbError
		})?;
		debug!("unique index ready: {}.{}", list.key, field.name);
	}

	Ok(())
}


// vim: ts=4
