//! Process-wide key/value markers

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quiz::prelude::*;

pub(crate) async fn read(db: &SqlitePool, key: &str) -> ClResult<Option<Box<str>>> {
	let res = sqlx::query("SELECT value FROM globals WHERE key=?")
		.bind(key)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	match res {
		Some(row) => {
			let value: Option<String> =
				row.try_get("value").inspect_err(inspect).map_err(|_| Error::DbError)?;
			Ok(value.map(String::into_boxed_str))
		}
		None => Ok(None),
	}
}

pub(crate) async fn update(db: &SqlitePool, key: &str, value: &str) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO globals (key, value) VALUES (?, ?)
		ON CONFLICT(key) DO UPDATE SET value=excluded.value",
	)
	.bind(key)
	.bind(value)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
