//! Shared utilities for SQLite adapter
//!
//! Helper functions and error mapping used across the domain modules.

use quiz::access::RowFilter;
use quiz::prelude::*;
use quiz::types::{Fields, Item};
use sqlx::{Row, sqlite::SqliteRow};

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to ClResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Map an error of an INSERT/UPDATE, turning unique index violations into
/// `Error::Conflict`
pub(crate) fn map_write_err(err: sqlx::Error) -> Error {
	match &err {
		sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
			let field = unique_field_from_message(db_err.message());
			debug!("unique violation: {}", db_err.message());
			Error::Conflict(match field {
				Some(field) => format!("{} must be unique", field),
				None => "value must be unique".to_string(),
			})
		}
		sqlx::Error::RowNotFound => Error::NotFound,
		_ => {
			inspect(&err);
			Error::DbError
		}
	}
}

/// Extract "List.field" from a SQLite unique violation message naming one of
/// our `idx_unique_<list>_<field>` indexes
pub(crate) fn unique_field_from_message(message: &str) -> Option<String> {
	let rest = &message[message.find("idx_unique_")? + "idx_unique_".len()..];
	let name: String =
		rest.chars().take_while(|c| c.is_ascii_alphanumeric() || *c == '_').collect();
	let (list, field) = name.split_once('_')?;
	Some(format!("{}.{}", list, field))
}

/// Append the SQL form of a row filter (each condition prefixed by AND)
pub(crate) fn push_filter(query: &mut sqlx::QueryBuilder<'_, sqlx::Sqlite>, filter: &RowFilter) {
	match filter {
		RowFilter::Id(id) => {
			query.push(" AND id=").push_bind(id.0);
		}
		RowFilter::All(filters) => {
			for filter in filters {
				push_filter(query, filter);
			}
		}
	}
}

/// Decode an `id, data` row into an item
pub(crate) fn row_to_item(row: &SqliteRow) -> Result<Item, sqlx::Error> {
	let id: i64 = row.try_get("id")?;
	let data: String = row.try_get("data")?;
	let fields: Fields =
		serde_json::from_str(&data).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
	Ok(Item { id: ItemId(id), fields })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unique_field_from_message() {
		assert_eq!(
			unique_field_from_message("UNIQUE constraint failed: index 'idx_unique_User_email'"),
			Some("User.email".to_string())
		);
		assert_eq!(unique_field_from_message("UNIQUE constraint failed: items.id"), None);
	}

	#[test]
	fn test_push_filter_sql() {
		let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new("SELECT id FROM items WHERE 1");
		push_filter(
			&mut query,
			&RowFilter::All(vec![RowFilter::Id(ItemId(1)), RowFilter::Id(ItemId(2))]),
		);
		assert_eq!(query.sql(), "SELECT id FROM items WHERE 1 AND id=? AND id=?");
	}
}

// vim: ts=4
