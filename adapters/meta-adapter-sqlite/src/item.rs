//! List item storage

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use quiz::access::RowFilter;
use quiz::meta_adapter::ListItemOptions;
use quiz::prelude::*;
use quiz::types::{Fields, Item};

fn encode_fields(fields: &Fields) -> ClResult<String> {
	serde_json::to_string(fields).map_err(|err| Error::Internal(format!("encode item: {}", err)))
}

/// List items of a list, ordered by id
pub(crate) async fn list(
	db: &SqlitePool,
	list: &str,
	opts: &ListItemOptions,
) -> ClResult<Vec<Item>> {
	let mut query = sqlx::QueryBuilder::new("SELECT id, data FROM items WHERE list=");
	query.push_bind(list);
	if let Some(filter) = &opts.filter {
		push_filter(&mut query, filter);
	}
	query
		.push(" ORDER BY id LIMIT ")
		.push_bind(i64::from(opts.limit()))
		.push(" OFFSET ")
		.push_bind(i64::from(opts.skip.unwrap_or(0)));

	let res =
		query.build().fetch_all(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	collect_res(res.iter().map(row_to_item))
}

pub(crate) async fn count(
	db: &SqlitePool,
	list: &str,
	filter: Option<&RowFilter>,
) -> ClResult<u64> {
	let mut query = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM items WHERE list=");
	query.push_bind(list);
	if let Some(filter) = filter {
		push_filter(&mut query, filter);
	}

	let count: i64 = query
		.build_query_scalar()
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(u64::try_from(count).unwrap_or_default())
}

pub(crate) async fn read(
	db: &SqlitePool,
	list: &str,
	id: ItemId,
	filter: Option<&RowFilter>,
) -> ClResult<Item> {
	let mut query = sqlx::QueryBuilder::new("SELECT id, data FROM items WHERE list=");
	query.push_bind(list).push(" AND id=").push_bind(id.0);
	if let Some(filter) = filter {
		push_filter(&mut query, filter);
	}

	let res = query.build().fetch_one(db).await;
	map_res(res, |row| row_to_item(&row))
}

pub(crate) async fn find_by_field(
	db: &SqlitePool,
	list: &str,
	field: &str,
	value: &str,
) -> ClResult<Option<Item>> {
	let path = format!("$.\"{}\"", field);
	let res = sqlx::query(
		"SELECT id, data FROM items WHERE list=? AND json_extract(data, ?)=? ORDER BY id LIMIT 1",
	)
	.bind(list)
	.bind(path)
	.bind(value)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	res.map(|row| row_to_item(&row)).transpose().inspect_err(inspect).map_err(|_| Error::DbError)
}

pub(crate) async fn existing_ids(
	db: &SqlitePool,
	list: &str,
	ids: &[ItemId],
) -> ClResult<Vec<ItemId>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut query = sqlx::QueryBuilder::new("SELECT id FROM items WHERE list=");
	query.push_bind(list).push(" AND id IN (");
	let mut separated = query.separated(", ");
	for id in ids {
		separated.push_bind(id.0);
	}
	separated.push_unseparated(")");

	let res: Vec<i64> = query
		.build_query_scalar()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.into_iter().map(ItemId).collect())
}

pub(crate) async fn create(db: &SqlitePool, list: &str, fields: &Fields) -> ClResult<Item> {
	let data = encode_fields(fields)?;
	let row = sqlx::query("INSERT INTO items (list, data) VALUES (?, ?) RETURNING id")
		.bind(list)
		.bind(&data)
		.fetch_one(db)
		.await
		.map_err(map_write_err)?;
	let id: i64 = row.try_get("id").inspect_err(inspect).map_err(|_| Error::DbError)?;

	info!("created {} item {}", list, id);
	Ok(Item { id: ItemId(id), fields: fields.clone() })
}

pub(crate) async fn update(
	db: &SqlitePool,
	list: &str,
	id: ItemId,
	filter: Option<&RowFilter>,
	fields: &Fields,
) -> ClResult<Item> {
	let data = encode_fields(fields)?;
	let mut query = sqlx::QueryBuilder::new("UPDATE items SET data=");
	query
		.push_bind(data)
		.push(", updated_at=unixepoch() WHERE list=")
		.push_bind(list)
		.push(" AND id=")
		.push_bind(id.0);
	if let Some(filter) = filter {
		push_filter(&mut query, filter);
	}
	query.push(" RETURNING id, data");

	let res = query.build().fetch_optional(db).await.map_err(map_write_err)?;
	match res {
		Some(row) => row_to_item(&row).inspect_err(inspect).map_err(|_| Error::DbError),
		None => Err(Error::NotFound),
	}
}

pub(crate) async fn delete(
	db: &SqlitePool,
	list: &str,
	id: ItemId,
	filter: Option<&RowFilter>,
) -> ClResult<()> {
	let mut query = sqlx::QueryBuilder::new("DELETE FROM items WHERE list=");
	query.push_bind(list).push(" AND id=").push_bind(id.0);
	if let Some(filter) = filter {
		push_filter(&mut query, filter);
	}

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	info!("deleted {} item {}", list, id);
	Ok(())
}

// vim: ts=4
