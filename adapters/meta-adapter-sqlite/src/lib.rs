//! SQLite implementation of the quiz `MetaAdapter`
//!
//! Items are stored as JSON documents in a shared `items` table, partitioned
//! by list name. Unique fields are enforced with partial expression indexes.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

mod global;
mod item;
mod schema;
mod utils;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{path::Path, str::FromStr};

use quiz::{
	access::RowFilter,
	meta_adapter::{ListItemOptions, MetaAdapter},
	prelude::*,
	schema::ListDef,
	types::{Fields, Item},
};

#[derive(Debug)]
pub struct MetaAdapterSqlite {
	db: SqlitePool,
}

impl MetaAdapterSqlite {
	/// Connect to a database URL such as `sqlite://data/quiz.db`, creating the
	/// file and its directory if missing
	pub async fn new(database_url: &str) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::from_str(database_url)
			.map_err(|err| Error::ConfigError(format!("invalid DATABASE_URL: {}", err)))?
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);

		if let Some(dir) = opts.get_filename().parent()
			&& !dir.as_os_str().is_empty()
		{
			tokio::fs::create_dir_all(dir).await.map_err(|err| {
				Error::ConfigError(format!("cannot create {}: {}", dir.display(), err))
			})?;
		}

		Self::connect(opts).await
	}

	/// Open (or create) `quiz.db` inside a directory
	pub async fn open(dir: impl AsRef<Path>) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(dir.as_ref().join("quiz.db"))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);

		Self::connect(opts).await
	}

	async fn connect(opts: sqlite::SqliteConnectOptions) -> ClResult<Self> {
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		Ok(Self { db })
	}
}

#[async_trait]
impl MetaAdapter for MetaAdapterSqlite {
	async fn prepare_list(&self, list: &ListDef) -> ClResult<()> {
		schema::prepare_list(&self.db, list).await
	}

	// Items
	//*******
	async fn list_items(&self, list: &str, opts: &ListItemOptions) -> ClResult<Vec<Item>> {
		item::list(&self.db, list, opts).await
	}

	async fn count_items(&self, list: &str, filter: Option<&RowFilter>) -> ClResult<u64> {
		item::count(&self.db, list, filter).await
	}

	async fn read_item(
		&self,
		list: &str,
		id: ItemId,
		filter: Option<&RowFilter>,
	) -> ClResult<Item> {
		item::read(&self.db, list, id, filter).await
	}

	async fn find_item_by_field(
		&self,
		list: &str,
		field: &str,
		value: &str,
	) -> ClResult<Option<Item>> {
		item::find_by_field(&self.db, list, field, value).await
	}

	async fn existing_ids(&self, list: &str, ids: &[ItemId]) -> ClResult<Vec<ItemId>> {
		item::existing_ids(&self.db, list, ids).await
	}

	async fn create_item(&self, list: &str, fields: &Fields) -> ClResult<Item> {
		item::create(&self.db, list, fields).await
	}

	async fn update_item(
		&self,
		list: &str,
		id: ItemId,
		filter: Option<&RowFilter>,
		fields: &Fields,
	) -> ClResult<Item> {
		item::update(&self.db, list, id, filter, fields).await
	}

	async fn delete_item(
		&self,
		list: &str,
		id: ItemId,
		filter: Option<&RowFilter>,
	) -> ClResult<()> {
		item::delete(&self.db, list, id, filter).await
	}

	// Globals
	//*********
	async fn read_global(&self, key: &str) -> ClResult<Option<Box<str>>> {
		global::read(&self.db, key).await
	}

	async fn update_global(&self, key: &str, value: &str) -> ClResult<()> {
		global::update(&self.db, key, value).await
	}
}

// vim: ts=4
