//! Adapter that stores list items and process-wide markers.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
	access::RowFilter,
	prelude::*,
	schema::ListDef,
	types::{Fields, Item},
};

pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Default)]
pub struct ListItemOptions {
	/// Restrict to rows matching the filter
	pub filter: Option<RowFilter>,
	/// Page size
	pub first: Option<u32>,
	/// Number of rows to skip
	pub skip: Option<u32>,
}

impl ListItemOptions {
	pub fn limit(&self) -> u32 {
		self.first.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
	}
}

#[async_trait]
pub trait MetaAdapter: Debug + Send + Sync {
	/// Set up storage-level constraints (unique fields) for a list.
	/// Must be idempotent.
	async fn prepare_list(&self, list: &ListDef) -> ClResult<()>;

	/// List items ordered by id
	async fn list_items(&self, list: &str, opts: &ListItemOptions) -> ClResult<Vec<Item>>;

	async fn count_items(&self, list: &str, filter: Option<&RowFilter>) -> ClResult<u64>;

	/// Read one item. Returns `Error::NotFound` if the item does not exist or
	/// does not match the filter.
	async fn read_item(&self, list: &str, id: ItemId, filter: Option<&RowFilter>)
	-> ClResult<Item>;

	/// Find the first item whose string field equals `value`
	async fn find_item_by_field(
		&self,
		list: &str,
		field: &str,
		value: &str,
	) -> ClResult<Option<Item>>;

	/// Return the subset of `ids` that exist in `list`
	async fn existing_ids(&self, list: &str, ids: &[ItemId]) -> ClResult<Vec<ItemId>>;

	/// Insert an item. A unique constraint violation yields `Error::Conflict`.
	async fn create_item(&self, list: &str, fields: &Fields) -> ClResult<Item>;

	/// Replace the fields of an item. Returns `Error::NotFound` if the item
	/// does not exist or does not match the filter.
	async fn update_item(
		&self,
		list: &str,
		id: ItemId,
		filter: Option<&RowFilter>,
		fields: &Fields,
	) -> ClResult<Item>;

	/// Delete an item. Returns `Error::NotFound` if the item does not exist
	/// or does not match the filter.
	async fn delete_item(&self, list: &str, id: ItemId, filter: Option<&RowFilter>)
	-> ClResult<()>;

	// Globals
	//*********
	async fn read_global(&self, key: &str) -> ClResult<Option<Box<str>>>;
	async fn update_global(&self, key: &str, value: &str) -> ClResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_page_size_is_capped() {
		let opts = ListItemOptions { first: Some(5000), ..Default::default() };
		assert_eq!(opts.limit(), MAX_PAGE_SIZE);
		assert_eq!(ListItemOptions::default().limit(), DEFAULT_PAGE_SIZE);
	}
}

// vim: ts=4
