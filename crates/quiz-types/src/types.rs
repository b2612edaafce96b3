//! Common types used throughout the quiz backend.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::time::SystemTime;

// ItemId //
//********//
/// Storage-assigned item identifier. Unique across all lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<i64> for ItemId {
	fn from(id: i64) -> Self {
		ItemId(id)
	}
}

// Timestamp //
//***********//
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		let res = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
		Timestamp(i64::try_from(res.as_secs()).unwrap_or(i64::MAX))
	}

	pub fn from_now(secs: i64) -> Timestamp {
		Timestamp(Timestamp::now().0.saturating_add(secs))
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// Item //
//******//
/// Field values of an item keyed by field name
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// One row of a list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
	pub id: ItemId,
	#[serde(flatten)]
	pub fields: Fields,
}

impl Item {
	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.fields.get(field).and_then(serde_json::Value::as_str)
	}

	pub fn get_bool(&self, field: &str) -> bool {
		self.fields.get(field).and_then(serde_json::Value::as_bool).unwrap_or(false)
	}

	/// Identifiers held by a relationship field (single or many)
	pub fn get_refs(&self, field: &str) -> Vec<ItemId> {
		self.fields.get(field).map(value_refs).unwrap_or_default()
	}
}

/// Ids held by a relationship value (single id or array of ids)
pub fn value_refs(value: &serde_json::Value) -> Vec<ItemId> {
	match value {
		serde_json::Value::Number(n) => n.as_i64().map(ItemId).into_iter().collect(),
		serde_json::Value::Array(values) => {
			values.iter().filter_map(serde_json::Value::as_i64).map(ItemId).collect()
		}
		_ => Vec::new(),
	}
}

// ApiResponse //
//*************//
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
	pub data: T,
	#[serde(rename = "reqId")]
	pub req_id: Option<String>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, req_id: None }
	}

	pub fn with_req_id(mut self, req_id: String) -> Self {
		self.req_id = Some(req_id);
		self
	}
}


// vim: ts=4
