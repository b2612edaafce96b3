//! Authenticated actor.

use serde::Serialize;

use crate::types::{Item, ItemId};

/// The authenticated identity associated with a request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuthCtx {
	#[serde(rename = "id")]
	pub user_id: ItemId,
	pub name: Box<str>,
	pub email: Box<str>,
	#[serde(rename = "isAdmin")]
	pub is_admin: bool,
}

impl AuthCtx {
	/// Build the actor from a stored User row
	pub fn from_user(item: &Item) -> Self {
		Self {
			user_id: item.id,
			name: item.get_str("name").unwrap_or_default().into(),
			email: item.get_str("email").unwrap_or_default().into(),
			is_admin: item.get_bool("isAdmin"),
		}
	}
}

// vim: ts=4
