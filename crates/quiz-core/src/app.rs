//! App state type

use std::sync::Arc;

use crate::lists::ListRegistry;
use quiz_types::meta_adapter::MetaAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROJECT_NAME: &str = "quiz";

pub struct AppState {
	pub opts: AppBuilderOpts,
	pub lists: ListRegistry,

	pub meta_adapter: Arc<dyn MetaAdapter>,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Session signing key
	pub cookie_secret: Box<str>,
	/// Number of reverse proxies in front of the server
	pub trusted_proxy_hops: usize,
	/// Skip initial data seeding
	pub create_tables: bool,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self {
			listen: "127.0.0.1:3000".into(),
			cookie_secret: "".into(),
			trusted_proxy_hops: 1,
			create_tables: false,
		}
	}
}

// vim: ts=4
