//! App builder - constructs and runs the quiz application

use std::sync::Arc;

use crate::prelude::*;
use crate::{routes, webserver};
pub use quiz_core::app::{App, AppBuilderOpts, AppState, PROJECT_NAME, VERSION};
use quiz_core::lists::ListRegistry;
use quiz_core::seed;
use quiz_types::meta_adapter::MetaAdapter;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	lists: ListRegistry,
	meta_adapter: Option<Arc<dyn MetaAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Tests build several apps in one process, only the first one installs
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts::default(),
			lists: ListRegistry::default(),
			meta_adapter: None,
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}

	pub fn cookie_secret(&mut self, cookie_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.cookie_secret = cookie_secret.into();
		self
	}

	pub fn trusted_proxy_hops(&mut self, hops: usize) -> &mut Self {
		self.opts.trusted_proxy_hops = hops;
		self
	}

	pub fn create_tables(&mut self, create_tables: bool) -> &mut Self {
		self.opts.create_tables = create_tables;
		self
	}

	// Adapters
	pub fn meta_adapter(&mut self, meta_adapter: Arc<dyn MetaAdapter>) -> &mut Self {
		self.meta_adapter = Some(meta_adapter);
		self
	}

	/// Build the app state, prepare storage and seed initial data
	pub async fn build(self) -> ClResult<App> {
		if self.opts.cookie_secret.is_empty() {
			error!("FATAL: No cookie secret configured");
			return Err(Error::ConfigError("COOKIE_SECRET is required".into()));
		}
		let Some(meta_adapter) = self.meta_adapter else {
			error!("FATAL: No meta adapter configured");
			return Err(Error::ConfigError("No meta adapter configured".into()));
		};

		for list in self.lists.iter() {
			meta_adapter.prepare_list(list).await?;
		}
		info!("Prepared {} lists", self.lists.len());

		let app: App = Arc::new(AppState { opts: self.opts, lists: self.lists, meta_adapter });

		let outcome = seed::seed(&app).await.map_err(|err| {
			error!("FATAL: Seeding failed: {}", err);
			err
		})?;
		debug!("seed: {:?}", outcome);

		Ok(app)
	}

	pub async fn run(self) -> ClResult<()> {
		info!("   ____        _");
		info!("  / __ \\__  __(_)___");
		info!(" / / / / / / / /_  /");
		info!("/ /_/ / /_/ / / / /_");
		info!("\\___\\_\\__,_/_/ /___/");
		info!("V{}", VERSION);
		info!("");

		let app = self.build().await?;
		let router = routes::init(app.clone());

		webserver::serve(&app, router).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
