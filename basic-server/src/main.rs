use std::{env, process, sync::Arc};

use quiz::AppBuilder;
use quiz_meta_adapter_sqlite::MetaAdapterSqlite;

pub struct Config {
	pub database_url: String,
	pub cookie_secret: String,
	pub create_tables: bool,
	pub listen: String,
	pub trusted_proxy_hops: usize,
}

impl Config {
	fn from_env() -> Self {
		Config {
			database_url: env::var("DATABASE_URL").unwrap_or("sqlite://data/quiz.db".to_string()),
			cookie_secret: env::var("COOKIE_SECRET").unwrap_or_default(),
			create_tables: env::var("CREATE_TABLES").is_ok_and(|v| v == "true"),
			listen: env::var("LISTEN").unwrap_or("127.0.0.1:3000".to_string()),
			trusted_proxy_hops: env::var("TRUSTED_PROXY_HOPS")
				.ok()
				.and_then(|v| v.parse().ok())
				.unwrap_or(1),
		}
	}
}

#[tokio::main]
async fn main() {
	let config = Config::from_env();
	let mut builder = AppBuilder::new();

	let meta_adapter = match MetaAdapterSqlite::new(&config.database_url).await {
		Ok(adapter) => adapter,
		Err(err) => {
			tracing::error!("FATAL: cannot open database: {}", err);
			process::exit(1);
		}
	};

	builder
		.listen(config.listen)
		.cookie_secret(config.cookie_secret)
		.create_tables(config.create_tables)
		.trusted_proxy_hops(config.trusted_proxy_hops)
		.meta_adapter(Arc::new(meta_adapter));

	if let Err(err) = builder.run().await {
		tracing::error!("FATAL: {}", err);
		process::exit(1);
	}
}

// vim: ts=4
