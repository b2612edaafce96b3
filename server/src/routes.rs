use axum::{
	Router, middleware,
	routing::{get, post},
};
use tower_http::compression::CompressionLayer;

use crate::prelude::*;
use crate::{admin, api, auth, webserver};
use quiz_core::middleware::{client_info, optional_auth, require_auth};

fn init_api(app: &App) -> Router<App> {
	Router::new()
		// Auth
		.route("/api/auth/login", post(auth::handler::post_login))
		.route("/api/auth/logout", post(auth::handler::post_logout))
		.route("/api/auth/me", get(auth::handler::get_me))
		// Lists
		.route("/api/{list}", get(api::handler::list_items).post(api::handler::post_item))
		.route("/api/{list}/meta", get(api::handler::get_meta))
		.route(
			"/api/{list}/{id}",
			get(api::handler::get_item).patch(api::handler::patch_item).delete(api::handler::delete_item),
		)
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth))
}

fn init_admin(app: &App) -> Router<App> {
	let protected_router = Router::new()
		.route("/admin/api/lists", get(admin::handler::get_lists))
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth));

	Router::new()
		.route("/admin/api/health", get(admin::handler::get_health))
		.merge(protected_router)
}

pub fn init(app: App) -> Router {
	Router::new()
		.merge(init_api(&app))
		.merge(init_admin(&app))
		.layer(CompressionLayer::new())
		.layer(middleware::from_fn(webserver::log_request))
		.layer(middleware::from_fn_with_state(app.clone(), client_info))
		.with_state(app)
}

// vim: ts=4
