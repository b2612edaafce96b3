//! Web server and request logging

use axum::{Router, body::Body, extract::Request, http::Response, middleware::Next};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::prelude::*;
use quiz_core::extract::ClientInfo;

/// Log every request and its outcome
pub async fn log_request(req: Request, next: Next) -> Response<Body> {
	let start = std::time::Instant::now();
	let client = req
		.extensions()
		.get::<ClientInfo>()
		.and_then(|ci| ci.ip)
		.map_or_else(|| "-".to_string(), |ip| ip.to_string());
	info!("REQ [{}] {} {}", client, req.method(), req.uri().path());

	let res = next.run(req).await;

	let status = res.status();
	if status.is_client_error() || status.is_server_error() {
		warn!("RES: {} tm:{}", status, start.elapsed().as_millis());
	} else {
		info!("RES: {} tm:{}", status, start.elapsed().as_millis());
	}
	res
}

pub async fn serve(app: &App, router: Router) -> ClResult<()> {
	let listener = TcpListener::bind(app.opts.listen.as_ref()).await.map_err(|err| {
		error!("FATAL: Cannot listen on {}: {}", app.opts.listen, err);
		Error::ConfigError(format!("cannot listen on {}: {}", app.opts.listen, err))
	})?;
	info!("Listening on HTTP {}", app.opts.listen);

	axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
		.await
		.map_err(|err| Error::Internal(format!("server: {}", err)))
}

// vim: ts=4
