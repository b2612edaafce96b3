//! Custom middlewares

use axum::{
	body::Body,
	extract::{ConnectInfo, State},
	http::{Request, response::Response},
	middleware::Next,
};
use std::net::SocketAddr;

use crate::auth::USER_PASSWORD_AUTH;
use crate::extract::{Auth, RequestId};
use crate::prelude::*;
use crate::{crypto, proxy, session};

/// Attach a request id and the client address derived through the trusted
/// proxies
pub async fn client_info(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> Response<Body> {
	let peer = req.extensions().get::<ConnectInfo<SocketAddr>>().map(|ci| ci.0.ip());
	let info = proxy::client_info(peer, req.headers(), app.opts.trusted_proxy_hops);
	req.extensions_mut().insert(info);
	req.extensions_mut().insert(RequestId(crypto::random_id()));

	next.run(req).await
}

async fn resolve_auth(app: &App, token: Option<String>) -> ClResult<Option<Auth>> {
	let Some(token) = token else {
		return Ok(None);
	};
	match USER_PASSWORD_AUTH.resolve_session(app, &token).await {
		Ok(Some(auth)) => Ok(Some(Auth(auth))),
		Ok(None) => {
			debug!("session of a deleted user");
			Ok(None)
		}
		Err(Error::Unauthorized) => {
			debug!("invalid session token");
			Ok(None)
		}
		Err(err) => Err(err),
	}
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	let token = session::token_from_headers(req.headers()).map(str::to_owned);
	let auth = resolve_auth(&app, token).await?.ok_or(Error::Unauthorized)?;
	req.extensions_mut().insert(auth);

	Ok(next.run(req).await)
}

pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	let token = session::token_from_headers(req.headers()).map(str::to_owned);
	if let Some(auth) = resolve_auth(&app, token).await? {
		req.extensions_mut().insert(auth);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
