use axum::{
	Json,
	extract::State,
	http::{StatusCode, header},
	response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::prelude::*;
use quiz_core::auth::USER_PASSWORD_AUTH;
use quiz_core::extract::{ClientInfo, OptionalAuth, OptionalRequestId};
use quiz_core::{engine, lists, session};
use quiz_types::auth::AuthCtx;
use quiz_types::types::{ApiResponse, Item};

/// Delay before answering a failed login
const LOGIN_FAILURE_DELAY: std::time::Duration = std::time::Duration::from_secs(1);

/// # Login
#[derive(Serialize)]
pub struct Login {
	#[serde(flatten)]
	user: AuthCtx,
	token: String,
}

/// # POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginReq {
	email: String,
	password: String,
}

pub async fn post_login(
	State(app): State<App>,
	client: ClientInfo,
	OptionalRequestId(req_id): OptionalRequestId,
	Json(login): Json<LoginReq>,
) -> ClResult<impl IntoResponse> {
	match USER_PASSWORD_AUTH.login(&app, &login.email, &login.password).await {
		Ok(auth) => {
			let cookie = session::session_cookie(&auth.token);
			let data = Login { user: auth.user, token: auth.token.to_string() };
			let response = ApiResponse::new(data).with_req_id(req_id.unwrap_or_default());
			Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
		}
		Err(Error::Unauthorized) => {
			warn!(
				"Login failed from {}",
				client.ip.map_or_else(|| "-".to_string(), |ip| ip.to_string())
			);
			tokio::time::sleep(LOGIN_FAILURE_DELAY).await;
			Err(Error::Unauthorized)
		}
		Err(err) => Err(err),
	}
}

/// # POST /api/auth/logout
pub async fn post_logout(
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> impl IntoResponse {
	if let Some(auth) = auth {
		info!("User {} logged out", auth.user_id);
	}
	let response = ApiResponse::new(()).with_req_id(req_id.unwrap_or_default());

	(StatusCode::OK, [(header::SET_COOKIE, session::clear_session_cookie())], Json(response))
}

/// # GET /api/auth/me
///
/// The authenticated user as the user may read it, or null
pub async fn get_me(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	OptionalRequestId(req_id): OptionalRequestId,
) -> ClResult<(StatusCode, Json<ApiResponse<Option<Item>>>)> {
	let user = match &auth {
		Some(auth) => {
			let list = app
				.lists
				.get(lists::USER)
				.ok_or_else(|| Error::ConfigError("User list is not declared".into()))?;
			Some(engine::read_item(&app, Some(auth), list, auth.user_id).await?)
		}
		None => None,
	};

	let response = ApiResponse::new(user).with_req_id(req_id.unwrap_or_default());
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
