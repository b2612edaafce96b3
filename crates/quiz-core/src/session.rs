//! Session tokens and the session cookie
//!
//! A session is an HS256 JWT carrying the user id, signed with the cookie
//! secret. Browsers get it in the `quiz.sid` cookie, API clients may send it
//! as a bearer token.

use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const SESSION_COOKIE: &str = "quiz.sid";
/// 30 days
pub const SESSION_MAX_AGE: i64 = 30 * 24 * 3600;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionClaims {
	pub sub: i64,
	pub exp: i64,
}

pub fn generate_session_token(user_id: ItemId, secret: &str) -> ClResult<Box<str>> {
	let claims = SessionClaims { sub: user_id.0, exp: Timestamp::from_now(SESSION_MAX_AGE).0 };

	let token = encode(
		&Header::new(Algorithm::HS256),
		&claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| Error::Internal(format!("session token: {}", err)))?;

	Ok(token.into())
}

/// Verify signature and expiry, returning the user id of the session
pub fn validate_session_token(token: &str, secret: &str) -> ClResult<ItemId> {
	let data = decode::<SessionClaims>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	Ok(ItemId(data.claims.sub))
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(token: &str) -> String {
	format!(
		"{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Strict",
		SESSION_COOKIE, token, SESSION_MAX_AGE
	)
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_session_cookie() -> String {
	format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Strict", SESSION_COOKIE)
}

fn token_from_cookies(headers: &HeaderMap) -> Option<&str> {
	headers
		.get_all(header::COOKIE)
		.iter()
		.filter_map(|h| h.to_str().ok())
		.flat_map(|h| h.split(';'))
		.filter_map(|c| c.trim().split_once('='))
		.find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
		.map(|(_, value)| value)
}

fn token_from_bearer(headers: &HeaderMap) -> Option<&str> {
	headers
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
}

/// Session token of a request: bearer header first, then the session cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
	token_from_bearer(headers).or_else(|| token_from_cookies(headers))
}


// vim: ts=4
