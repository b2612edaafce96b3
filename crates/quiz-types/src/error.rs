//! Error type shared by every crate in the workspace.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Item does not exist. Never leaves the CRUD engine, which folds it into
	/// `PermissionDenied` so existence is not leaked.
	NotFound,
	PermissionDenied,
	/// Authentication failed (bad credentials, invalid session)
	Unauthorized,
	ValidationError(String),
	/// Storage-level constraint violation (unique index)
	Conflict(String),
	DbError,
	ConfigError(String),
	Internal(String),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "access denied"),
			Error::Unauthorized => write!(f, "authentication failed"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
	error: ErrorBody,
}

impl Error {
	/// Stable machine-readable code for API clients
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOTFOUND",
			Error::PermissionDenied => "E-ACCESS",
			Error::Unauthorized => "E-AUTH",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::Conflict(_) => "E-CONFLICT",
			Error::DbError => "E-DB",
			Error::ConfigError(_) => "E-CONFIG",
			Error::Internal(_) => "E-INTERNAL",
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		// Internal details stay in the logs
		let message = match &self {
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) => {
				tracing::error!("{}", self);
				"internal server error".to_string()
			}
			_ => self.to_string(),
		};
		let body = ErrorResponse { error: ErrorBody { code: self.code(), message } };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
