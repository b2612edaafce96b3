//! Password authentication strategy
//!
//! Binds credential login to a list: one field identifies the user, another
//! holds the bcrypt hash of the secret.

use crate::prelude::*;
use crate::{crypto, lists, session};
use quiz_types::auth::AuthCtx;

#[derive(Debug, Clone, Copy)]
pub struct PasswordAuth {
	pub list: &'static str,
	pub identity_field: &'static str,
	pub secret_field: &'static str,
}

/// Email/password login against the User list
pub const USER_PASSWORD_AUTH: PasswordAuth =
	PasswordAuth { list: lists::USER, identity_field: "email", secret_field: "password" };

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct AuthLogin {
	pub user: AuthCtx,
	pub token: Box<str>,
}

impl PasswordAuth {
	/// Verify credentials. Unknown identity and wrong secret are both
	/// reported as `Unauthorized` after a bcrypt check of the same cost.
	pub async fn authenticate(&self, app: &App, identity: &str, secret: &str) -> ClResult<AuthCtx> {
		let Some(user) =
			app.meta_adapter.find_item_by_field(self.list, self.identity_field, identity).await?
		else {
			debug!("login: unknown identity");
			return Err(crypto::check_password_dummy(secret.into()).await);
		};
		let Some(hash) = user.get_str(self.secret_field) else {
			debug!("login: user {} has no password", user.id);
			return Err(crypto::check_password_dummy(secret.into()).await);
		};

		crypto::check_password(secret.into(), hash.into()).await?;
		Ok(AuthCtx::from_user(&user))
	}

	/// Authenticate and issue a session token
	pub async fn login(&self, app: &App, identity: &str, secret: &str) -> ClResult<AuthLogin> {
		let user = self.authenticate(app, identity, secret).await?;
		let token = session::generate_session_token(user.user_id, &app.opts.cookie_secret)?;
		info!("login: user {}", user.user_id);

		Ok(AuthLogin { user, token })
	}

	/// Resolve a session token to the current state of its user. A token of a
	/// deleted user resolves to `None`.
	pub async fn resolve_session(&self, app: &App, token: &str) -> ClResult<Option<AuthCtx>> {
		let user_id = session::validate_session_token(token, &app.opts.cookie_secret)?;
		match app.meta_adapter.read_item(self.list, user_id, None).await {
			Ok(user) => Ok(Some(AuthCtx::from_user(&user))),
			Err(Error::NotFound) => Ok(None),
			Err(err) => Err(err),
		}
	}
}

// vim: ts=4
