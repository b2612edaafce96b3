//! Access predicates
//!
//! Pure functions of the request's actor. They never answer with a bare
//! boolean: see `quiz_types::access::Access`.

use quiz_types::access::{Access, RowFilter};
use quiz_types::auth::AuthCtx;
use quiz_types::schema::Gate;

/// `Unrestricted` iff an actor exists and is flagged as admin
pub fn is_admin(ctx: Option<&AuthCtx>) -> Access {
	match ctx {
		Some(auth) if auth.is_admin => Access::Unrestricted,
		_ => Access::Denied,
	}
}

/// Restricts to the actor's own row
pub fn owns_item(ctx: Option<&AuthCtx>) -> Access {
	match ctx {
		Some(auth) => Access::RestrictedTo(RowFilter::Id(auth.user_id)),
		None => Access::Denied,
	}
}

/// Admins are unrestricted, everybody else is narrowed to their own row
pub fn is_admin_or_owner(ctx: Option<&AuthCtx>) -> Access {
	match is_admin(ctx) {
		Access::Unrestricted => Access::Unrestricted,
		_ => owns_item(ctx),
	}
}

pub fn evaluate(gate: Gate, ctx: Option<&AuthCtx>) -> Access {
	match gate {
		Gate::Always => Access::Unrestricted,
		Gate::Never => Access::Denied,
		Gate::Admin => is_admin(ctx),
		Gate::AdminOrOwner => is_admin_or_owner(ctx),
	}
}

/// Short label of an access result, as shown to admin clients
pub fn describe(access: &Access) -> &'static str {
	match access {
		Access::Denied => "none",
		Access::Unrestricted => "all",
		Access::RestrictedTo(_) => "own",
	}
}


// vim: ts=4
