//! Core of the quiz backend.
//!
//! Access predicates, the list declarations, the CRUD engine that enforces
//! gates before touching storage, the password strategy with its session
//! tokens, and the request extractors and middleware built on them.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod app;
pub mod auth;
pub mod crypto;
pub mod engine;
pub mod extract;
pub mod lists;
pub mod middleware;
pub mod prelude;
pub mod proxy;
pub mod seed;
pub mod session;
pub mod validate;

pub use app::{App, AppBuilderOpts, AppState};
pub use extract::{Auth, ClientInfo, OptionalAuth, OptionalRequestId};

// vim: ts=4
