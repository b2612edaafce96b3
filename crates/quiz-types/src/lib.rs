//! Shared types, schema model, and adapter traits for the quiz backend.
//!
//! This crate holds everything the storage adapters and the server agree on:
//! the error type, item and identifier types, the tagged access result, the
//! list/field schema model, and the `MetaAdapter` trait. Keeping it separate
//! lets adapter crates compile without pulling in the HTTP stack.

pub mod access;
pub mod auth;
pub mod error;
pub mod meta_adapter;
pub mod prelude;
pub mod schema;
pub mod types;

// vim: ts=4
