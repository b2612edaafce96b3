//! Quiz is a content backend for quiz applications.
//!
//! # Features
//!
//! - Users, answers, questions, feedback and quizzes
//! - Access control per list and per field
//!     - admin-only and admin-or-owner gates
//!     - never-readable password field
//! - Email/password login with signed session cookies
//! - JSON API generated from the list declarations
//! - Admin API describing lists and the caller's access
//! - Reverse-proxy-aware client address derivation

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from quiz-types
pub use quiz_types::access;
pub use quiz_types::error;
pub use quiz_types::meta_adapter;
pub use quiz_types::schema;
pub use quiz_types::types;

// Local modules
pub mod admin;
pub mod api;
pub mod app;
pub mod auth;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
