//! Login, logout and session introspection

pub mod handler;

// vim: ts=4
