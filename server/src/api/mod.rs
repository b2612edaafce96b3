//! Generated list API

pub mod handler;

// vim: ts=4
