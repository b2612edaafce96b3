//! Common test utilities and helpers
//!
//! This module contains shared testing infrastructure used across all integration tests.
//! It includes the test server builder, request helpers and fixtures.

#![allow(dead_code)]

pub mod adapters;
pub mod fixtures;

pub use adapters::*;

// vim: ts=4
