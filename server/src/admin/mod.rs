//! Admin API handlers

pub mod handler;

// vim: ts=4
