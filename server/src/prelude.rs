pub use quiz_core::prelude::*;

// vim: ts=4
