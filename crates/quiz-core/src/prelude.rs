pub use crate::app::App;
pub use quiz_types::prelude::*;

// vim: ts=4
