//! User configuration schema: raw (as parsed) and validated forms, plus the
//! built-in provider catalog used to fill runtime defaults.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
