//! Pipeline domain types: naming grammar, resolved pipeline records, results.

pub mod naming;
pub mod result;
pub mod types;

pub use naming::*;
pub use result::*;
pub use types::*;
