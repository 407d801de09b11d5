//! Deployment artifacts derived from a resolved pipeline list.
//!
//! Everything here is a pure function of the pipeline list plus fixed
//! scheduler defaults.

pub mod build;
pub mod format;
pub mod types;

pub use build::*;
pub use format::*;
pub use types::*;
