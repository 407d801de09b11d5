//! Resolution stages: validate → resolve → map virtual models → statistics/warnings.

pub mod mapper;
pub mod resolver;
pub mod stats;
pub mod validate;
pub mod warnings;

pub use mapper::*;
pub use resolver::*;
pub use stats::*;
pub use validate::*;
pub use warnings::*;
