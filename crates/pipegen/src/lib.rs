//! Configuration resolution and pipeline generation for LLM provider routing.
//!
//! A declarative config (providers → models → API keys, plus virtual-model
//! aliases) is validated, expanded into one pipeline per key, and annotated
//! with the aliases that route to it. Merging and deployment exports are
//! separate opt-in passes over the resolved pipeline list.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod optimize;
pub mod parser;
pub mod pipeline;
pub mod progress;
pub mod resolve;
pub mod schema;
pub mod source;

pub use engine::{PipelineEngine, parse_user_config};
pub use error::{Error, Result};
pub use pipeline::{ParseResult, PipelineConfig, Statistics};
pub use schema::{RawUserConfig, UserConfig};
