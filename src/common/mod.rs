//! Common utilities shared across the checker
//!
//! - `config`: optional per-project configuration with deployed-tree defaults
//! - `error`: error types and Result alias
//! - `logging`: tracing setup

pub mod config;
pub mod error;
pub mod logging;

pub use config::Config;
pub use error::{Error, Result};
