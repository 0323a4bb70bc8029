//! Configuration for runlens.
//!
//! This module provides:
//! - A `.env` file loader that fills gaps in the process environment
//! - An injectable environment view so tests never touch process state
//! - Typed runtime settings with environment overrides and validation

mod builder;
mod constants;
mod defaults;
mod dotenv;
mod environment;
mod error;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use dotenv::{ParsedEnv, parse_env_str};
pub use environment::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::ConfigError;
pub use loader::EnvLoader;
pub use types::{Config, ModelSettings, RuntimeSettings};
