//! Configuration management for the Finia assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, then `config/{env}`)
//! - Environment variables (`FINIA__` prefix)
//!
//! The domain vocabulary (keyword lists and default category sets) ships
//! with built-in defaults and can be overridden from a YAML file.

pub mod settings;
pub mod vocabulary;

pub use settings::{
    is_local_endpoint, load_settings, AgentSettings, LlmSettings, RuntimeEnvironment,
    ServerSettings, Settings,
};
pub use vocabulary::{Category, Vocabulary};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
