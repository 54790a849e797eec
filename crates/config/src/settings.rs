//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub agent: AgentSettings,

    /// Optional path to a vocabulary override file (YAML)
    #[serde(default)]
    pub vocabulary_path: Option<String>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// External classifier (chat-completion API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// OpenAI-compatible endpoint
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// API key; empty means unauthenticated (local endpoints)
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> usize {
    256
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_llm_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Conversation flow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Classifications with confidence at or below this value trigger the
    /// confirmation sub-flow
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Keyword that unconditionally resets conversation and onboarding state
    #[serde(default = "default_restart_keyword")]
    pub restart_keyword: String,
}

fn default_confidence_threshold() -> f32 {
    0.8
}

fn default_restart_keyword() -> String {
    "reiniciar".to_string()
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            restart_keyword: default_restart_keyword(),
        }
    }
}

/// Whether an endpoint points at this machine. Loopback endpoints may run
/// without an API key; everything else requires one.
pub fn is_local_endpoint(endpoint: &str) -> bool {
    let rest = endpoint
        .strip_prefix("http://")
        .or_else(|| endpoint.strip_prefix("https://"))
        .unwrap_or(endpoint);
    let authority = rest.split('/').next().unwrap_or("");

    // Bracketed IPv6 first; otherwise strip a trailing :port.
    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or("")
    } else {
        authority.rsplit_once(':').map(|(h, _)| h).unwrap_or(authority)
    };

    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.agent.confidence_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "agent.confidence_threshold".into(),
                message: "must be within [0, 1]".into(),
            });
        }
        if self.llm.api_key.is_empty() && !is_local_endpoint(&self.llm.endpoint) {
            return Err(ConfigError::InvalidValue {
                field: "llm.api_key".into(),
                message: "required for remote endpoints".into(),
            });
        }
        if self.environment.is_production() && self.llm.api_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "llm.api_key".into(),
                message: "required in production".into(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > `config/{env}.yaml` > `config/default.yaml` > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("FINIA")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
