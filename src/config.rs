use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::GenerationParams;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub bedrock: BedrockSettings,
    #[serde(default)]
    pub generation: GenerationParams,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct BedrockSettings {
    pub region: String,
    pub api_key: String,
    pub model_id: String,
    /// Overrides the regional runtime endpoint
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per generation, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl BedrockSettings {
    /// Base URL of the Bedrock runtime API
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://bedrock-runtime.{}.amazonaws.com", self.region),
        }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_max_attempts() -> u32 { 10 }
fn default_retry_base_delay_ms() -> u64 { 100 }
fn default_max_backoff_ms() -> u64 { 20_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with PLANNER__)
    /// 4. AWS_REGION, AWS_BEARER_TOKEN_BEDROCK, LLAMA_MODEL_ID and BEDROCK_ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., PLANNER__SERVER__PORT -> server.port
            .add_source(planner_environment())
            .build()?;

        apply_bedrock_env(settings, |key| std::env::var(key).ok())?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(planner_environment())
            .build()?;

        apply_bedrock_env(settings, |key| std::env::var(key).ok())?.try_deserialize()
    }
}

fn planner_environment() -> Environment {
    Environment::with_prefix("PLANNER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Conventional AWS variable names and the config keys they override
const BEDROCK_ENV_OVERRIDES: [(&str, &str); 4] = [
    ("AWS_REGION", "bedrock.region"),
    ("AWS_BEARER_TOKEN_BEDROCK", "bedrock.api_key"),
    ("LLAMA_MODEL_ID", "bedrock.model_id"),
    ("BEDROCK_ENDPOINT", "bedrock.endpoint"),
];

fn apply_bedrock_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in BEDROCK_ENV_OVERRIDES {
        if let Some(value) = lookup(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const MINIMAL: &str = r#"
        [bedrock]
        region = "us-west-2"
        api_key = "file-key"
        model_id = "meta.llama3-8b-instruct-v1:0"
    "#;

    fn from_toml(toml: &str) -> Config {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let settings: Settings = from_toml(MINIMAL).try_deserialize().unwrap();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.bedrock.timeout_secs, 30);
        assert_eq!(settings.bedrock.max_attempts, 10);
        assert_eq!(settings.bedrock.max_backoff_ms, 20_000);
        assert_eq!(settings.generation, GenerationParams::default());
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_default_generation_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 1024);
        assert_eq!(params.temperature, 0.7);
        assert_eq!(params.top_p, 0.9);
    }

    #[test]
    fn test_endpoint_url() {
        let mut settings: Settings = from_toml(MINIMAL).try_deserialize().unwrap();
        assert_eq!(
            settings.bedrock.endpoint_url(),
            "https://bedrock-runtime.us-west-2.amazonaws.com"
        );

        settings.bedrock.endpoint = Some("http://localhost:4566/".to_string());
        assert_eq!(settings.bedrock.endpoint_url(), "http://localhost:4566");
    }

    #[test]
    fn test_aws_variables_override_file() {
        let lookup = |key: &str| match key {
            "AWS_BEARER_TOKEN_BEDROCK" => Some("env-key".to_string()),
            "LLAMA_MODEL_ID" => Some("meta.llama3-70b-instruct-v1:0".to_string()),
            _ => None,
        };

        let settings: Settings = apply_bedrock_env(from_toml(MINIMAL), lookup)
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.bedrock.region, "us-west-2");
        assert_eq!(settings.bedrock.api_key, "env-key");
        assert_eq!(settings.bedrock.model_id, "meta.llama3-70b-instruct-v1:0");
        assert!(settings.bedrock.endpoint.is_none());
    }

    #[test]
    fn test_missing_bedrock_section_is_an_error() {
        let result: Result<Settings, _> = from_toml("[server]\nport = 8080").try_deserialize();
        assert!(result.is_err());
    }
}
