//! Configuration system for precis.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{PrecisError, PrecisResult};
use crate::summarize::{DEFAULT_CHUNK_CHARS, DEFAULT_SENTENCE_COUNT};
use crate::traits::ModelConfig;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Maximum accepted request body in bytes.
    pub max_upload_bytes: usize,
    /// Maximum number of live upload sessions.
    pub max_sessions: usize,
    /// Seconds an upload session stays available.
    pub session_ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 25 * 1024 * 1024,
            max_sessions: 64,
            session_ttl_secs: 3600,
        }
    }
}

impl ServerConfig {
    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Session lifetime.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Summarizer tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Sentences in an extractive summary.
    pub sentence_count: usize,
    /// Characters per abstractive model input chunk.
    pub chunk_chars: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            sentence_count: DEFAULT_SENTENCE_COUNT,
            chunk_chars: DEFAULT_CHUNK_CHARS,
        }
    }
}

/// Main precis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecisConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Summarization model configuration.
    pub model: ModelConfig,
    /// Summarizer configuration.
    pub summarizer: SummarizerConfig,
}

impl PrecisConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> PrecisResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| PrecisError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| PrecisError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| PrecisError::Configuration(e.to_string())),
            _ => Err(PrecisError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `PRECIS_CONFIG` names a file loaded first; individual variables then
    /// override its values.
    pub fn from_env() -> PrecisResult<Self> {
        let mut config = match std::env::var("PRECIS_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        // Server configuration
        if let Ok(host) = std::env::var("PRECIS_HOST") {
            config.server.host = host;
        }
        if let Some(port) = parse_env("PRECIS_PORT")? {
            config.server.port = port;
        }
        if let Some(bytes) = parse_env("PRECIS_MAX_UPLOAD_BYTES")? {
            config.server.max_upload_bytes = bytes;
        }
        if let Some(sessions) = parse_env("PRECIS_MAX_SESSIONS")? {
            config.server.max_sessions = sessions;
        }
        if let Some(ttl) = parse_env("PRECIS_SESSION_TTL_SECS")? {
            config.server.session_ttl_secs = ttl;
        }

        // Model configuration
        if let Ok(model) = std::env::var("PRECIS_MODEL") {
            config.model.model = model;
        }
        if let Ok(base_url) = std::env::var("PRECIS_MODEL_BASE_URL") {
            config.model.base_url = Some(base_url);
        }
        if let Some(timeout) = parse_env("PRECIS_MODEL_TIMEOUT_SECS")? {
            config.model.timeout_secs = timeout;
        }
        if let Ok(api_key) =
            std::env::var("PRECIS_MODEL_API_KEY").or_else(|_| std::env::var("HF_TOKEN"))
        {
            config.model.api_key = Some(api_key);
        }

        // Summarizer configuration
        if let Some(count) = parse_env("PRECIS_SENTENCE_COUNT")? {
            config.summarizer.sentence_count = count;
        }

        Ok(config)
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> PrecisConfigBuilder {
        PrecisConfigBuilder::default()
    }
}

fn parse_env<T: FromStr>(name: &str) -> PrecisResult<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            PrecisError::Configuration(format!("Invalid value for {}: {:?}", name, raw))
        }),
        Err(_) => Ok(None),
    }
}

/// Builder for PrecisConfig.
#[derive(Default)]
pub struct PrecisConfigBuilder {
    config: PrecisConfig,
}

impl PrecisConfigBuilder {
    /// Set server configuration.
    pub fn server(mut self, config: ServerConfig) -> Self {
        self.config.server = config;
        self
    }

    /// Set model configuration.
    pub fn model(mut self, config: ModelConfig) -> Self {
        self.config.model = config;
        self
    }

    /// Set summarizer configuration.
    pub fn summarizer(mut self, config: SummarizerConfig) -> Self {
        self.config.summarizer = config;
        self
    }

    /// Set the bind port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Set the maximum upload size.
    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.server.max_upload_bytes = bytes;
        self
    }

    /// Set the maximum number of live sessions.
    pub fn max_sessions(mut self, sessions: usize) -> Self {
        self.config.server.max_sessions = sessions;
        self
    }

    /// Set the session lifetime in seconds.
    pub fn session_ttl_secs(mut self, secs: u64) -> Self {
        self.config.server.session_ttl_secs = secs;
        self
    }

    /// Set the extractive sentence count.
    pub fn sentence_count(mut self, count: usize) -> Self {
        self.config.summarizer.sentence_count = count;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PrecisConfig {
        self.config
    }
}
