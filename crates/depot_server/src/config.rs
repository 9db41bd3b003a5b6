//! Server configuration.
//!
//! Configuration is layered with the `config` crate. Sources in order of
//! precedence (later sources override earlier):
//! 1. Bundled defaults (`depot.toml` shipped with the crate)
//! 2. `~/.config/depot/depot.toml`
//! 3. `./depot.toml`, or the file given with `--config`
//! 4. `DEPOT__<SECTION>__<KEY>` environment variables
//!
//! Secrets never live in the file: the LLM API key is read from the
//! environment variable named by `llm.api_key_env`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use depot_engine::{DEFAULT_CHAT_PROMPT, EngineSettings};
use depot_error::{ConfigError, DepotResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../depot.toml");

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ServerSettings {
    /// Socket address to bind
    bind_addr: String,
    /// Ceiling on how long any route may run
    request_timeout_secs: u64,
}

impl ServerSettings {
    /// Route-level execution ceiling.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Override the bind address.
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }
}

/// Relational store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct DatabaseSettings {
    /// Connection URL, overridden by `DATABASE_URL` when set
    url: String,
    /// Maximum pooled connections
    pool_size: u32,
    /// Apply embedded migrations at startup
    run_migrations: bool,
}

impl DatabaseSettings {
    /// The connection URL, preferring `DATABASE_URL` from the environment.
    pub fn resolved_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// Language model provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct LlmSettings {
    /// Chat-completions base URL
    base_url: String,
    /// Model identifier
    model: String,
    /// Environment variable holding the API key
    api_key_env: String,
    /// Per-request timeout for non-streaming calls
    timeout_secs: u64,
    /// System prompt for the chat relay
    #[serde(default)]
    chat_system_prompt: Option<String>,
}

impl LlmSettings {
    /// The API key, if the named environment variable is set.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured chat system prompt or the built-in one.
    pub fn chat_prompt(&self) -> &str {
        self.chat_system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_CHAT_PROMPT)
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set
    level: String,
    /// Emit JSON lines instead of human-readable output
    json: bool,
}

impl LoggingSettings {
    /// Raise the filter to `debug`.
    pub fn verbose(mut self) -> Self {
        self.level = "debug".to_string();
        self
    }
}

/// Complete server configuration.
///
/// # Example
///
/// ```no_run
/// use depot_server::DepotConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DepotConfig::load(None)?;
/// println!("listening on {}", config.server().bind_addr());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct DepotConfig {
    /// HTTP listener
    server: ServerSettings,
    /// Relational store
    database: DatabaseSettings,
    /// Language model provider
    llm: LlmSettings,
    /// Decision engine tunables
    #[serde(default)]
    engine: EngineSettings,
    /// Log output
    logging: LoggingSettings,
}

impl DepotConfig {
    /// Only the bundled defaults.
    pub fn bundled() -> DepotResult<Self> {
        Self::build(defaults())
    }

    /// Bundled defaults overlaid with one file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> DepotResult<Self> {
        debug!("Loading configuration from file");
        Self::build(defaults().add_source(File::from(path.as_ref())))
    }

    /// Load every source in precedence order.
    ///
    /// `explicit` replaces `./depot.toml` and must exist.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> DepotResult<Self> {
        debug!("Loading configuration with precedence: env > file > home dir > bundled defaults");

        let mut builder = defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/depot/depot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("depot").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("DEPOT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Self::build(builder)
    }

    /// Replace the server section.
    pub fn with_server(mut self, server: ServerSettings) -> Self {
        self.server = server;
        self
    }

    /// Replace the logging section.
    pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = logging;
        self
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> DepotResult<Self> {
        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;
        Ok(config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?)
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}
