//! Layered server configuration.
//!
//! Sources, lowest precedence first: serde defaults, the YAML file given
//! with `--config`, `LEADS__*` environment variables (`__` separates
//! nesting levels, e.g. `LEADS__SERVER__PORT`), then CLI overrides.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

use leads::LeadsConfig;

pub const ENV_PREFIX: &str = "LEADS__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub leads: LeadsConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Cross-origin settings; no CORS layer is installed while disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    #[serde(default)]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            allowed_methods: default_methods(),
            allowed_headers: default_headers(),
            allow_credentials: false,
            max_age_seconds: 0,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_owned()
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE"].map(str::to_owned).to_vec()
}

fn default_headers() -> Vec<String> {
    vec!["content-type".to_owned()]
}

impl AppConfig {
    /// The provider chain without CLI overrides.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// # Errors
    /// Returns an error when a source cannot be parsed or the result is inconsistent.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns a description of the first inconsistent setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.leads.validate().map_err(anyhow::Error::msg)?;
        if self.server.host.trim().is_empty() {
            anyhow::bail!("server.host must not be empty");
        }
        if self.cors.enabled
            && self.cors.allow_credentials
            && self.cors.allowed_origins.iter().any(|o| o == "*")
        {
            anyhow::bail!("cors.allowed_origins=['*'] cannot be combined with cors.allow_credentials=true");
        }
        Ok(())
    }

    /// `--port` replaces the configured port; each `-v` raises the log level.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Pretty JSON with secrets redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
