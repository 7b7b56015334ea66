use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid closing time '{value}', expected HH:MM")]
    InvalidClosingTime { value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub orders: OrderConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderConfig {
    /// Local time of day, `HH:MM`, from which orders can no longer be made
    /// or modified
    #[serde(default = "default_closing_time")]
    pub closing_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    pub otlp_endpoint: Option<String>,
    #[serde(default)]
    pub json_logging: bool,
}

impl Config {
    /// Load from `FASTFOODFAST_*` environment variables, nested with `__`
    /// (e.g. `FASTFOODFAST_ORDERS__CLOSING_TIME=21:30`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FASTFOODFAST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.orders.closing()?;
        Ok(config)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl OrderConfig {
    pub fn closing(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.closing_time.trim(), "%H:%M").map_err(|_| {
            ConfigError::InvalidClosingTime {
                value: self.closing_time.clone(),
            }
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_timeout(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            closing_time: default_closing_time(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: default_service_version(),
            otlp_endpoint: None,
            json_logging: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout() -> u64 {
    30
}

fn default_api_prefix() -> String {
    "/api/v2".to_string()
}

fn default_closing_time() -> String {
    "22:00".to_string()
}

fn default_service_name() -> String {
    "fastfoodfast".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
