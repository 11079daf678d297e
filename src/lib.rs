use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

use crate::domain::core::Currency;

pub mod domain;
pub mod infrastructure;

static CONFIG_FILE: &str = "garage.toml";

#[derive(Clone, Debug, Deserialize)]
pub struct GarageConfig {
    pub storage: Storage,
    pub messaging: Messaging,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub web: Web,
}

impl GarageConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("GARAGE_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_owned());
        Self::build(
            Config::builder().add_source(config::File::with_name(&path)),
            environment(),
        )
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(env)
            .build()?
            .try_deserialize::<GarageConfig>()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GARAGE")
        .prefix_separator("_")
        .separator("__")
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "Storage::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Storage {
    fn default_max_connections() -> u32 {
        5
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Messaging {
    /// 送信元番号
    pub origin: String,
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "Messaging::default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Messaging {
    fn default_base_url() -> String {
        "https://api.twilio.com".to_owned()
    }
}

fn default_timeout_secs() -> u64 {
    10
}

/// 料金設定
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub currency: Currency,
    pub two_wheeler: f64,
    pub three_wheeler: f64,
    pub four_wheeler: f64,
    /// プレミアム割引率 (%)
    pub premium_discount: u8,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            two_wheeler: 500.0,
            three_wheeler: 750.0,
            four_wheeler: 1000.0,
            premium_discount: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Web {
    pub bind: String,
    pub tls: Option<Tls>,
}

impl Default for Web {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_owned(),
            tls: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Tls {
    pub cert: String,
    pub key: String,
}
