use crate::core::{AppError, Currency, Result};
use crate::modules::installments::models::BillingCycle;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::Configuration(format!(
                "Invalid LOG_FORMAT '{}': expected pretty or json",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Where data lives and how amounts are billed
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub currency: Currency,
    /// Cycle for credit cards that carry none of their own
    pub billing_cycle: BillingCycle,
    /// Monthly spending limit the dashboard warns against
    pub spending_limit: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, applying defaults for unset keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                log_format: parse_var(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            },
            server: ServerConfig::from_lookup(&lookup)?,
            store: StoreConfig {
                data_dir: lookup("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./data")),
                currency: parse_var(&lookup, "CURRENCY", Currency::BRL)?,
                billing_cycle: BillingCycle {
                    closing_day: parse_var(
                        &lookup,
                        "CARD_CLOSING_DAY",
                        BillingCycle::DEFAULT_CLOSING_DAY,
                    )?,
                    due_day: parse_var(&lookup, "CARD_DUE_DAY", BillingCycle::DEFAULT_DUE_DAY)?,
                },
                spending_limit: parse_var(&lookup, "SPENDING_LIMIT", Decimal::new(200000, 2))?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.store
            .billing_cycle
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid card billing cycle: {}", e)))?;

        if self.store.spending_limit < Decimal::ZERO {
            return Err(AppError::Configuration(
                "SPENDING_LIMIT cannot be negative".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(AppError::Configuration(
                "SERVER_PORT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse `key` through `lookup`, falling back to `default` when unset
pub(crate) fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}: '{}'", key, raw))),
    }
}
