//! Configuration loading from TOML files.
//!
//! Secrets (Telegram bot token, LLM API key) are never read from the TOML
//! file; they come from environment variables, optionally via a `.env` file.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exchange: ExchangeConfig,
    pub sentiment: SentimentConfig,
    pub llm: LlmConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// Futures-exchange REST API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Base URL of the futures REST API.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

/// Sentiment-index REST API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

/// LLM advisor settings. The API key comes from `GEMINI_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f64,
}

/// Advice history persistence settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Path of the JSON history file.
    pub path: String,
    /// Maximum entries rendered by the history view.
    pub display_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    ///
    /// A missing file yields the default configuration so the bot can run
    /// with nothing but environment variables set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.exchange.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange.base_url",
            }
            .into());
        }
        url::Url::parse(&self.exchange.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "exchange.base_url",
            reason: e.to_string(),
        })?;

        if self.sentiment.base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "sentiment.base_url",
            }
            .into());
        }
        url::Url::parse(&self.sentiment.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "sentiment.base_url",
            reason: e.to_string(),
        })?;

        if self.exchange.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "exchange.timeout_ms",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.llm.model.is_empty() {
            return Err(ConfigError::MissingField { field: "llm.model" }.into());
        }
        if self.history.display_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.display_limit",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange: ExchangeConfig::default(),
            sentiment: SentimentConfig::default(),
            llm: LlmConfig::default(),
            history: HistoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fapi.binance.com".into(),
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.alternative.me".into(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".into(),
            max_tokens: 1024,
            temperature: 0.4,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: "advice_history.json".into(),
            display_limit: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [exchange]
            base_url = "https://fapi.example.com"
            timeout_ms = 2000
            connect_timeout_ms = 1000

            [sentiment]
            base_url = "https://sentiment.example.com"

            [llm]
            model = "gemini-2.0-flash"
            max_tokens = 512
            temperature = 0.2

            [history]
            path = "/tmp/history.json"
            display_limit = 10

            [logging]
            level = "debug"
            format = "json"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.exchange.base_url, "https://fapi.example.com");
        assert_eq!(config.exchange.timeout_ms, 2000);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.history.display_limit, 10);
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let toml = r#"
            [logging]
            level = "warn"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.exchange.base_url, "https://fapi.binance.com");
        assert_eq!(config.history.display_limit, 5);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let mut config = Config::default();
        config.exchange.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = Config::default();
        config.exchange.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/coinsage.toml").unwrap();
        assert_eq!(config.exchange.base_url, "https://fapi.binance.com");
    }
}
