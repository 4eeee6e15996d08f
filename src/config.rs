//! Configuration and settings management
//!
//! Loads credentials and endpoints from config files and environment variables.

use crate::locale::Locale;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application settings loaded once at startup
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Telegram Bot API token (`TELEGRAM_TOKEN`, falls back to `API_TOKEN`)
    #[serde(default)]
    pub telegram_token: String,

    /// `OpenWeatherMap` API key
    #[serde(default)]
    pub weather_token: String,
    /// API Ninjas key for currency conversion
    #[serde(default)]
    pub currency_token: String,

    /// Current weather endpoint
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
    /// Currency conversion endpoint
    #[serde(default = "default_currency_api_url")]
    pub currency_api_url: String,
    /// Random cat picture endpoint
    #[serde(default = "default_image_api_url")]
    pub image_api_url: String,

    /// Language of replies and of weather descriptions
    #[serde(default)]
    pub bot_language: Locale,
    /// Units passed to the weather API
    #[serde(default = "default_weather_units")]
    pub weather_units: String,
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_currency_api_url() -> String {
    "https://api.api-ninjas.com/v1/convertcurrency".to_string()
}

fn default_image_api_url() -> String {
    "https://cataas.com/cat".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails or a credential is missing.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Local overrides, not checked into git
            .add_source(File::with_name("config/local").required(false))
            // Eg. `APP__BOT_LANGUAGE=en ./target/app`
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Plain variables, UPPER_SNAKE_CASE is mapped to snake_case
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let mut settings = Self::from_config(s)?;

        if settings.telegram_token.is_empty() {
            if let Ok(val) = std::env::var("API_TOKEN") {
                settings.telegram_token = val;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Deserialize settings from an already built `Config`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a value has the wrong shape.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    /// Make sure every credential required at startup is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` naming the first missing credential.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("telegram_token", &self.telegram_token),
            ("weather_token", &self.weather_token),
            ("currency_token", &self.currency_token),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::NotFound(key.to_string()));
            }
        }
        Ok(())
    }
}

// HTTP configuration
/// Default timeout for upstream API calls
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Get upstream HTTP timeout from env or default.
///
/// Environment variable: `HTTP_TIMEOUT_SECS`.
#[must_use]
pub fn get_http_timeout_secs() -> u64 {
    std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(HTTP_TIMEOUT_SECS)
}

// Telegram API retry configuration
/// Maximum retries for a Telegram send
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;
/// Initial backoff between retries
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Backoff ceiling
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 5000;
