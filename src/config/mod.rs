//! Editor configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DISCOUNT_EDITOR` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment yields a working setup.
//!
//! # Example
//!
//! ```no_run
//! use discount_editor::config::EditorConfig;
//!
//! let config = EditorConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog at {}", config.catalog.base_url);
//! ```

mod catalog;
mod error;
mod features;
mod timing;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use timing::TimingConfig;

use serde::Deserialize;

use crate::domain::lookup::defaults::DEFAULT_CURRENCY;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root editor configuration
///
/// Load using [`EditorConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Latencies, navigation delay and notification lifetime
    #[serde(default)]
    pub timing: TimingConfig,

    /// Remote discount service
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,

    /// Currency unit for amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            catalog: CatalogConfig::default(),
            features: FeatureFlags::default(),
            currency: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DISCOUNT_EDITOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DISCOUNT_EDITOR__TIMING__BACK_NAVIGATION_DELAY_MS=1500` -> `timing.back_navigation_delay_ms`
    /// - `DISCOUNT_EDITOR__CATALOG__BASE_URL=...` -> `catalog.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DISCOUNT_EDITOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timing.validate()?;
        self.catalog.validate()?;
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingRequired("currency"));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidLogLevel(self.log_level.clone()));
        }
        Ok(())
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("DISCOUNT_EDITOR__TIMING__BACK_NAVIGATION_DELAY_MS");
        env::remove_var("DISCOUNT_EDITOR__CATALOG__BASE_URL");
        env::remove_var("DISCOUNT_EDITOR__FEATURES__OPTIMISTIC_ADD_OPTION");
        env::remove_var("DISCOUNT_EDITOR__CURRENCY");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = EditorConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.currency, "Rs");
        assert_eq!(config.timing.back_navigation_delay_ms, 1500);
        assert!(config.features.optimistic_add_option);
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DISCOUNT_EDITOR__TIMING__BACK_NAVIGATION_DELAY_MS", "2000");
        env::set_var("DISCOUNT_EDITOR__CATALOG__BASE_URL", "https://discounts.example.com");
        env::set_var("DISCOUNT_EDITOR__FEATURES__OPTIMISTIC_ADD_OPTION", "false");
        env::set_var("DISCOUNT_EDITOR__CURRENCY", "USD");
        let result = EditorConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.timing.back_navigation_delay_ms, 2000);
        assert_eq!(config.catalog.base_url, "https://discounts.example.com");
        assert!(!config.features.optimistic_add_option);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn test_validate_default_config() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_blank_currency_is_rejected() {
        let config = EditorConfig {
            currency: " ".to_string(),
            ..EditorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("currency"))
        );
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let config = EditorConfig {
            log_level: "loud".to_string(),
            ..EditorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }
}
