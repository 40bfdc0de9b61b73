//! Discount catalog connection configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::ValidationError;
use crate::adapters::HttpCatalogConfig;

/// Where the discount service lives and how to talk to it
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Service root URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token, if the service requires one
    #[serde(default)]
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the HTTP adapter configuration.
    pub fn http_config(&self) -> HttpCatalogConfig {
        use secrecy::ExposeSecret;

        let config = HttpCatalogConfig::new(&self.base_url).with_timeout(self.request_timeout());
        match &self.api_token {
            Some(token) => config.with_api_token(token.expose_secret().clone()),
            None => config,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("catalog.base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidCatalogUrl(self.base_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let config = CatalogConfig {
            base_url: "ftp://discounts".to_string(),
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCatalogUrl(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = CatalogConfig {
            request_timeout_secs: 0,
            ..CatalogConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn http_config_carries_timeout() {
        let config = CatalogConfig {
            request_timeout_secs: 5,
            ..CatalogConfig::default()
        };
        assert_eq!(config.http_config().timeout, Duration::from_secs(5));
    }
}
