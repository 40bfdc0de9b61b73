//! Editor timing configuration

use serde::Deserialize;
use std::time::Duration;

use super::ValidationError;

/// Latencies and delays the editor works with
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Simulated round trip of the add-new persistence step
    #[serde(default = "default_add_option_latency_ms")]
    pub add_option_latency_ms: u64,

    /// Simulated latency of the percentage/amount/duration lookups
    #[serde(default = "default_value_fetch_latency_ms")]
    pub value_fetch_latency_ms: u64,

    /// Wait between a successful update and navigating back
    #[serde(default = "default_back_navigation_delay_ms")]
    pub back_navigation_delay_ms: u64,

    /// How long a notification stays visible
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            add_option_latency_ms: default_add_option_latency_ms(),
            value_fetch_latency_ms: default_value_fetch_latency_ms(),
            back_navigation_delay_ms: default_back_navigation_delay_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
        }
    }
}

impl TimingConfig {
    pub fn add_option_latency(&self) -> Duration {
        Duration::from_millis(self.add_option_latency_ms)
    }

    pub fn value_fetch_latency(&self) -> Duration {
        Duration::from_millis(self.value_fetch_latency_ms)
    }

    pub fn back_navigation_delay(&self) -> Duration {
        Duration::from_millis(self.back_navigation_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Latencies may be zero; the navigation delay and notification
    /// lifetime may not.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.back_navigation_delay_ms == 0 {
            return Err(ValidationError::ZeroDuration("back_navigation_delay_ms"));
        }
        if self.notification_ttl_ms == 0 {
            return Err(ValidationError::ZeroDuration("notification_ttl_ms"));
        }
        Ok(())
    }
}

fn default_add_option_latency_ms() -> u64 {
    300
}

fn default_value_fetch_latency_ms() -> u64 {
    300
}

fn default_back_navigation_delay_ms() -> u64 {
    1500
}

fn default_notification_ttl_ms() -> u64 {
    3000
}
