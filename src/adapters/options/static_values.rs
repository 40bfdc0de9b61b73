//! Value options served from the built-in lists.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::lookup::{defaults, Money, PercentValue};
use crate::ports::ValueOptionSource;

/// Serves the default percentage, amount and duration lists after a fixed
/// latency, standing in for a remote lookup.
#[derive(Debug, Clone)]
pub struct StaticValueOptions {
    latency: Duration,
    failing: Arc<Mutex<bool>>,
}

impl StaticValueOptions {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failing: Arc::new(Mutex::new(false)),
        }
    }

    /// Makes subsequent fetches fail, e.g. to exercise fallbacks.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = failing;
    }

    async fn settle(&self, what: &str) -> Result<(), DomainError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        if *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(DomainError::new(
                ErrorCode::NetworkError,
                format!("Failed to fetch {}", what),
            ));
        }
        Ok(())
    }
}

impl Default for StaticValueOptions {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl ValueOptionSource for StaticValueOptions {
    async fn fetch_percentages(&self) -> Result<Vec<PercentValue>, DomainError> {
        self.settle("percentages").await?;
        Ok(defaults::percentage_values()
            .into_iter()
            .map(PercentValue::new)
            .collect())
    }

    async fn fetch_amounts(&self, currency: &str) -> Result<Vec<Money>, DomainError> {
        self.settle("amounts").await?;
        Ok(defaults::amount_values(currency))
    }

    async fn fetch_durations(&self) -> Result<Vec<String>, DomainError> {
        self.settle("durations").await?;
        Ok(defaults::duration_values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn lists_arrive_after_latency() {
        let source = StaticValueOptions::new(Duration::from_millis(300));
        let started = Instant::now();
        let percentages = source.fetch_percentages().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert_eq!(percentages.len(), 7);
    }

    #[tokio::test]
    async fn amounts_use_requested_currency() {
        let amounts = StaticValueOptions::default().fetch_amounts("USD").await.unwrap();
        assert!(amounts.iter().all(|m| m.currency == "USD"));
    }

    #[tokio::test]
    async fn failing_source_reports_network_error() {
        let source = StaticValueOptions::default();
        source.set_failing(true);
        let err = source.fetch_durations().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
    }
}
