//! Source of the percentage, amount and duration choices.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::lookup::{Money, PercentValue};

/// Supplies the value lists offered by the percentage, amount and
/// duration dropdowns.
#[async_trait]
pub trait ValueOptionSource: Send + Sync {
    async fn fetch_percentages(&self) -> Result<Vec<PercentValue>, DomainError>;

    /// Amounts in `currency`.
    async fn fetch_amounts(&self, currency: &str) -> Result<Vec<Money>, DomainError>;

    async fn fetch_durations(&self) -> Result<Vec<String>, DomainError>;
}
