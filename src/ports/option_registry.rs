//! Persistence step of the add-new workflow.

use async_trait::async_trait;

use crate::domain::form::NewOptionValue;
use crate::domain::foundation::DomainError;

/// Records a user-entered option remotely before it is committed locally.
#[async_trait]
pub trait OptionRegistry: Send + Sync {
    async fn register(&self, value: &NewOptionValue) -> Result<(), DomainError>;
}
