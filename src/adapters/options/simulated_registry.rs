//! Option registry that only simulates the remote round trip.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::form::NewOptionValue;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::OptionRegistry;

#[derive(Debug, Default)]
struct RegistryState {
    failing: bool,
    registered: Vec<NewOptionValue>,
}

/// Waits a fixed latency and accepts the option, unless told to fail.
#[derive(Debug, Clone)]
pub struct SimulatedOptionRegistry {
    latency: Duration,
    state: Arc<Mutex<RegistryState>>,
}

impl SimulatedOptionRegistry {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            state: Arc::new(Mutex::new(RegistryState::default())),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// Options accepted so far.
    pub fn registered(&self) -> Vec<NewOptionValue> {
        self.lock().registered.clone()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedOptionRegistry {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl OptionRegistry for SimulatedOptionRegistry {
    async fn register(&self, value: &NewOptionValue) -> Result<(), DomainError> {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
        let mut state = self.lock();
        if state.failing {
            return Err(DomainError::new(
                ErrorCode::NetworkError,
                format!("Could not register new {}", value.field()),
            ));
        }
        debug!(field = %value.field(), "Option registered");
        state.registered.push(value.clone());
        Ok(())
    }
}
