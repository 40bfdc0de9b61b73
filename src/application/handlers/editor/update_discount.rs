//! UpdateDiscountHandler - validates the form and submits the update.
//!
//! On success the user is told, the session becomes `Submitted`, and back
//! navigation is scheduled after a short delay so the success message can
//! be read. Any failure returns the session to `Ready` for another try.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::form::{EditorStatus, FormSession, Notification, SubmissionError, UpdatePayload};
use crate::ports::{BackNavigator, DiscountCatalog, Notifier};

/// Shown once the catalog accepts the update.
pub const UPDATE_SUCCESS_MESSAGE: &str = "Discount updated successfully!";

/// Result of an accepted update.
#[derive(Debug)]
pub struct UpdateOutcome {
    /// Body that was sent.
    pub payload: UpdatePayload,
    /// The scheduled back navigation.
    pub navigation: JoinHandle<()>,
}

/// Handler for the form's submit action.
pub struct UpdateDiscountHandler {
    catalog: Arc<dyn DiscountCatalog>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn BackNavigator>,
    back_delay: Duration,
}

impl UpdateDiscountHandler {
    pub fn new(
        catalog: Arc<dyn DiscountCatalog>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn BackNavigator>,
        back_delay: Duration,
    ) -> Self {
        Self {
            catalog,
            notifier,
            navigator,
            back_delay,
        }
    }

    pub async fn handle(&self, session: &mut FormSession) -> Result<UpdateOutcome, SubmissionError> {
        // 1. Only from the editable state
        if !session.status().is_editable() {
            return Err(SubmissionError::NotReady(session.status()));
        }

        // 2. Preconditions, first failure wins
        let payload = match session.build_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier.notify(Notification::error(e.message()));
                return Err(e);
            }
        };

        // 3. Submit
        let discount_id = session.discount_id();
        self.enter(session, EditorStatus::Submitting)?;
        info!(discount_id = %discount_id, scope = %payload.scope, "Submitting discount update");

        let failure = match self.catalog.update_discount(discount_id, &payload).await {
            Ok(response) if response.is_success() => None,
            Ok(_) => {
                warn!(discount_id = %discount_id, "Discount update was not accepted");
                Some(SubmissionError::Rejected)
            }
            Err(e) => {
                error!(discount_id = %discount_id, error = %e, "Error updating discount");
                Some(SubmissionError::from_remote(&e))
            }
        };

        // 4. Settle
        if let Some(e) = failure {
            self.notifier.notify(Notification::error(e.message()));
            self.enter(session, EditorStatus::Ready)?;
            return Err(e);
        }

        self.notifier.notify(Notification::success(UPDATE_SUCCESS_MESSAGE));
        self.enter(session, EditorStatus::Submitted)?;
        info!(discount_id = %discount_id, "Discount updated");

        let navigator = Arc::clone(&self.navigator);
        let delay = self.back_delay;
        let navigation = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate_back();
        });

        Ok(UpdateOutcome { payload, navigation })
    }

    fn enter(&self, session: &mut FormSession, status: EditorStatus) -> Result<(), SubmissionError> {
        session
            .transition(status)
            .map_err(|_| SubmissionError::NotReady(session.status()))
    }
}
