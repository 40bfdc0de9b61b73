//! DiscountEditor - the entry point the enclosing application embeds.
//!
//! Owns one [`FormSession`] and routes user actions either straight to the
//! session or through the load, add-new and update handlers. Dropping the
//! editor cancels an in-flight load.

use std::fmt;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::EditorConfig;
use crate::domain::discount::DiscountScope;
use crate::domain::foundation::{DiscountId, DomainError, OptionId};
use crate::domain::form::{
    AddNewField, AddOptionError, EditorError, EditorStatus, FieldKey, FieldOptions, FormSession,
    SubmissionError, UpdatePayload,
};
use crate::ports::{BackNavigator, DiscountCatalog, Notifier, OptionRegistry, ValueOptionSource};

use super::add_option::{AddOptionHandler, AddOptionOutcome, CommitPolicy};
use super::cancellation::CancellationHandle;
use super::load_discount::{LoadDiscountHandler, LoadOutcome};
use super::update_discount::UpdateDiscountHandler;

/// What the host passes in.
#[derive(Clone)]
pub struct EditorProps {
    pub on_back: Arc<dyn BackNavigator>,
    pub discount_id: DiscountId,
}

impl EditorProps {
    pub fn new(on_back: impl BackNavigator + 'static, discount_id: DiscountId) -> Self {
        Self {
            on_back: Arc::new(on_back),
            discount_id,
        }
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("discount_id", &self.discount_id)
            .finish_non_exhaustive()
    }
}

/// Collaborators the editor talks to.
#[derive(Clone)]
pub struct EditorServices {
    pub catalog: Arc<dyn DiscountCatalog>,
    pub values: Arc<dyn ValueOptionSource>,
    pub registry: Arc<dyn OptionRegistry>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct DiscountEditor {
    on_back: Arc<dyn BackNavigator>,
    session: FormSession,
    cancellation: CancellationHandle,
    loader: LoadDiscountHandler,
    add_option: AddOptionHandler,
    update: UpdateDiscountHandler,
    pending_navigation: Option<JoinHandle<()>>,
}

impl DiscountEditor {
    pub fn new(props: EditorProps, services: EditorServices, config: &EditorConfig) -> Self {
        let EditorServices {
            catalog,
            values,
            registry,
            notifier,
        } = services;

        let policy = CommitPolicy::from_flag(config.features.optimistic_add_option);
        Self {
            session: FormSession::new(props.discount_id, config.currency.clone()),
            cancellation: CancellationHandle::new(),
            loader: LoadDiscountHandler::new(Arc::clone(&catalog), values, Arc::clone(&notifier)),
            add_option: AddOptionHandler::new(registry, Arc::clone(&notifier), policy),
            update: UpdateDiscountHandler::new(
                catalog,
                notifier,
                Arc::clone(&props.on_back),
                config.timing.back_navigation_delay(),
            ),
            on_back: props.on_back,
            pending_navigation: None,
        }
    }

    /// Fetches the record and every lookup list, then pre-populates the form.
    pub async fn load(&mut self) -> Result<LoadOutcome, DomainError> {
        let signal = self.cancellation.signal();
        self.loader.handle(&mut self.session, &signal).await
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn status(&self) -> EditorStatus {
        self.session.status()
    }

    /// A handle that cancels this editor's load from elsewhere.
    pub fn cancellation(&self) -> CancellationHandle {
        self.cancellation.clone()
    }

    pub fn toggle_dropdown(&mut self, field: FieldKey) -> Result<bool, EditorError> {
        self.session.toggle_dropdown(field)
    }

    /// A click outside every dropdown.
    pub fn click_outside(&mut self) {
        self.session.close_dropdowns();
    }

    pub fn select(&mut self, field: FieldKey, choice: Option<OptionId>) -> Result<(), EditorError> {
        self.session.select(field, choice)
    }

    pub fn set_search(&mut self, field: FieldKey, query: impl Into<String>) -> Result<(), EditorError> {
        self.session.set_search(field, query)
    }

    pub fn options(&self, field: FieldKey) -> FieldOptions {
        self.session.options(field)
    }

    pub fn toggle_enabled(&mut self) -> Result<bool, EditorError> {
        self.session.toggle_enabled()
    }

    pub fn request_scope(&mut self, scope: DiscountScope) -> Result<(), EditorError> {
        self.session.request_scope(scope)
    }

    pub fn begin_add_new(&mut self, field: AddNewField) -> Result<(), EditorError> {
        self.session.begin_add_new(field)
    }

    pub fn set_draft(&mut self, field: AddNewField, text: impl Into<String>) -> Result<(), EditorError> {
        self.session.set_draft(field, text)
    }

    pub fn cancel_add_new(&mut self, field: AddNewField) {
        self.session.cancel_add_new(field);
    }

    /// Submits the add-new sub-form of `field`.
    pub async fn submit_new_option(
        &mut self,
        field: AddNewField,
    ) -> Result<AddOptionOutcome, AddOptionError> {
        self.add_option.handle(&mut self.session, field).await
    }

    /// Validates and sends the update. On success back navigation is
    /// scheduled; see [`Self::take_pending_navigation`].
    pub async fn submit(&mut self) -> Result<UpdatePayload, SubmissionError> {
        let outcome = self.update.handle(&mut self.session).await?;
        self.pending_navigation = Some(outcome.navigation);
        Ok(outcome.payload)
    }

    /// The back button; available in every status.
    pub fn back(&self) {
        debug!(discount_id = %self.session.discount_id(), "Back requested");
        self.on_back.navigate_back();
    }

    /// The navigation scheduled by a successful submit, if any.
    pub fn take_pending_navigation(&mut self) -> Option<JoinHandle<()>> {
        self.pending_navigation.take()
    }

    /// Stops an in-flight load before its next state change.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }
}

impl Drop for DiscountEditor {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

impl fmt::Debug for DiscountEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountEditor")
            .field("session", &self.session)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}
