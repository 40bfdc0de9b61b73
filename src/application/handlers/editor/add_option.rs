//! AddOptionHandler - the "add new option" workflow.
//!
//! Parses the sub-form's draft, persists the new option through the
//! registry, then appends it to the lookup list and selects it. What
//! happens when persisting fails is decided by [`CommitPolicy`].

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::foundation::OptionId;
use crate::domain::form::{
    parse_new_option, AddNewField, AddOptionError, FormSession, Notification,
};
use crate::ports::{Notifier, OptionRegistry};

/// What to do with a new option whose persistence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Commit locally anyway; only the notification differs.
    Optimistic,
    /// Leave lists and selection untouched and keep the draft for a retry.
    RollbackOnFailure,
}

impl CommitPolicy {
    pub fn from_flag(optimistic: bool) -> Self {
        if optimistic {
            CommitPolicy::Optimistic
        } else {
            CommitPolicy::RollbackOnFailure
        }
    }
}

/// Result of a committed add-new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOptionOutcome {
    /// Id of the appended, now selected option.
    pub id: OptionId,
    /// False when the option was committed although persisting it failed.
    pub persisted: bool,
}

/// Handler for submitting an add-new sub-form.
pub struct AddOptionHandler {
    registry: Arc<dyn OptionRegistry>,
    notifier: Arc<dyn Notifier>,
    policy: CommitPolicy,
}

impl AddOptionHandler {
    pub fn new(
        registry: Arc<dyn OptionRegistry>,
        notifier: Arc<dyn Notifier>,
        policy: CommitPolicy,
    ) -> Self {
        Self {
            registry,
            notifier,
            policy,
        }
    }

    pub async fn handle(
        &self,
        session: &mut FormSession,
        field: AddNewField,
    ) -> Result<AddOptionOutcome, AddOptionError> {
        // 1. Only while editing
        session
            .require_ready()
            .map_err(|_| AddOptionError::NotReady(session.status()))?;

        // 2. Parse the draft
        let value = match parse_new_option(field, &session.draft(field).text, session.currency()) {
            Ok(value) => value,
            Err(e) => {
                if e.is_user_facing() {
                    self.notifier.notify(Notification::error(e.to_string()));
                }
                return Err(e);
            }
        };

        // 3. Persist
        let resource = field.resource();
        session.set_loading(resource, true);
        let persisted = self.registry.register(&value).await;
        session.set_loading(resource, false);

        // 4. Commit
        match persisted {
            Ok(()) => {
                let id = session.commit_new_option(value);
                info!(field = %field, option_id = %id, "New option added");
                self.notifier.notify(Notification::success(field.success_message()));
                Ok(AddOptionOutcome { id, persisted: true })
            }
            Err(e) => {
                error!(field = %field, error = %e, "Error adding new option");
                self.notifier.notify(Notification::error(field.failure_message()));
                match self.policy {
                    CommitPolicy::Optimistic => {
                        let id = session.commit_new_option(value);
                        Ok(AddOptionOutcome {
                            id,
                            persisted: false,
                        })
                    }
                    CommitPolicy::RollbackOnFailure => Err(AddOptionError::PersistenceFailed {
                        field,
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discount::{DiscountRecord, DiscountScope};
    use crate::domain::foundation::{DiscountId, DomainError, ErrorCode};
    use crate::domain::form::{EditorStatus, FieldKey, NewOptionValue, Resource};
    use crate::domain::lookup::{defaults, PercentValue};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockRegistry {
        fail: bool,
        calls: Mutex<Vec<NewOptionValue>>,
    }

    impl MockRegistry {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl OptionRegistry for MockRegistry {
        async fn register(&self, value: &NewOptionValue) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(value.clone());
            if self.fail {
                return Err(DomainError::new(ErrorCode::NetworkError, "offline"));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        shown: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.shown.lock().unwrap().push(notification);
        }
    }

    impl RecordingNotifier {
        fn shown(&self) -> Vec<Notification> {
            self.shown.lock().unwrap().clone()
        }
    }

    fn ready_session() -> FormSession {
        let mut session = FormSession::new(DiscountId::new(1), "Rs");
        session.cache_mut().percentages.replace(defaults::percentages());
        session.cache_mut().discount_names.replace(defaults::discount_names());
        session.install_record(DiscountRecord::new(DiscountId::new(1), "Weekly", DiscountScope::Item));
        session.transition(EditorStatus::Ready).unwrap();
        session
    }

    fn setup(
        fail: bool,
        policy: CommitPolicy,
    ) -> (AddOptionHandler, Arc<MockRegistry>, Arc<RecordingNotifier>) {
        let registry = Arc::new(MockRegistry::new(fail));
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = AddOptionHandler::new(registry.clone(), notifier.clone(), policy);
        (handler, registry, notifier)
    }

    #[tokio::test]
    async fn valid_percentage_is_appended_and_selected() {
        let (handler, _, notifier) = setup(false, CommitPolicy::Optimistic);
        let mut session = ready_session();
        session.toggle_dropdown(FieldKey::Percentage).unwrap();
        session.begin_add_new(AddNewField::Percentage).unwrap();
        session.set_draft(AddNewField::Percentage, "57.5").unwrap();

        let outcome = handler.handle(&mut session, AddNewField::Percentage).await.unwrap();

        assert_eq!(outcome, AddOptionOutcome { id: OptionId::new(8), persisted: true });
        assert_eq!(
            session.selection().percentage.as_ref().map(|o| o.value),
            Some(PercentValue::new(57.5))
        );
        assert!(!session.draft(AddNewField::Percentage).open);
        assert_eq!(session.open_dropdown(), None);
        assert!(!session.loading().is_loading(Resource::Percentages));
        assert_eq!(notifier.shown(), vec![Notification::success("Percentage added successfully!")]);
    }

    #[tokio::test]
    async fn invalid_percentage_is_notified_and_not_persisted() {
        let (handler, registry, notifier) = setup(false, CommitPolicy::Optimistic);
        let mut session = ready_session();
        session.set_draft(AddNewField::Percentage, "101").unwrap();

        let err = handler.handle(&mut session, AddNewField::Percentage).await.unwrap_err();

        assert!(matches!(err, AddOptionError::InvalidPercentage(_)));
        assert!(registry.calls.lock().unwrap().is_empty());
        assert_eq!(
            notifier.shown(),
            vec![Notification::error("Please enter a valid percentage between 0 and 100")]
        );
        assert_eq!(session.cache().percentages.len(), 7);
    }

    #[tokio::test]
    async fn blank_name_is_ignored_silently() {
        let (handler, _, notifier) = setup(false, CommitPolicy::Optimistic);
        let mut session = ready_session();
        session.set_draft(AddNewField::DiscountName, "   ").unwrap();

        let err = handler.handle(&mut session, AddNewField::DiscountName).await.unwrap_err();

        assert!(matches!(err, AddOptionError::EmptyInput { .. }));
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test]
    async fn optimistic_policy_commits_despite_failure() {
        let (handler, _, notifier) = setup(true, CommitPolicy::Optimistic);
        let mut session = ready_session();
        session.set_draft(AddNewField::DiscountName, "Summer Sale").unwrap();

        let outcome = handler.handle(&mut session, AddNewField::DiscountName).await.unwrap();

        assert!(!outcome.persisted);
        assert_eq!(session.cache().discount_names.len(), 3);
        assert_eq!(
            session.selection().discount_name.as_ref().map(|o| o.value.as_str()),
            Some("Summer Sale")
        );
        assert_eq!(notifier.shown(), vec![Notification::error("Failed to add discount name")]);
    }

    #[tokio::test]
    async fn rollback_policy_leaves_state_untouched() {
        let (handler, _, notifier) = setup(true, CommitPolicy::RollbackOnFailure);
        let mut session = ready_session();
        session.begin_add_new(AddNewField::DiscountName).unwrap();
        session.set_draft(AddNewField::DiscountName, "Summer Sale").unwrap();

        let err = handler.handle(&mut session, AddNewField::DiscountName).await.unwrap_err();

        assert!(matches!(err, AddOptionError::PersistenceFailed { .. }));
        assert_eq!(session.cache().discount_names.len(), 2);
        assert!(session.selection().discount_name.is_none());
        assert_eq!(session.draft(AddNewField::DiscountName).text, "Summer Sale");
        assert_eq!(notifier.shown(), vec![Notification::error("Failed to add discount name")]);
    }

    #[tokio::test]
    async fn refused_while_loading() {
        let (handler, _, _) = setup(false, CommitPolicy::Optimistic);
        let mut session = FormSession::new(DiscountId::new(1), "Rs");
        let err = handler.handle(&mut session, AddNewField::Duration).await.unwrap_err();
        assert_eq!(err, AddOptionError::NotReady(EditorStatus::Loading));
    }

    #[test]
    fn policy_follows_flag() {
        assert_eq!(CommitPolicy::from_flag(true), CommitPolicy::Optimistic);
        assert_eq!(CommitPolicy::from_flag(false), CommitPolicy::RollbackOnFailure);
    }
}
