//! LoadDiscountHandler - fetches a discount and its lookup lists.
//!
//! Phase one fetches discount names, products and categories together,
//! then the record. Phase two fetches percentages, amounts and durations
//! together. Once everything has settled the record is reconciled against
//! the lists. A failed list fetch falls back to the built-in list; a failed
//! record fetch ends in the not-found view.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::foundation::{DiscountId, DomainError, ErrorCode, OptionId};
use crate::domain::form::{reconcile, EditorStatus, FieldKey, FormSession, Notification, Resource};
use crate::domain::lookup::{defaults, LookupList, LookupOption, PercentValue};
use crate::ports::{DiscountCatalog, NamedRef, Notifier, ValueOptionSource};

use super::cancellation::CancellationSignal;

/// Shown when the record itself cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load discount data. Please try again.";

/// How a load ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Ready for editing; lists fields whose stored reference matched nothing.
    Loaded { unresolved: Vec<FieldKey> },
    /// The record could not be fetched.
    NotFound,
    /// Cancelled before finishing; the session was left as it was.
    Cancelled,
}

/// Handler for loading a discount into a fresh session.
pub struct LoadDiscountHandler {
    catalog: Arc<dyn DiscountCatalog>,
    values: Arc<dyn ValueOptionSource>,
    notifier: Arc<dyn Notifier>,
}

impl LoadDiscountHandler {
    pub fn new(
        catalog: Arc<dyn DiscountCatalog>,
        values: Arc<dyn ValueOptionSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            values,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        session: &mut FormSession,
        cancel: &CancellationSignal,
    ) -> Result<LoadOutcome, DomainError> {
        if session.status() != EditorStatus::Loading {
            return Err(DomainError::new(
                ErrorCode::EditorNotReady,
                format!("Cannot load a session that is {:?}", session.status()),
            ));
        }
        let discount_id = session.discount_id();
        info!(discount_id = %discount_id, session_id = %session.id(), "Loading discount");

        // 1. Names, products and categories together
        for resource in [Resource::DiscountNames, Resource::Items, Resource::Categories] {
            session.set_loading(resource, true);
        }
        let (names, products, categories) = tokio::join!(
            self.catalog.fetch_discount_names(),
            self.catalog.fetch_product_names(),
            self.catalog.fetch_category_names(),
        );
        if cancel.is_cancelled() {
            return Ok(cancelled(discount_id));
        }

        let cache = session.cache_mut();
        cache.discount_names.replace(or_default(
            names.map(LookupList::from_values),
            "discount names",
            defaults::discount_names,
        ));
        cache.items.replace(or_default(
            products.map(reference_list),
            "products",
            defaults::items,
        ));
        cache.categories.replace(or_default(
            categories.map(reference_list),
            "categories",
            defaults::categories,
        ));
        for resource in [Resource::DiscountNames, Resource::Items, Resource::Categories] {
            session.set_loading(resource, false);
        }

        // 2. The record
        let record = self.catalog.get_discount_by_id(discount_id).await;
        if cancel.is_cancelled() {
            return Ok(cancelled(discount_id));
        }
        session.set_loading(Resource::Record, false);
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                error!(discount_id = %discount_id, error = %e, "Error loading discount data");
                self.notifier.notify(Notification::error(LOAD_FAILED_MESSAGE));
                session.transition(EditorStatus::NotFound)?;
                return Ok(LoadOutcome::NotFound);
            }
        };
        if let Err(e) = record.check_invariants() {
            warn!(discount_id = %discount_id, error = %e, "Loaded discount is malformed");
        }
        session.install_record(record);

        // 3. Percentages, amounts and durations together
        for resource in [Resource::Percentages, Resource::Amounts, Resource::Durations] {
            session.set_loading(resource, true);
        }
        let currency = session.currency().to_string();
        let (percentages, amounts, durations) = tokio::join!(
            self.values.fetch_percentages(),
            self.values.fetch_amounts(&currency),
            self.values.fetch_durations(),
        );
        if cancel.is_cancelled() {
            return Ok(cancelled(discount_id));
        }

        let cache = session.cache_mut();
        cache.percentages.replace(or_default(
            percentages.map(LookupList::<PercentValue>::from_values),
            "percentages",
            defaults::percentages,
        ));
        cache.amounts.replace(or_default(
            amounts.map(LookupList::from_values),
            "amounts",
            || defaults::amounts(&currency),
        ));
        cache.durations.replace(or_default(
            durations.map(LookupList::from_values),
            "durations",
            defaults::durations,
        ));
        for resource in [Resource::Percentages, Resource::Amounts, Resource::Durations] {
            session.set_loading(resource, false);
        }

        // 4. Reconcile the record against the settled lists
        let Some(record) = session.original() else {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Loaded record missing from session",
            ));
        };
        let reconciliation = reconcile(record, session.cache(), &currency);
        for field in &reconciliation.unresolved {
            warn!(discount_id = %discount_id, field = %field, "Stored reference not found in lookup list");
        }
        session.restore_selection(reconciliation.selection);
        session.transition(EditorStatus::Ready)?;
        debug!(discount_id = %discount_id, "Discount loaded");

        Ok(LoadOutcome::Loaded {
            unresolved: reconciliation.unresolved,
        })
    }
}

fn cancelled(discount_id: DiscountId) -> LoadOutcome {
    info!(discount_id = %discount_id, "Discount load cancelled");
    LoadOutcome::Cancelled
}

fn reference_list(refs: Vec<NamedRef>) -> LookupList<String> {
    LookupList::from_options(
        refs.into_iter()
            .map(|r| LookupOption::new(OptionId::new(r.id), r.name))
            .collect(),
    )
}

fn or_default<T>(
    fetched: Result<LookupList<T>, DomainError>,
    what: &str,
    fallback: impl FnOnce() -> LookupList<T>,
) -> LookupList<T> {
    match fetched {
        Ok(list) => list,
        Err(e) => {
            error!(error = %e, "Error fetching {}; using defaults", what);
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discount::{DiscountRecord, DiscountScope, LoyaltyTier};
    use crate::domain::lookup::Money;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use super::super::cancellation::CancellationHandle;

    struct MockCatalog {
        record: Option<DiscountRecord>,
        fail_lists: bool,
        cancel_on_record: Option<CancellationHandle>,
    }

    impl MockCatalog {
        fn with_record(record: DiscountRecord) -> Self {
            Self {
                record: Some(record),
                fail_lists: false,
                cancel_on_record: None,
            }
        }
    }

    fn network_error() -> DomainError {
        DomainError::new(ErrorCode::NetworkError, "offline")
    }

    #[async_trait]
    impl DiscountCatalog for MockCatalog {
        async fn fetch_product_names(&self) -> Result<Vec<NamedRef>, DomainError> {
            if self.fail_lists {
                return Err(network_error());
            }
            Ok(vec![NamedRef::new(10, "Tea"), NamedRef::new(11, "Coffee")])
        }

        async fn fetch_category_names(&self) -> Result<Vec<NamedRef>, DomainError> {
            if self.fail_lists {
                return Err(network_error());
            }
            Ok(vec![NamedRef::new(20, "Drinks")])
        }

        async fn fetch_discount_names(&self) -> Result<Vec<String>, DomainError> {
            if self.fail_lists {
                return Err(network_error());
            }
            Ok(vec!["Happy Hour".to_string()])
        }

        async fn get_discount_by_id(&self, id: DiscountId) -> Result<DiscountRecord, DomainError> {
            if let Some(handle) = &self.cancel_on_record {
                handle.cancel();
            }
            self.record
                .clone()
                .ok_or_else(|| DomainError::new(ErrorCode::DiscountNotFound, format!("{} missing", id)))
        }

        async fn update_discount(
            &self,
            _id: DiscountId,
            _payload: &crate::domain::form::UpdatePayload,
        ) -> Result<crate::ports::UpdateResponse, DomainError> {
            Ok(crate::ports::UpdateResponse::Acknowledged(true))
        }
    }

    struct MockValues {
        fail: bool,
    }

    #[async_trait]
    impl ValueOptionSource for MockValues {
        async fn fetch_percentages(&self) -> Result<Vec<PercentValue>, DomainError> {
            if self.fail {
                return Err(network_error());
            }
            Ok(vec![PercentValue::new(5.0), PercentValue::new(15.0)])
        }

        async fn fetch_amounts(&self, currency: &str) -> Result<Vec<Money>, DomainError> {
            if self.fail {
                return Err(network_error());
            }
            Ok(vec![Money::new(100.0, currency)])
        }

        async fn fetch_durations(&self) -> Result<Vec<String>, DomainError> {
            if self.fail {
                return Err(network_error());
            }
            Ok(vec!["1 Day".to_string()])
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

    fn handler(catalog: MockCatalog, fail_values: bool) -> (LoadDiscountHandler, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = LoadDiscountHandler::new(
            Arc::new(catalog),
            Arc::new(MockValues { fail: fail_values }),
            notifier.clone(),
        );
        (handler, notifier)
    }

    fn item_record() -> DiscountRecord {
        DiscountRecord::new(DiscountId::new(42), "Happy Hour", DiscountScope::Item)
            .with_active(true)
            .with_item(11)
            .with_percentage(10.0)
            .with_duration("1 Day")
    }

    #[tokio::test]
    async fn loads_and_reconciles_record() {
        let (handler, notifier) = handler(MockCatalog::with_record(item_record()), false);
        let mut session = FormSession::new(DiscountId::new(42), "Rs");
        let owner = CancellationHandle::new();

        let outcome = handler.handle(&mut session, &owner.signal()).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Loaded { unresolved: vec![] });
        assert_eq!(session.status(), EditorStatus::Ready);
        assert!(!session.loading().any());
        let selection = session.selection();
        assert_eq!(selection.item.as_ref().map(|o| o.value.as_str()), Some("Coffee"));
        assert_eq!(selection.discount_name.as_ref().map(|o| o.id), Some(OptionId::new(1)));
        assert!(selection.enabled);
        // 10% is not offered; a placeholder is selected without joining the list.
        let percentage = selection.percentage.as_ref().unwrap();
        assert_eq!(percentage.id, OptionId::new(3));
        assert_eq!(session.cache().percentages.len(), 2);
        assert!(notifier.shown.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_lists_fall_back_to_defaults() {
        let catalog = MockCatalog {
            fail_lists: true,
            ..MockCatalog::with_record(item_record())
        };
        let (handler, _) = handler(catalog, true);
        let mut session = FormSession::new(DiscountId::new(42), "Rs");
        let owner = CancellationHandle::new();

        let outcome = handler.handle(&mut session, &owner.signal()).await.unwrap();

        // Product 11 is not among the default products.
        assert_eq!(outcome, LoadOutcome::Loaded { unresolved: vec![FieldKey::Item] });
        assert_eq!(session.cache().items, defaults::items());
        assert_eq!(session.cache().durations, defaults::durations());
        assert_eq!(session.cache().amounts, defaults::amounts("Rs"));
        assert_eq!(session.selection().percentage.as_ref().map(|o| o.id), Some(OptionId::new(4)));
    }

    #[tokio::test]
    async fn missing_record_ends_in_not_found() {
        let catalog = MockCatalog {
            record: None,
            fail_lists: false,
            cancel_on_record: None,
        };
        let (handler, notifier) = handler(catalog, false);
        let mut session = FormSession::new(DiscountId::new(7), "Rs");
        let owner = CancellationHandle::new();

        let outcome = handler.handle(&mut session, &owner.signal()).await.unwrap();

        assert_eq!(outcome, LoadOutcome::NotFound);
        assert_eq!(session.status(), EditorStatus::NotFound);
        assert!(!session.loading().is_loading(Resource::Record));
        assert_eq!(
            notifier.shown.lock().unwrap().clone(),
            vec![Notification::error(LOAD_FAILED_MESSAGE)]
        );
    }

    #[tokio::test]
    async fn cancellation_stops_before_mutating() {
        let owner = CancellationHandle::new();
        let catalog = MockCatalog {
            cancel_on_record: Some(owner.clone()),
            ..MockCatalog::with_record(item_record())
        };
        let (handler, _) = handler(catalog, false);
        let mut session = FormSession::new(DiscountId::new(42), "Rs");

        let outcome = handler.handle(&mut session, &owner.signal()).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert_eq!(session.status(), EditorStatus::Loading);
        assert!(session.original().is_none());
    }

    #[tokio::test]
    async fn loyalty_record_selects_tier() {
        let record = DiscountRecord::new(DiscountId::new(5), "Happy Hour", DiscountScope::Loyalty)
            .with_loyalty(LoyaltyTier::Bronze)
            .with_amount(100.0, "Rs")
            .with_duration("1 Day");
        let (handler, _) = handler(MockCatalog::with_record(record), false);
        let mut session = FormSession::new(DiscountId::new(5), "Rs");
        let owner = CancellationHandle::new();

        handler.handle(&mut session, &owner.signal()).await.unwrap();

        let selection = session.selection();
        assert_eq!(selection.tier.as_ref().map(|o| o.id), Some(OptionId::new(3)));
        assert_eq!(selection.amount.as_ref().map(|o| o.id), Some(OptionId::new(1)));
    }

    #[tokio::test]
    async fn loading_twice_is_rejected() {
        let (handler, _) = handler(MockCatalog::with_record(item_record()), false);
        let mut session = FormSession::new(DiscountId::new(42), "Rs");
        let owner = CancellationHandle::new();
        handler.handle(&mut session, &owner.signal()).await.unwrap();

        let err = handler.handle(&mut session, &owner.signal()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EditorNotReady);
    }
}
