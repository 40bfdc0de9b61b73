//! In-memory discount catalog.
//!
//! Backs the demo binary and tests. Clones share state, so a test can keep
//! a handle to inspect calls after giving the catalog to an editor.
//!
//! # Features
//!
//! - Seeded products, categories, discount names and records
//! - Simulated latency per call
//! - Error injection per operation
//! - Call and update tracking for verification

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::discount::DiscountRecord;
use crate::domain::form::UpdatePayload;
use crate::domain::foundation::{DiscountId, DomainError, ErrorCode};
use crate::ports::{DiscountCatalog, NamedRef, UpdateResponse};

/// Operations of [`DiscountCatalog`], for error injection and tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOperation {
    FetchProductNames,
    FetchCategoryNames,
    FetchDiscountNames,
    GetDiscount,
    UpdateDiscount,
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<NamedRef>,
    categories: Vec<NamedRef>,
    discount_names: Vec<String>,
    records: HashMap<DiscountId, DiscountRecord>,
    failures: HashMap<CatalogOperation, DomainError>,
    update_response: Option<UpdateResponse>,
    calls: Vec<CatalogOperation>,
    updates: Vec<(DiscountId, UpdatePayload)>,
}

/// Discount catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscountCatalog {
    state: Arc<Mutex<CatalogState>>,
    delay: Duration,
}

impl InMemoryDiscountCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, products: Vec<NamedRef>) -> Self {
        self.lock().products = products;
        self
    }

    pub fn with_categories(self, categories: Vec<NamedRef>) -> Self {
        self.lock().categories = categories;
        self
    }

    pub fn with_discount_names(self, names: Vec<String>) -> Self {
        self.lock().discount_names = names;
        self
    }

    pub fn with_record(self, record: DiscountRecord) -> Self {
        self.lock().records.insert(record.id, record);
        self
    }

    /// Makes every call to `operation` fail with `error`.
    pub fn with_failure(self, operation: CatalogOperation, error: DomainError) -> Self {
        self.fail(operation, error);
        self
    }

    /// Like [`Self::with_failure`], for a catalog already handed out.
    pub fn fail(&self, operation: CatalogOperation, error: DomainError) {
        self.lock().failures.insert(operation, error);
    }

    /// Answers updates with `response` instead of echoing the stored record.
    pub fn with_update_response(self, response: UpdateResponse) -> Self {
        self.lock().update_response = Some(response);
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<CatalogOperation> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, operation: CatalogOperation) -> usize {
        self.lock().calls.iter().filter(|c| **c == operation).count()
    }

    /// Payloads received by `update_discount`, in order.
    pub fn updates(&self) -> Vec<(DiscountId, UpdatePayload)> {
        self.lock().updates.clone()
    }

    pub fn record(&self, id: DiscountId) -> Option<DiscountRecord> {
        self.lock().records.get(&id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the call, waits out the latency, then applies any injected failure.
    async fn enter(&self, operation: CatalogOperation) -> Result<(), DomainError> {
        self.lock().calls.push(operation);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        match self.lock().failures.get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DiscountCatalog for InMemoryDiscountCatalog {
    async fn fetch_product_names(&self) -> Result<Vec<NamedRef>, DomainError> {
        self.enter(CatalogOperation::FetchProductNames).await?;
        Ok(self.lock().products.clone())
    }

    async fn fetch_category_names(&self) -> Result<Vec<NamedRef>, DomainError> {
        self.enter(CatalogOperation::FetchCategoryNames).await?;
        Ok(self.lock().categories.clone())
    }

    async fn fetch_discount_names(&self) -> Result<Vec<String>, DomainError> {
        self.enter(CatalogOperation::FetchDiscountNames).await?;
        Ok(self.lock().discount_names.clone())
    }

    async fn get_discount_by_id(&self, id: DiscountId) -> Result<DiscountRecord, DomainError> {
        self.enter(CatalogOperation::GetDiscount).await?;
        self.lock().records.get(&id).cloned().ok_or_else(|| {
            DomainError::new(ErrorCode::DiscountNotFound, format!("Discount {} not found", id))
        })
    }

    async fn update_discount(
        &self,
        id: DiscountId,
        payload: &UpdatePayload,
    ) -> Result<UpdateResponse, DomainError> {
        self.enter(CatalogOperation::UpdateDiscount).await?;
        let mut state = self.lock();
        state.updates.push((id, payload.clone()));
        if let Some(response) = state.update_response.clone() {
            return Ok(response);
        }
        if !state.records.contains_key(&id) {
            return Err(DomainError::new(
                ErrorCode::DiscountNotFound,
                format!("Discount {} not found", id),
            ));
        }
        let record = record_from_payload(payload, state.records.get(&id));
        state.records.insert(id, record.clone());
        Ok(UpdateResponse::Applied(record))
    }
}

/// The payload carries no currency; an amount keeps the stored record's unit.
fn record_from_payload(payload: &UpdatePayload, previous: Option<&DiscountRecord>) -> DiscountRecord {
    DiscountRecord {
        id: payload.id,
        name: payload.name.clone(),
        scope: payload.scope,
        is_active: payload.is_active,
        item_id: payload.item_id,
        category_id: payload.category_id,
        loyalty_type: payload.loyalty_type.map(|tier| tier.tag().to_string()),
        percentage: payload.percentage,
        amount: payload.amount,
        currency: payload
            .amount
            .and(previous.and_then(|record| record.currency.clone())),
        duration: Some(payload.duration.clone()),
        start_date: Some(payload.start_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::discount::DiscountScope;
    use crate::domain::foundation::Timestamp;

    fn payload(id: DiscountId) -> UpdatePayload {
        UpdatePayload {
            id,
            name: "Weekly".to_string(),
            scope: DiscountScope::Item,
            is_active: true,
            duration: "1 Day".to_string(),
            start_date: Timestamp::now(),
            item_id: Some(2),
            category_id: None,
            loyalty_type: None,
            percentage: Some(10.0),
            amount: None,
        }
    }

    #[tokio::test]
    async fn returns_seeded_data_and_tracks_calls() {
        let catalog = InMemoryDiscountCatalog::new()
            .with_products(vec![NamedRef::new(1, "Tea")])
            .with_discount_names(vec!["Weekly".to_string()]);

        assert_eq!(catalog.fetch_product_names().await.unwrap().len(), 1);
        assert_eq!(catalog.fetch_discount_names().await.unwrap(), vec!["Weekly"]);
        assert_eq!(
            catalog.calls(),
            vec![
                CatalogOperation::FetchProductNames,
                CatalogOperation::FetchDiscountNames
            ]
        );
    }

    #[tokio::test]
    async fn unknown_discount_is_not_found() {
        let catalog = InMemoryDiscountCatalog::new();
        let err = catalog.get_discount_by_id(DiscountId::new(5)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DiscountNotFound);
    }

    #[tokio::test]
    async fn injected_failure_is_returned() {
        let catalog = InMemoryDiscountCatalog::new().with_failure(
            CatalogOperation::FetchCategoryNames,
            DomainError::new(ErrorCode::NetworkError, "down"),
        );
        let err = catalog.fetch_category_names().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(catalog.call_count(CatalogOperation::FetchCategoryNames), 1);
    }

    #[tokio::test]
    async fn update_stores_record_and_shares_state_across_clones() {
        let id = DiscountId::new(3);
        let catalog = InMemoryDiscountCatalog::new()
            .with_record(DiscountRecord::new(id, "Old", DiscountScope::Item));
        let handle = catalog.clone();

        let response = catalog.update_discount(id, &payload(id)).await.unwrap();

        assert!(response.is_success());
        assert_eq!(handle.updates().len(), 1);
        assert_eq!(handle.record(id).unwrap().name, "Weekly");
    }

    #[tokio::test]
    async fn configured_update_response_wins() {
        let id = DiscountId::new(3);
        let catalog = InMemoryDiscountCatalog::new()
            .with_update_response(UpdateResponse::Acknowledged(false));
        let response = catalog.update_discount(id, &payload(id)).await.unwrap();
        assert!(!response.is_success());
    }
}
