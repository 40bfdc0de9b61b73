//! Discount catalog port.
//!
//! The remote service that owns discounts and the product/category
//! reference data the editor picks from.
//!
//! # Errors
//!
//! - `DiscountNotFound` when `get_discount_by_id` has no such record
//! - `UpdateRejected` when the service refuses an update; the service's own
//!   message travels in the `remote_message` detail
//! - `NetworkError` / `Timeout` for transport failures

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::discount::DiscountRecord;
use crate::domain::foundation::{DiscountId, DomainError};
use crate::domain::form::UpdatePayload;

/// Remote discount catalog.
#[async_trait]
pub trait DiscountCatalog: Send + Sync {
    /// Products a discount can target, with their remote ids.
    async fn fetch_product_names(&self) -> Result<Vec<NamedRef>, DomainError>;

    /// Categories a discount can target, with their remote ids.
    async fn fetch_category_names(&self) -> Result<Vec<NamedRef>, DomainError>;

    /// Names already used by discounts.
    async fn fetch_discount_names(&self) -> Result<Vec<String>, DomainError>;

    /// Loads one discount.
    async fn get_discount_by_id(&self, id: DiscountId) -> Result<DiscountRecord, DomainError>;

    /// Replaces a discount with `payload`.
    async fn update_discount(
        &self,
        id: DiscountId,
        payload: &UpdatePayload,
    ) -> Result<UpdateResponse, DomainError>;
}

/// A remote entity reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// What `update_discount` answered.
///
/// Services either echo the stored record or reply with a bare boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateResponse {
    Applied(DiscountRecord),
    Acknowledged(bool),
}

impl UpdateResponse {
    /// Interprets a successful reply's body.
    ///
    /// An empty body (e.g. `204 No Content`) or text that is not JSON is an
    /// acknowledgement. JSON is judged by its truthiness: `false`, `null`,
    /// `0` and `""` are refusals, anything else is accepted, and an object
    /// that parses as a record is kept as the applied record.
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return UpdateResponse::Acknowledged(true);
        }
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => UpdateResponse::Acknowledged(true),
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Null => UpdateResponse::Acknowledged(false),
            Value::Bool(ok) => UpdateResponse::Acknowledged(ok),
            Value::Number(n) => UpdateResponse::Acknowledged(n.as_f64().is_some_and(|n| n != 0.0)),
            Value::String(s) => UpdateResponse::Acknowledged(!s.is_empty()),
            Value::Array(_) => UpdateResponse::Acknowledged(true),
            Value::Object(map) => match serde_json::from_value::<DiscountRecord>(Value::Object(map)) {
                Ok(record) => UpdateResponse::Applied(record),
                Err(_) => UpdateResponse::Acknowledged(true),
            },
        }
    }

    /// Truthy responses count as success.
    pub fn is_success(&self) -> bool {
        match self {
            UpdateResponse::Applied(_) => true,
            UpdateResponse::Acknowledged(ok) => *ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_responses_decode_as_acknowledgements() {
        let response: UpdateResponse = serde_json::from_str("false").unwrap();
        assert_eq!(response, UpdateResponse::Acknowledged(false));
        assert!(!response.is_success());
    }

    #[test]
    fn bodies_are_judged_by_truthiness() {
        assert_eq!(UpdateResponse::from_body(""), UpdateResponse::Acknowledged(true));
        assert_eq!(
            UpdateResponse::from_body(r#"{"success": true}"#),
            UpdateResponse::Acknowledged(true)
        );
        assert_eq!(UpdateResponse::from_body("OK"), UpdateResponse::Acknowledged(true));
        assert_eq!(UpdateResponse::from_body("1"), UpdateResponse::Acknowledged(true));

        for refusal in ["false", "null", "0", "\"\""] {
            assert!(
                !UpdateResponse::from_body(refusal).is_success(),
                "expected {} to be a refusal",
                refusal
            );
        }
    }

    #[test]
    fn record_body_is_kept_as_applied_record() {
        let response = UpdateResponse::from_body(r#"{"id": 3, "name": "Weekly", "type": "ITEM"}"#);
        assert!(matches!(response, UpdateResponse::Applied(ref record) if record.name == "Weekly"));
        assert!(response.is_success());
    }

    #[test]
    fn record_responses_count_as_success() {
        let response: UpdateResponse =
            serde_json::from_str(r#"{"id": 3, "name": "Weekly", "type": "ITEM"}"#).unwrap();
        assert!(matches!(response, UpdateResponse::Applied(_)));
        assert!(response.is_success());
    }
}
