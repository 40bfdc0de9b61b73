//! Update payload sent to the catalog.

use serde::{Deserialize, Serialize};

use crate::domain::discount::{DiscountScope, LoyaltyTier};
use crate::domain::foundation::{DiscountId, Timestamp};

use super::validation::{ScopeChoice, ValidatedSelection, ValueChoice};

/// Body of `updateDiscount`.
///
/// `itemId` and `categoryId` are always present; the one not matching the
/// scope is an explicit `null`. Percentage and amount are mutually
/// exclusive and omitted when unset. The amount's currency is not sent;
/// the service applies its own unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub id: DiscountId,
    pub name: String,
    #[serde(rename = "type")]
    pub scope: DiscountScope,
    pub is_active: bool,
    pub duration: String,
    pub start_date: Timestamp,
    pub item_id: Option<u64>,
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_type: Option<LoyaltyTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl UpdatePayload {
    /// Builds the payload; `start_date` is the record's original creation
    /// timestamp, carried over unchanged.
    pub fn build(id: DiscountId, selection: &ValidatedSelection<'_>, start_date: Timestamp) -> Self {
        let (scope, item_id, category_id) = match selection.scope {
            ScopeChoice::Item(item) => (DiscountScope::Item, Some(item.id.value()), None),
            ScopeChoice::Category(category) => {
                (DiscountScope::Category, None, Some(category.id.value()))
            }
            ScopeChoice::Loyalty(_) => (DiscountScope::Loyalty, None, None),
        };

        let (percentage, amount) = match selection.value {
            ValueChoice::Percentage(option) => (Some(option.value.value()), None),
            ValueChoice::Amount(option) => (None, Some(option.value.value)),
        };

        Self {
            id,
            name: selection.name.value.clone(),
            scope,
            is_active: selection.enabled,
            duration: selection.duration.value.clone(),
            start_date,
            item_id,
            category_id,
            loyalty_type: selection.tier.map(|tier| tier.value),
            percentage,
            amount,
        }
    }
}
