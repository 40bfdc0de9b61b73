//! Discount record as stored by the remote catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DiscountId, Timestamp, ValidationError};

/// Which dimension a discount applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountScope {
    #[default]
    #[serde(alias = "item", alias = "Item")]
    Item,
    #[serde(alias = "category", alias = "Category")]
    Category,
    #[serde(alias = "loyalty", alias = "Loyalty")]
    Loyalty,
}

impl DiscountScope {
    /// Upper-case wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            DiscountScope::Item => "ITEM",
            DiscountScope::Category => "CATEGORY",
            DiscountScope::Loyalty => "LOYALTY",
        }
    }
}

impl fmt::Display for DiscountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Loyalty tier a discount can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoyaltyTier {
    Gold,
    Silver,
    Bronze,
}

impl LoyaltyTier {
    /// All tiers in display order.
    pub const ALL: [LoyaltyTier; 3] = [LoyaltyTier::Gold, LoyaltyTier::Silver, LoyaltyTier::Bronze];

    /// Display name ("Gold").
    pub fn name(&self) -> &'static str {
        match self {
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Bronze => "Bronze",
        }
    }

    /// Upper-case wire tag ("GOLD").
    pub fn tag(&self) -> &'static str {
        match self {
            LoyaltyTier::Gold => "GOLD",
            LoyaltyTier::Silver => "SILVER",
            LoyaltyTier::Bronze => "BRONZE",
        }
    }

    /// Matches a stored tag case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A discount as returned by `getDiscountById`.
///
/// Fields are optional on the wire; [`DiscountRecord::check_invariants`]
/// reports records that break the one-reference / one-value shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRecord {
    pub id: DiscountId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub scope: DiscountScope,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub item_id: Option<u64>,
    #[serde(default)]
    pub category_id: Option<u64>,
    #[serde(default)]
    pub loyalty_type: Option<String>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
}

impl DiscountRecord {
    /// Creates a record with only identity, name and scope set.
    pub fn new(id: DiscountId, name: impl Into<String>, scope: DiscountScope) -> Self {
        Self {
            id,
            name: name.into(),
            scope,
            is_active: false,
            item_id: None,
            category_id: None,
            loyalty_type: None,
            percentage: None,
            amount: None,
            currency: None,
            duration: None,
            start_date: None,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn with_item(mut self, item_id: u64) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_loyalty(mut self, tier: LoyaltyTier) -> Self {
        self.loyalty_type = Some(tier.tag().to_string());
        self
    }

    pub fn with_percentage(mut self, percentage: f64) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_amount(mut self, amount: f64, currency: impl Into<String>) -> Self {
        self.amount = Some(amount);
        self.currency = Some(currency.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_start_date(mut self, start_date: Timestamp) -> Self {
        self.start_date = Some(start_date);
        self
    }

    // The service stores `0` and `""` for fields it considers unset.

    pub fn stored_item_id(&self) -> Option<u64> {
        self.item_id.filter(|id| *id != 0)
    }

    pub fn stored_category_id(&self) -> Option<u64> {
        self.category_id.filter(|id| *id != 0)
    }

    pub fn stored_loyalty_type(&self) -> Option<&str> {
        self.loyalty_type.as_deref().filter(|tag| !tag.trim().is_empty())
    }

    pub fn stored_percentage(&self) -> Option<f64> {
        self.percentage.filter(|value| *value != 0.0)
    }

    pub fn stored_amount(&self) -> Option<f64> {
        self.amount.filter(|value| *value != 0.0)
    }

    /// Checks that exactly one scope reference matching the scope tag is
    /// set, and exactly one of percentage/amount. Zero and blank values
    /// count as unset.
    pub fn check_invariants(&self) -> Result<(), ValidationError> {
        let references = [
            self.stored_item_id().is_some(),
            self.stored_category_id().is_some(),
            self.stored_loyalty_type().is_some(),
        ];
        let expected = match self.scope {
            DiscountScope::Item => 0,
            DiscountScope::Category => 1,
            DiscountScope::Loyalty => 2,
        };
        if !references[expected] {
            return Err(ValidationError::invalid_format(
                "scope",
                format!("{} discount has no {} reference", self.scope, self.scope.tag().to_lowercase()),
            ));
        }
        if references.iter().filter(|set| **set).count() != 1 {
            return Err(ValidationError::invalid_format(
                "scope",
                "more than one scope reference is set",
            ));
        }
        match (self.stored_percentage(), self.stored_amount()) {
            (Some(_), Some(_)) => Err(ValidationError::invalid_format(
                "value",
                "both percentage and amount are set",
            )),
            (None, None) => Err(ValidationError::empty_field("value")),
            _ => Ok(()),
        }
    }
}
