//! Keys naming the form's selectable fields and async resources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven independent selectable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    DiscountName,
    Item,
    Category,
    Percentage,
    Amount,
    LoyaltyTier,
    Duration,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::DiscountName,
        FieldKey::Item,
        FieldKey::Category,
        FieldKey::Percentage,
        FieldKey::Amount,
        FieldKey::LoyaltyTier,
        FieldKey::Duration,
    ];

    /// The field that blocks this one while it holds a selection.
    pub fn exclusive_with(&self) -> Option<FieldKey> {
        match self {
            FieldKey::Percentage => Some(FieldKey::Amount),
            FieldKey::Amount => Some(FieldKey::Percentage),
            _ => None,
        }
    }

    /// Async resource that feeds this field's list. Tiers are fixed.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            FieldKey::DiscountName => Some(Resource::DiscountNames),
            FieldKey::Item => Some(Resource::Items),
            FieldKey::Category => Some(Resource::Categories),
            FieldKey::Percentage => Some(Resource::Percentages),
            FieldKey::Amount => Some(Resource::Amounts),
            FieldKey::LoyaltyTier => None,
            FieldKey::Duration => Some(Resource::Durations),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKey::DiscountName => "discount name",
            FieldKey::Item => "item",
            FieldKey::Category => "category",
            FieldKey::Percentage => "percentage",
            FieldKey::Amount => "amount",
            FieldKey::LoyaltyTier => "loyalty tier",
            FieldKey::Duration => "duration",
        };
        write!(f, "{}", s)
    }
}

/// Fields that accept user-entered new options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddNewField {
    DiscountName,
    Percentage,
    Amount,
    Duration,
}

impl AddNewField {
    pub fn field(&self) -> FieldKey {
        match self {
            AddNewField::DiscountName => FieldKey::DiscountName,
            AddNewField::Percentage => FieldKey::Percentage,
            AddNewField::Amount => FieldKey::Amount,
            AddNewField::Duration => FieldKey::Duration,
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            AddNewField::DiscountName => Resource::DiscountNames,
            AddNewField::Percentage => Resource::Percentages,
            AddNewField::Amount => Resource::Amounts,
            AddNewField::Duration => Resource::Durations,
        }
    }

    pub fn success_message(&self) -> String {
        let noun = self.field().to_string();
        let mut chars = noun.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{} added successfully!", capitalized)
    }

    pub fn failure_message(&self) -> String {
        format!("Failed to add {}", self.field())
    }
}

impl fmt::Display for AddNewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// Async resources tracked by [`super::LoadingFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Record,
    DiscountNames,
    Items,
    Categories,
    Percentages,
    Amounts,
    Durations,
}
