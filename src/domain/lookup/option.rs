//! Selectable lookup entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::discount::LoyaltyTier;
use crate::domain::foundation::OptionId;

/// A value that can sit in a lookup list.
pub trait OptionValue: Clone + PartialEq + fmt::Debug {
    /// Text shown for the entry.
    fn label(&self) -> String;

    /// Text the search box is matched against.
    fn search_text(&self) -> String {
        self.label()
    }
}

impl OptionValue for String {
    fn label(&self) -> String {
        self.clone()
    }
}

impl OptionValue for LoyaltyTier {
    fn label(&self) -> String {
        self.name().to_string()
    }
}

/// Percentage discount value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentValue(f64);

impl PercentValue {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl OptionValue for PercentValue {
    fn label(&self) -> String {
        format!("{}%", self.0)
    }

    fn search_text(&self) -> String {
        self.0.to_string()
    }
}

/// Fixed amount with its currency unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub value: f64,
    pub currency: String,
}

impl Money {
    pub fn new(value: f64, currency: impl Into<String>) -> Self {
        Self {
            value,
            currency: currency.into(),
        }
    }
}

impl OptionValue for Money {
    fn label(&self) -> String {
        format!("{} {:.2}", self.currency, self.value)
    }

    fn search_text(&self) -> String {
        self.value.to_string()
    }
}

/// A locally identified, selectable lookup entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupOption<T> {
    pub id: OptionId,
    pub value: T,
}

impl<T: OptionValue> LookupOption<T> {
    pub fn new(id: OptionId, value: T) -> Self {
        Self { id, value }
    }

    pub fn label(&self) -> String {
        self.value.label()
    }
}

pub type NameOption = LookupOption<String>;
pub type ItemOption = LookupOption<String>;
pub type CategoryOption = LookupOption<String>;
pub type PercentageOption = LookupOption<PercentValue>;
pub type AmountOption = LookupOption<Money>;
pub type TierOption = LookupOption<LoyaltyTier>;
pub type DurationOption = LookupOption<String>;
