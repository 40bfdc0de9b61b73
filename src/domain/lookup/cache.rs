//! Last-fetched lookup lists for every selectable field.

use super::defaults;
use super::list::LookupList;
use super::option::{Money, PercentValue};
use crate::domain::discount::LoyaltyTier;

/// Lookup lists owned by one editor session.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupCache {
    pub discount_names: LookupList<String>,
    pub items: LookupList<String>,
    pub categories: LookupList<String>,
    pub percentages: LookupList<PercentValue>,
    pub amounts: LookupList<Money>,
    pub tiers: LookupList<LoyaltyTier>,
    pub durations: LookupList<String>,
}

impl Default for LookupCache {
    /// Empty lists except the fixed loyalty tiers.
    fn default() -> Self {
        Self {
            discount_names: LookupList::default(),
            items: LookupList::default(),
            categories: LookupList::default(),
            percentages: LookupList::default(),
            amounts: LookupList::default(),
            tiers: defaults::tiers(),
            durations: LookupList::default(),
        }
    }
}
