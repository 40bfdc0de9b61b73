//! Current choice for every selectable field.

use crate::domain::discount::DiscountScope;
use crate::domain::lookup::{
    AmountOption, CategoryOption, DurationOption, ItemOption, NameOption, PercentageOption,
    TierOption,
};

use super::field::FieldKey;

/// Chosen option per field, plus scope tag and enabled flag.
///
/// Options are held by value: appending to the lookup cache never
/// invalidates a selection, and reconciliation placeholders that were
/// never inserted into the cache can still be selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub scope: DiscountScope,
    pub enabled: bool,
    pub discount_name: Option<NameOption>,
    pub item: Option<ItemOption>,
    pub category: Option<CategoryOption>,
    pub percentage: Option<PercentageOption>,
    pub amount: Option<AmountOption>,
    pub tier: Option<TierOption>,
    pub duration: Option<DurationOption>,
}

impl SelectionState {
    pub fn is_selected(&self, field: FieldKey) -> bool {
        match field {
            FieldKey::DiscountName => self.discount_name.is_some(),
            FieldKey::Item => self.item.is_some(),
            FieldKey::Category => self.category.is_some(),
            FieldKey::Percentage => self.percentage.is_some(),
            FieldKey::Amount => self.amount.is_some(),
            FieldKey::LoyaltyTier => self.tier.is_some(),
            FieldKey::Duration => self.duration.is_some(),
        }
    }

    /// Label of the selected option, as shown in the closed dropdown.
    pub fn label(&self, field: FieldKey) -> Option<String> {
        match field {
            FieldKey::DiscountName => self.discount_name.as_ref().map(|o| o.label()),
            FieldKey::Item => self.item.as_ref().map(|o| o.label()),
            FieldKey::Category => self.category.as_ref().map(|o| o.label()),
            FieldKey::Percentage => self.percentage.as_ref().map(|o| o.label()),
            FieldKey::Amount => self.amount.as_ref().map(|o| o.label()),
            FieldKey::LoyaltyTier => self.tier.as_ref().map(|o| o.label()),
            FieldKey::Duration => self.duration.as_ref().map(|o| o.label()),
        }
    }

    pub fn clear(&mut self, field: FieldKey) {
        match field {
            FieldKey::DiscountName => self.discount_name = None,
            FieldKey::Item => self.item = None,
            FieldKey::Category => self.category = None,
            FieldKey::Percentage => self.percentage = None,
            FieldKey::Amount => self.amount = None,
            FieldKey::LoyaltyTier => self.tier = None,
            FieldKey::Duration => self.duration = None,
        }
    }

    /// True while the field is blocked by its mutually exclusive partner.
    pub fn is_inert(&self, field: FieldKey) -> bool {
        field
            .exclusive_with()
            .is_some_and(|other| self.is_selected(other))
    }
}
