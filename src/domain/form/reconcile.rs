//! Matching a loaded record against the fetched lookup lists.

use crate::domain::discount::{DiscountRecord, LoyaltyTier};
use crate::domain::foundation::OptionId;
use crate::domain::lookup::{LookupCache, LookupList, LookupOption, Money, OptionValue, PercentValue};

use super::field::FieldKey;
use super::selection::SelectionState;

/// Selection pre-populated from a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub selection: SelectionState,
    /// Fields whose stored reference matched nothing and stay unselected.
    pub unresolved: Vec<FieldKey>,
}

/// Builds the initial selection for `record`.
///
/// Values (name, percentage, amount, duration) that are missing from their
/// list get a placeholder option with id `len + 1` that is selected but not
/// inserted. References (item, category, tier) cannot be synthesized without
/// losing the remote id, so a miss leaves the field unselected.
///
/// Zero numbers, zero ids and blank text are stored "unset" markers and
/// leave their field unselected.
pub fn reconcile(record: &DiscountRecord, cache: &LookupCache, currency: &str) -> Reconciliation {
    let mut unresolved = Vec::new();

    let discount_name = Some(record.name.clone())
        .filter(|name| !name.trim().is_empty())
        .map(|name| match_or_placeholder(&cache.discount_names, name));

    let percentage = record
        .stored_percentage()
        .map(|value| match_or_placeholder(&cache.percentages, PercentValue::new(value)));

    let amount = record.stored_amount().map(|value| {
        cache
            .amounts
            .find(|money| money.value == value)
            .cloned()
            .unwrap_or_else(|| {
                let unit = record.currency.as_deref().unwrap_or(currency);
                cache.amounts.placeholder(Money::new(value, unit))
            })
    });

    let duration = record
        .duration
        .clone()
        .filter(|duration| !duration.trim().is_empty())
        .map(|duration| match_or_placeholder(&cache.durations, duration));

    let item = resolve_reference(
        &cache.items,
        record.stored_item_id(),
        FieldKey::Item,
        &mut unresolved,
    );
    let category = resolve_reference(
        &cache.categories,
        record.stored_category_id(),
        FieldKey::Category,
        &mut unresolved,
    );

    let tier = record.stored_loyalty_type().and_then(|tag| {
        let found = LoyaltyTier::from_tag(tag).and_then(|tier| cache.tiers.find_by_value(&tier));
        if found.is_none() {
            unresolved.push(FieldKey::LoyaltyTier);
        }
        found.cloned()
    });

    Reconciliation {
        selection: SelectionState {
            scope: record.scope,
            enabled: record.is_active,
            discount_name,
            item,
            category,
            percentage,
            amount,
            tier,
            duration,
        },
        unresolved,
    }
}

fn match_or_placeholder<T: OptionValue>(list: &LookupList<T>, value: T) -> LookupOption<T> {
    match list.find_by_value(&value) {
        Some(option) => option.clone(),
        None => list.placeholder(value),
    }
}

fn resolve_reference(
    list: &LookupList<String>,
    id: Option<u64>,
    field: FieldKey,
    unresolved: &mut Vec<FieldKey>,
) -> Option<LookupOption<String>> {
    let id = id?;
    let found = list.find_by_id(OptionId::new(id)).cloned();
    if found.is_none() {
        unresolved.push(field);
    }
    found
}
