//! Fallback lists used when a remote fetch fails.

use super::list::LookupList;
use super::option::{LookupOption, Money, PercentValue};
use crate::domain::discount::LoyaltyTier;
use crate::domain::foundation::OptionId;

/// Currency unit used when none is configured.
pub const DEFAULT_CURRENCY: &str = "Rs";

const DISCOUNT_NAMES: [&str; 2] = ["Black Friday", "Weekly"];
const PERCENTAGES: [f64; 7] = [1.0, 2.0, 5.0, 10.0, 15.0, 20.0, 25.0];
const AMOUNTS: [f64; 7] = [50.0, 100.0, 150.0, 200.0, 500.0, 750.0, 1000.0];
const DURATIONS: [&str; 7] = [
    "1 Hour", "2 Hours", "6 Hours", "8 Hours", "12 Hours", "1 Day", "7 Days",
];

pub fn discount_names() -> LookupList<String> {
    LookupList::from_values(DISCOUNT_NAMES.iter().map(|s| s.to_string()))
}

pub fn items() -> LookupList<String> {
    numbered_entries("Product")
}

pub fn categories() -> LookupList<String> {
    numbered_entries("Category")
}

pub fn percentage_values() -> Vec<f64> {
    PERCENTAGES.to_vec()
}

pub fn percentages() -> LookupList<PercentValue> {
    LookupList::from_values(PERCENTAGES.iter().copied().map(PercentValue::new))
}

pub fn amount_values(currency: &str) -> Vec<Money> {
    AMOUNTS.iter().map(|v| Money::new(*v, currency)).collect()
}

pub fn amounts(currency: &str) -> LookupList<Money> {
    LookupList::from_values(amount_values(currency))
}

pub fn duration_values() -> Vec<String> {
    DURATIONS.iter().map(|s| s.to_string()).collect()
}

pub fn durations() -> LookupList<String> {
    LookupList::from_values(duration_values())
}

/// The fixed loyalty tiers: Gold (1), Silver (2), Bronze (3).
pub fn tiers() -> LookupList<LoyaltyTier> {
    LookupList::from_values(LoyaltyTier::ALL)
}

// "Product 1".."Product 3" with ids 1..3, standing in for remote ids.
fn numbered_entries(prefix: &str) -> LookupList<String> {
    LookupList::from_options(
        (1..=3)
            .map(|n| LookupOption::new(OptionId::new(n), format!("{} {}", prefix, n)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_have_expected_sizes() {
        assert_eq!(discount_names().len(), 2);
        assert_eq!(items().len(), 3);
        assert_eq!(categories().len(), 3);
        assert_eq!(percentages().len(), 7);
        assert_eq!(amounts(DEFAULT_CURRENCY).len(), 7);
        assert_eq!(durations().len(), 7);
        assert_eq!(tiers().len(), 3);
    }

    #[test]
    fn default_items_are_numbered_products() {
        let labels: Vec<_> = items().iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["Product 1", "Product 2", "Product 3"]);
    }

    #[test]
    fn tier_ids_follow_display_order() {
        let tiers = tiers();
        assert_eq!(tiers.find_by_id(OptionId::new(1)).map(|o| o.value), Some(LoyaltyTier::Gold));
        assert_eq!(tiers.find_by_id(OptionId::new(3)).map(|o| o.value), Some(LoyaltyTier::Bronze));
    }

    #[test]
    fn default_amounts_carry_currency() {
        assert!(amounts("EUR").iter().all(|o| o.value.currency == "EUR"));
    }
}
