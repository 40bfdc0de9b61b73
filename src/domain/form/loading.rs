//! Per-resource loading flags.

use super::field::Resource;

/// One flag per async resource: true from fetch start until it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingFlags {
    record: bool,
    discount_names: bool,
    items: bool,
    categories: bool,
    percentages: bool,
    amounts: bool,
    durations: bool,
}

impl Default for LoadingFlags {
    /// The record counts as loading until the first load settles.
    fn default() -> Self {
        Self {
            record: true,
            discount_names: false,
            items: false,
            categories: false,
            percentages: false,
            amounts: false,
            durations: false,
        }
    }
}

impl LoadingFlags {
    pub fn set(&mut self, resource: Resource, loading: bool) {
        *self.slot(resource) = loading;
    }

    pub fn is_loading(&self, resource: Resource) -> bool {
        match resource {
            Resource::Record => self.record,
            Resource::DiscountNames => self.discount_names,
            Resource::Items => self.items,
            Resource::Categories => self.categories,
            Resource::Percentages => self.percentages,
            Resource::Amounts => self.amounts,
            Resource::Durations => self.durations,
        }
    }

    pub fn any(&self) -> bool {
        self.record
            || self.discount_names
            || self.items
            || self.categories
            || self.percentages
            || self.amounts
            || self.durations
    }

    fn slot(&mut self, resource: Resource) -> &mut bool {
        match resource {
            Resource::Record => &mut self.record,
            Resource::DiscountNames => &mut self.discount_names,
            Resource::Items => &mut self.items,
            Resource::Categories => &mut self.categories,
            Resource::Percentages => &mut self.percentages,
            Resource::Amounts => &mut self.amounts,
            Resource::Durations => &mut self.durations,
        }
    }
}
