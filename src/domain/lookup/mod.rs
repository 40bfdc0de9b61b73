//! Lookup module - selectable options, their lists and filtering.
//!
//! - `option` - `LookupOption<T>` and the value types it carries
//! - `list` - ordered lists with sequential local ids
//! - `cache` - the per-session set of lists
//! - `filter` - case-insensitive substring search
//! - `defaults` - fallback lists used when a fetch fails

mod cache;
pub mod defaults;
mod filter;
mod list;
mod option;

pub use cache::LookupCache;
pub use filter::{filter_options, matches_query};
pub use list::LookupList;
pub use option::{
    AmountOption, CategoryOption, DurationOption, ItemOption, LookupOption, Money, NameOption,
    OptionValue, PercentValue, PercentageOption, TierOption,
};
