//! Discount module - the record edited by the form.

mod record;

pub use record::{DiscountRecord, DiscountScope, LoyaltyTier};
