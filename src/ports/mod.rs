//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the editor and the outside world. Adapters implement these ports.
//!
//! ## Remote Ports
//!
//! - `DiscountCatalog` - Discounts plus product/category reference data
//! - `ValueOptionSource` - Percentage, amount and duration choices
//! - `OptionRegistry` - Persistence of user-entered options
//!
//! ## Host Ports
//!
//! - `Notifier` - Timed user-visible notifications
//! - `BackNavigator` - Leaving the editor

mod back_navigator;
mod discount_catalog;
mod notifier;
mod option_registry;
mod value_option_source;

pub use back_navigator::BackNavigator;
pub use discount_catalog::{DiscountCatalog, NamedRef, UpdateResponse};
pub use notifier::Notifier;
pub use option_registry::OptionRegistry;
pub use value_option_source::ValueOptionSource;
