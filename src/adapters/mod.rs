//! Adapters - Implementations of port interfaces.
//!
//! - `catalog` - HTTP and in-memory discount catalogs
//! - `options` - Value option source and option registry
//! - `notify` - Auto-dismissing notification board

pub mod catalog;
pub mod notify;
pub mod options;

pub use catalog::{CatalogOperation, HttpCatalogConfig, HttpDiscountCatalog, InMemoryDiscountCatalog};
pub use notify::ToastBoard;
pub use options::{SimulatedOptionRegistry, StaticValueOptions};
