//! Discount catalog adapters.

mod http;
mod in_memory;

pub use http::{HttpCatalogConfig, HttpDiscountCatalog};
pub use in_memory::{CatalogOperation, InMemoryDiscountCatalog};
