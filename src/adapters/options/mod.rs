//! Value option and option registry adapters.

mod simulated_registry;
mod static_values;

pub use simulated_registry::SimulatedOptionRegistry;
pub use static_values::StaticValueOptions;
