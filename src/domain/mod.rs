//! Domain layer containing the editor's state and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamp, errors, state machine)
//! - `discount` - The discount record as stored remotely
//! - `lookup` - Selectable options, lookup lists and filtering
//! - `form` - The editing session: selection, validation, payload

pub mod discount;
pub mod form;
pub mod foundation;
pub mod lookup;
