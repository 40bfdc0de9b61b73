//! Discount editor handlers.
//!
//! - `LoadDiscountHandler` - record plus lookup lists, then reconciliation
//! - `AddOptionHandler` - the add-new sub-forms
//! - `UpdateDiscountHandler` - validated submission and delayed back navigation
//! - `DiscountEditor` - the embeddable entry point tying them together

mod add_option;
mod cancellation;
mod discount_editor;
mod load_discount;
mod update_discount;

pub use add_option::{AddOptionHandler, AddOptionOutcome, CommitPolicy};
pub use cancellation::{CancellationHandle, CancellationSignal};
pub use discount_editor::{DiscountEditor, EditorProps, EditorServices};
pub use load_discount::{LoadDiscountHandler, LoadOutcome, LOAD_FAILED_MESSAGE};
pub use update_discount::{UpdateDiscountHandler, UpdateOutcome, UPDATE_SUCCESS_MESSAGE};
