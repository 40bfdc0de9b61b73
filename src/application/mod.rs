//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The form session itself stays synchronous; handlers own every await.

pub mod handlers;

pub use handlers::{
    AddOptionHandler, AddOptionOutcome, CancellationHandle, CancellationSignal, CommitPolicy,
    DiscountEditor, EditorProps, EditorServices, LoadDiscountHandler, LoadOutcome,
    UpdateDiscountHandler, UpdateOutcome, LOAD_FAILED_MESSAGE, UPDATE_SUCCESS_MESSAGE,
};
