//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod editor;

pub use editor::{
    // Entry point
    DiscountEditor,
    EditorProps,
    EditorServices,
    // Handlers
    AddOptionHandler,
    LoadDiscountHandler,
    UpdateDiscountHandler,
    // Outcomes
    AddOptionOutcome,
    LoadOutcome,
    UpdateOutcome,
    // Policies and cancellation
    CancellationHandle,
    CancellationSignal,
    CommitPolicy,
    // Messages
    LOAD_FAILED_MESSAGE,
    UPDATE_SUCCESS_MESSAGE,
};
