//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types and the state machine
//! trait that form the vocabulary of the discount editor.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError, REMOTE_MESSAGE_DETAIL};
pub use ids::{DiscountId, EditorSessionId, OptionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
