//! Form module - the editing session for one discount.
//!
//! Holds the selection state machine and everything it needs: the focus
//! scope for dropdowns, per-resource loading flags, add-new drafts, the
//! ordered submission checks, payload construction and load-time
//! reconciliation against the lookup lists.
//!
//! # Lifecycle
//!
//! `Loading` -> `Ready` | `NotFound`, `Ready` -> `Submitting`,
//! `Submitting` -> `Ready` | `Submitted`. User edits are accepted only in
//! `Ready`.

mod add_new;
mod errors;
mod field;
mod focus;
mod loading;
mod notification;
mod payload;
mod reconcile;
mod selection;
mod session;
mod status;
mod validation;

pub use add_new::{
    parse_new_option, AddNewDraft, AddNewDrafts, AddOptionError, NewOptionValue,
};
pub use errors::EditorError;
pub use field::{AddNewField, FieldKey, Resource};
pub use focus::FocusScope;
pub use loading::LoadingFlags;
pub use notification::{Notification, NotificationKind};
pub use payload::UpdatePayload;
pub use reconcile::{reconcile, Reconciliation};
pub use selection::SelectionState;
pub use session::{FieldOptions, FormSession, OptionEntry};
pub use status::EditorStatus;
pub use validation::{
    validate_selection, ScopeChoice, SubmissionError, ValidatedSelection, ValueChoice,
    UPDATE_FALLBACK_MESSAGE,
};
