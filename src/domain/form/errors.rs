//! Errors for direct form interactions.

use thiserror::Error;

use crate::domain::discount::DiscountScope;
use crate::domain::foundation::{ErrorCode, OptionId};

use super::field::FieldKey;
use super::status::EditorStatus;

/// Why a user interaction on the form was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("The editor does not accept changes while {0:?}")]
    NotReady(EditorStatus),

    #[error("No {field} option with id {id}")]
    UnknownOption { field: FieldKey, id: OptionId },

    #[error("Cannot choose {field} while {locked_by} is selected")]
    FieldLocked { field: FieldKey, locked_by: FieldKey },

    #[error("A {scope} discount has no {field}")]
    FieldUnavailable { field: FieldKey, scope: DiscountScope },

    #[error("Discount scope is fixed to {current}; cannot switch to {requested}")]
    ScopeLocked {
        current: DiscountScope,
        requested: DiscountScope,
    },
}

impl EditorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EditorError::NotReady(_) => ErrorCode::EditorNotReady,
            EditorError::UnknownOption { .. } => ErrorCode::OptionNotFound,
            EditorError::FieldLocked { .. } | EditorError::FieldUnavailable { .. } => {
                ErrorCode::FieldLocked
            }
            EditorError::ScopeLocked { .. } => ErrorCode::ScopeLocked,
        }
    }
}
