//! Editor lifecycle status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of one editor session.
///
/// `NotFound` and `Submitted` are terminal; back navigation is the only
/// action they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStatus {
    Loading,
    Ready,
    NotFound,
    Submitting,
    Submitted,
}

impl EditorStatus {
    /// Whether user edits are accepted.
    pub fn is_editable(&self) -> bool {
        matches!(self, EditorStatus::Ready)
    }
}

impl StateMachine for EditorStatus {
    fn valid_transitions(&self) -> &'static [Self] {
        use EditorStatus::*;
        match self {
            Loading => &[Ready, NotFound],
            Ready => &[Submitting],
            Submitting => &[Ready, Submitted],
            NotFound | Submitted => &[],
        }
    }
}
