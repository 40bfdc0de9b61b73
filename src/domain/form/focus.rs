//! Focus scope: which dropdown, if any, is open.
//!
//! A single `Option<FieldKey>` makes "at most one dropdown open" structural.
//! The scope belongs to one form session and is released with it.

use super::field::FieldKey;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusScope {
    active: Option<FieldKey>,
}

impl FocusScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `field` (closing any other) or closes it if already open.
    /// Returns whether `field` is open afterwards.
    pub fn toggle(&mut self, field: FieldKey) -> bool {
        if self.active == Some(field) {
            self.active = None;
            false
        } else {
            self.active = Some(field);
            true
        }
    }

    /// Closes `field` if it is the open one.
    pub fn close(&mut self, field: FieldKey) {
        if self.active == Some(field) {
            self.active = None;
        }
    }

    /// Closes whatever is open (interaction outside every dropdown).
    pub fn release(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<FieldKey> {
        self.active
    }

    pub fn is_open(&self, field: FieldKey) -> bool {
        self.active == Some(field)
    }
}
