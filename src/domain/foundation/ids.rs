//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Remote identity of a discount record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountId(u64);

impl DiscountId {
    /// Creates a DiscountId from its numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DiscountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DiscountId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("discount_id", e.to_string()))
    }
}

/// Identity of a lookup option.
///
/// Only unique within the list it was assigned in. Item and category
/// options carry the remote product/category id; every other list is
/// numbered locally starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(u64);

impl OptionId {
    /// Creates an OptionId from its numeric value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The id a list of `len` entries assigns to its next entry.
    pub fn next_for_len(len: usize) -> Self {
        Self(len as u64 + 1)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one editor session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorSessionId(Uuid);

impl EditorSessionId {
    /// Creates a new random EditorSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EditorSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EditorSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_id_parses_from_string() {
        let id: DiscountId = " 42 ".parse().unwrap();
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn discount_id_rejects_non_numeric() {
        let result = "abc".parse::<DiscountId>();
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn next_option_id_is_length_plus_one() {
        assert_eq!(OptionId::next_for_len(0), OptionId::new(1));
        assert_eq!(OptionId::next_for_len(7), OptionId::new(8));
    }

    #[test]
    fn editor_session_ids_are_unique() {
        assert_ne!(EditorSessionId::new(), EditorSessionId::new());
    }

    #[test]
    fn discount_id_serializes_as_number() {
        let json = serde_json::to_string(&DiscountId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
