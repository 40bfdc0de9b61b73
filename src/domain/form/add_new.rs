//! "Add new option" sub-forms and input parsing.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::lookup::{Money, PercentValue};

use super::field::AddNewField;
use super::status::EditorStatus;

/// Parsed user input ready to be appended to a lookup list.
#[derive(Debug, Clone, PartialEq)]
pub enum NewOptionValue {
    DiscountName(String),
    Percentage(PercentValue),
    Amount(Money),
    Duration(String),
}

impl NewOptionValue {
    pub fn field(&self) -> AddNewField {
        match self {
            NewOptionValue::DiscountName(_) => AddNewField::DiscountName,
            NewOptionValue::Percentage(_) => AddNewField::Percentage,
            NewOptionValue::Amount(_) => AddNewField::Amount,
            NewOptionValue::Duration(_) => AddNewField::Duration,
        }
    }
}

/// Why an add-new submission did not produce an option.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddOptionError {
    #[error("Please enter a {field}")]
    EmptyInput { field: AddNewField },

    #[error("Please enter a valid percentage between 0 and 100")]
    InvalidPercentage(ValidationError),

    #[error("Please enter a valid amount")]
    InvalidAmount(ValidationError),

    #[error("Cannot add options while the editor is {0:?}")]
    NotReady(EditorStatus),

    #[error("Failed to add {field}")]
    PersistenceFailed { field: AddNewField, reason: String },
}

impl AddOptionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AddOptionError::EmptyInput { .. } => ErrorCode::EmptyField,
            AddOptionError::InvalidPercentage(_) | AddOptionError::InvalidAmount(_) => {
                ErrorCode::ValidationFailed
            }
            AddOptionError::NotReady(_) => ErrorCode::EditorNotReady,
            AddOptionError::PersistenceFailed { .. } => ErrorCode::InternalError,
        }
    }

    /// Whether the user is told about this failure. Empty input is
    /// silently ignored, like a disabled submit button.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            AddOptionError::EmptyInput { .. } | AddOptionError::NotReady(_)
        )
    }
}

/// Validates raw input for `field`.
///
/// Names and durations keep the raw text; numbers are parsed from the
/// trimmed text. Percentages must lie in `[0, 100]`, amounts must be
/// strictly positive. Non-finite numbers are rejected.
pub fn parse_new_option(
    field: AddNewField,
    raw: &str,
    currency: &str,
) -> Result<NewOptionValue, AddOptionError> {
    match field {
        AddNewField::DiscountName | AddNewField::Duration => {
            if raw.trim().is_empty() {
                return Err(AddOptionError::EmptyInput { field });
            }
            let text = raw.to_string();
            Ok(match field {
                AddNewField::DiscountName => NewOptionValue::DiscountName(text),
                _ => NewOptionValue::Duration(text),
            })
        }
        AddNewField::Percentage => {
            let value = parse_number("percentage", raw).map_err(AddOptionError::InvalidPercentage)?;
            if !(0.0..=100.0).contains(&value) {
                return Err(AddOptionError::InvalidPercentage(ValidationError::out_of_range(
                    "percentage",
                    0.0,
                    100.0,
                    value,
                )));
            }
            Ok(NewOptionValue::Percentage(PercentValue::new(value)))
        }
        AddNewField::Amount => {
            let value = parse_number("amount", raw).map_err(AddOptionError::InvalidAmount)?;
            if value <= 0.0 {
                return Err(AddOptionError::InvalidAmount(ValidationError::not_positive(
                    "amount", value,
                )));
            }
            Ok(NewOptionValue::Amount(Money::new(value, currency)))
        }
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a number", trimmed)))?;
    if !value.is_finite() {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a finite number", trimmed),
        ));
    }
    Ok(value)
}

/// Open/closed state and typed text of one add-new sub-form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddNewDraft {
    pub open: bool,
    pub text: String,
}

/// The four add-new sub-forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddNewDrafts {
    discount_name: AddNewDraft,
    percentage: AddNewDraft,
    amount: AddNewDraft,
    duration: AddNewDraft,
}

impl AddNewDrafts {
    pub fn get(&self, field: AddNewField) -> &AddNewDraft {
        match field {
            AddNewField::DiscountName => &self.discount_name,
            AddNewField::Percentage => &self.percentage,
            AddNewField::Amount => &self.amount,
            AddNewField::Duration => &self.duration,
        }
    }

    pub fn get_mut(&mut self, field: AddNewField) -> &mut AddNewDraft {
        match field {
            AddNewField::DiscountName => &mut self.discount_name,
            AddNewField::Percentage => &mut self.percentage,
            AddNewField::Amount => &mut self.amount,
            AddNewField::Duration => &mut self.duration,
        }
    }

    /// Clears the text and closes the sub-form.
    pub fn reset(&mut self, field: AddNewField) {
        *self.get_mut(field) = AddNewDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn percentage(raw: &str) -> Result<NewOptionValue, AddOptionError> {
        parse_new_option(AddNewField::Percentage, raw, "Rs")
    }

    fn amount(raw: &str) -> Result<NewOptionValue, AddOptionError> {
        parse_new_option(AddNewField::Amount, raw, "Rs")
    }

    #[test]
    fn percentage_rejects_out_of_range_and_non_numeric() {
        for raw in ["-1", "101", "abc", "", "NaN", "inf"] {
            assert!(
                matches!(percentage(raw), Err(AddOptionError::InvalidPercentage(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn percentage_accepts_bounds_and_fractions() {
        for (raw, expected) in [("0", 0.0), ("100", 100.0), ("57.5", 57.5)] {
            assert_eq!(
                percentage(raw).unwrap(),
                NewOptionValue::Percentage(PercentValue::new(expected))
            );
        }
    }

    #[test]
    fn amount_rejects_non_positive_and_non_numeric() {
        for raw in ["0", "-5", "abc"] {
            assert!(
                matches!(amount(raw), Err(AddOptionError::InvalidAmount(_))),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn amount_accepts_small_and_large_values_with_currency() {
        assert_eq!(amount("0.01").unwrap(), NewOptionValue::Amount(Money::new(0.01, "Rs")));
        assert_eq!(amount("1000").unwrap(), NewOptionValue::Amount(Money::new(1000.0, "Rs")));
    }

    #[test]
    fn names_and_durations_reject_blank_input() {
        let err = parse_new_option(AddNewField::DiscountName, "   ", "Rs").unwrap_err();
        assert_eq!(err, AddOptionError::EmptyInput { field: AddNewField::DiscountName });
        assert!(!err.is_user_facing());
        assert!(parse_new_option(AddNewField::Duration, "", "Rs").is_err());
    }

    #[test]
    fn names_keep_raw_text() {
        assert_eq!(
            parse_new_option(AddNewField::DiscountName, " Summer Sale", "Rs").unwrap(),
            NewOptionValue::DiscountName(" Summer Sale".to_string())
        );
    }

    #[test]
    fn error_messages_match_user_prompts() {
        assert_eq!(
            percentage("abc").unwrap_err().to_string(),
            "Please enter a valid percentage between 0 and 100"
        );
        assert_eq!(amount("0").unwrap_err().to_string(), "Please enter a valid amount");
    }

    #[test]
    fn drafts_reset_clears_text_and_closes() {
        let mut drafts = AddNewDrafts::default();
        let draft = drafts.get_mut(AddNewField::Amount);
        draft.open = true;
        draft.text = "12".to_string();
        drafts.reset(AddNewField::Amount);
        assert_eq!(drafts.get(AddNewField::Amount), &AddNewDraft::default());
    }
}
