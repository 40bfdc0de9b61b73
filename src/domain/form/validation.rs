//! Pre-submission checks over the current selection.

use crate::domain::discount::DiscountScope;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::lookup::{
    AmountOption, CategoryOption, DurationOption, ItemOption, NameOption, PercentageOption,
    TierOption,
};

use super::selection::SelectionState;
use super::status::EditorStatus;

/// Shown when the remote service gives no usable message.
pub const UPDATE_FALLBACK_MESSAGE: &str =
    "There was an error updating the discount. Please try again.";

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    MissingDiscountName,
    MissingItem,
    MissingCategory,
    MissingLoyaltyTier,
    MissingValue,
    ConflictingValues,
    MissingDuration,
    /// Submission attempted outside the ready state.
    NotReady(EditorStatus),
    /// The update call returned a falsy response.
    Rejected,
    /// The update call failed; carries the most specific message available.
    Remote(String),
}

impl SubmissionError {
    pub fn from_remote(err: &DomainError) -> Self {
        SubmissionError::Remote(err.user_message_or(UPDATE_FALLBACK_MESSAGE).to_string())
    }

    /// True for the precondition failures that never reach the network.
    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::ValidationFailed
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::MissingDiscountName
            | SubmissionError::MissingItem
            | SubmissionError::MissingCategory
            | SubmissionError::MissingLoyaltyTier
            | SubmissionError::MissingValue
            | SubmissionError::ConflictingValues
            | SubmissionError::MissingDuration => ErrorCode::ValidationFailed,
            SubmissionError::NotReady(_) => ErrorCode::EditorNotReady,
            SubmissionError::Rejected => ErrorCode::UpdateRejected,
            SubmissionError::Remote(_) => ErrorCode::NetworkError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubmissionError::MissingDiscountName => "Please select a discount name".to_string(),
            SubmissionError::MissingItem => "Please select an item".to_string(),
            SubmissionError::MissingCategory => "Please select a category".to_string(),
            SubmissionError::MissingLoyaltyTier => "Please select a loyalty tier".to_string(),
            SubmissionError::MissingValue => {
                "Please select either a percentage or an amount".to_string()
            }
            SubmissionError::ConflictingValues => {
                "Please select only one discount value (percentage OR amount)".to_string()
            }
            SubmissionError::MissingDuration => "Please select a duration".to_string(),
            SubmissionError::NotReady(status) => {
                format!("Discount cannot be updated while {:?}", status)
            }
            SubmissionError::Rejected => "Failed to update discount".to_string(),
            SubmissionError::Remote(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubmissionError {}

/// The one discount value a valid selection carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueChoice<'a> {
    Percentage(&'a PercentageOption),
    Amount(&'a AmountOption),
}

/// The scope reference a valid selection carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeChoice<'a> {
    Item(&'a ItemOption),
    Category(&'a CategoryOption),
    Loyalty(&'a TierOption),
}

/// A selection that passed every precondition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedSelection<'a> {
    pub scope: ScopeChoice<'a>,
    pub name: &'a NameOption,
    pub value: ValueChoice<'a>,
    pub duration: &'a DurationOption,
    /// Tier attached as a bonus attribute regardless of scope.
    pub tier: Option<&'a TierOption>,
    pub enabled: bool,
}

/// Runs the six ordered checks, stopping at the first violation.
pub fn validate_selection(selection: &SelectionState) -> Result<ValidatedSelection<'_>, SubmissionError> {
    let name = selection
        .discount_name
        .as_ref()
        .ok_or(SubmissionError::MissingDiscountName)?;

    let scope = match selection.scope {
        DiscountScope::Item => ScopeChoice::Item(
            selection.item.as_ref().ok_or(SubmissionError::MissingItem)?,
        ),
        DiscountScope::Category => ScopeChoice::Category(
            selection
                .category
                .as_ref()
                .ok_or(SubmissionError::MissingCategory)?,
        ),
        DiscountScope::Loyalty => ScopeChoice::Loyalty(
            selection
                .tier
                .as_ref()
                .ok_or(SubmissionError::MissingLoyaltyTier)?,
        ),
    };

    let value = match (&selection.percentage, &selection.amount) {
        (None, None) => return Err(SubmissionError::MissingValue),
        (Some(_), Some(_)) => return Err(SubmissionError::ConflictingValues),
        (Some(percentage), None) => ValueChoice::Percentage(percentage),
        (None, Some(amount)) => ValueChoice::Amount(amount),
    };

    let duration = selection
        .duration
        .as_ref()
        .ok_or(SubmissionError::MissingDuration)?;

    Ok(ValidatedSelection {
        scope,
        name,
        value,
        duration,
        tier: selection.tier.as_ref(),
        enabled: selection.enabled,
    })
}
