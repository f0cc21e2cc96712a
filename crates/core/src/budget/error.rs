//! Budget error types.

use planwise_shared::AppError;
use planwise_shared::types::{CategoryId, FixedExpenseId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Budget-related errors.
///
/// Every variant is an invalid-input error raised before any allocation work
/// starts. A deficit is not an error; see [`super::AllocationOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// No categories were supplied, so there is no last category to absorb the residual.
    #[error("Invalid input: at least one category is required")]
    EmptyCategories,

    /// Income cannot be negative.
    #[error("Invalid input: income cannot be negative ({0})")]
    NegativeIncome(Decimal),

    /// A fixed expense carries a negative amount.
    #[error("Invalid input: fixed expense {id} has negative amount {amount}")]
    NegativeFixedExpense {
        /// Offending fixed expense.
        id: FixedExpenseId,
        /// Its amount.
        amount: Decimal,
    },

    /// The same category identifier appears more than once.
    #[error("Invalid input: duplicate category {0}")]
    DuplicateCategory(CategoryId),

    /// A weight lies outside [0, 1].
    #[error("Invalid input: weight {weight} for {category} must be between 0 and 1")]
    WeightOutOfRange {
        /// Category (or `*` for the fallback weight).
        category: String,
        /// Rejected weight.
        weight: Decimal,
    },

    /// Rounding unit must be strictly positive.
    #[error("Invalid input: rounding unit must be positive, got {0}")]
    InvalidRoundingUnit(Decimal),

    /// A running total left the range `Decimal` can represent.
    #[error("Invalid input: {0} exceed the supported amount range")]
    AmountOverflow(&'static str),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}
