//! Budget service for floor computation and budget validation.

use std::collections::{HashMap, HashSet};

use planwise_shared::types::{CategoryId, FixedExpenseId};
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{Category, FixedExpense, FloorAdjustment, FloorEnforcement};

/// Budget service for business logic around fixed-expense floors.
pub struct BudgetService;

impl BudgetService {
    /// Sum fixed expenses per category.
    ///
    /// Categories without any fixed expense are absent from the map; callers
    /// treat them as a zero floor.
    pub fn compute_floors(
        fixed_expenses: &[FixedExpense],
    ) -> Result<HashMap<CategoryId, Decimal>, BudgetError> {
        let mut floors: HashMap<CategoryId, Decimal> = HashMap::new();
        for expense in fixed_expenses {
            let floor = floors
                .entry(expense.category_id.clone())
                .or_insert(Decimal::ZERO);
            *floor = floor
                .checked_add(expense.amount)
                .ok_or(BudgetError::AmountOverflow("fixed expenses"))?;
        }
        Ok(floors)
    }

    /// Fixed expenses whose category is not part of `categories`.
    ///
    /// These are ignored by floor summation rather than rejected.
    #[must_use]
    pub fn unresolved_expenses(
        categories: &[Category],
        fixed_expenses: &[FixedExpense],
    ) -> Vec<FixedExpenseId> {
        let known: HashSet<&CategoryId> = categories.iter().map(|c| &c.id).collect();
        fixed_expenses
            .iter()
            .filter(|e| !known.contains(&e.category_id))
            .map(|e| e.id.clone())
            .collect()
    }

    /// Never accept a budget below the category's known fixed expenses.
    ///
    /// Requested amounts that are zero or negative are dropped. Positive
    /// amounts below the category floor are raised to the floor and reported
    /// as a [`FloorAdjustment`].
    #[must_use]
    pub fn enforce_floors(
        requested: &[(CategoryId, Decimal)],
        floors: &HashMap<CategoryId, Decimal>,
    ) -> FloorEnforcement {
        let mut budgets = Vec::with_capacity(requested.len());
        let mut adjustments = Vec::new();

        for (category_id, amount) in requested {
            if *amount <= Decimal::ZERO {
                continue;
            }

            let floor = floors.get(category_id).copied().unwrap_or(Decimal::ZERO);
            if floor > Decimal::ZERO && *amount < floor {
                adjustments.push(FloorAdjustment {
                    category_id: category_id.clone(),
                    requested: *amount,
                    floor,
                });
                budgets.push((category_id.clone(), floor));
            } else {
                budgets.push((category_id.clone(), *amount));
            }
        }

        FloorEnforcement {
            budgets,
            adjustments,
        }
    }
}
