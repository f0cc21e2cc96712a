//! Income allocation across spending categories.
//!
//! The allocator works in three phases:
//! 1. Sum fixed expenses into per-category floors and derive the surplus.
//!    A negative surplus is a deficit and ends the run.
//! 2. Spread the surplus proportionally to each category's unmet ideal
//!    (`income * weight - floor`), or to raw weights when every floor
//!    already meets its ideal.
//! 3. Round every category but the last to the rounding unit, then give the
//!    last category whatever is left so the total matches income.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{
    AllocationOutcome, AllocationResult, AllocatorSettings, Category, CategoryAllocation,
    DeficitReport, DistributionBasis, FixedExpense, WeightProfile,
};

/// Distributes a monthly income across categories.
///
/// Stateless apart from its settings; a single allocator can be reused for
/// any number of runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetAllocator {
    settings: AllocatorSettings,
}

/// Per-category figures before rounding.
struct Draft<'a> {
    category: &'a Category,
    floor: Decimal,
    weight: Decimal,
    ideal: Decimal,
    gap: Decimal,
}

impl BudgetAllocator {
    /// Creates an allocator with the given settings.
    #[must_use]
    pub const fn new(settings: AllocatorSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &AllocatorSettings {
        &self.settings
    }

    /// Allocates `income` across `categories`.
    ///
    /// Category order matters: the last category absorbs the rounding
    /// residual.
    ///
    /// # Errors
    ///
    /// Returns a `BudgetError` when the categories are empty or contain a
    /// duplicate ID, when income or any fixed expense is negative, or when the
    /// allocator settings are invalid. Nothing is computed in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use planwise_core::budget::{BudgetAllocator, Category, FixedExpense, WeightProfile};
    ///
    /// let categories = vec![
    ///     Category::new("rent", "Rent", "HOUSING"),
    ///     Category::new("savings", "Savings", "FINANCIAL"),
    /// ];
    /// let fixed = vec![FixedExpense::new("fe_1", "Rent", dec!(400000), "rent")];
    /// let weights =
    ///     WeightProfile::from_weights("SIMPLE", [("rent", dec!(0.5)), ("savings", dec!(0.5))])
    ///         .unwrap();
    ///
    /// let outcome = BudgetAllocator::default()
    ///     .allocate(dec!(1000000), &categories, &fixed, &weights)
    ///     .unwrap();
    /// let result = outcome.allocation().unwrap();
    /// assert_eq!(result.total_actual, dec!(1000000));
    /// assert!(result.matches);
    /// ```
    pub fn allocate(
        &self,
        income: Decimal,
        categories: &[Category],
        fixed_expenses: &[FixedExpense],
        weights: &WeightProfile,
    ) -> Result<AllocationOutcome, BudgetError> {
        self.validate(income, categories, fixed_expenses)?;

        let floors = BudgetService::compute_floors(fixed_expenses)?;
        let unresolved_expenses = BudgetService::unresolved_expenses(categories, fixed_expenses);
        let floor_of = |c: &Category| floors.get(&c.id).copied().unwrap_or(Decimal::ZERO);

        let total_fixed = checked_sum(categories.iter().map(floor_of), "fixed expenses")?;
        // Both operands are non-negative, so the difference stays in range.
        let surplus = income - total_fixed;

        if surplus < Decimal::ZERO {
            return Ok(AllocationOutcome::Deficit(DeficitReport {
                income,
                total_fixed,
                surplus,
                shortfall: surplus.abs(),
                unresolved_expenses,
            }));
        }

        let drafts: Vec<Draft<'_>> = categories
            .iter()
            .map(|category| {
                let floor = floor_of(category);
                let weight = weights.weight_or(&category.id, self.settings.fallback_weight);
                let ideal = income * weight;
                let gap = (ideal - floor).max(Decimal::ZERO);
                Draft {
                    category,
                    floor,
                    weight,
                    ideal,
                    gap,
                }
            })
            .collect();

        let total_gap = checked_sum(drafts.iter().map(|d| d.gap), "category gaps")?;
        let total_weight = checked_sum(drafts.iter().map(|d| d.weight), "category weights")?;
        let basis = if total_gap > Decimal::ZERO {
            DistributionBasis::Gap
        } else {
            DistributionBasis::Weight
        };

        // Shares are at most 1, so `surplus * share` never exceeds the surplus.
        let mut allocations: Vec<CategoryAllocation> = drafts
            .into_iter()
            .map(|d| {
                let extra = match basis {
                    DistributionBasis::Gap => surplus * (d.gap / total_gap),
                    // All-zero weights leave the whole surplus to the residual category.
                    DistributionBasis::Weight if total_weight.is_zero() => Decimal::ZERO,
                    DistributionBasis::Weight => surplus * (d.weight / total_weight),
                };
                let value = d.floor + extra;
                CategoryAllocation {
                    category_id: d.category.id.clone(),
                    name: d.category.name.clone(),
                    group: d.category.group.clone(),
                    floor: d.floor,
                    weight: d.weight,
                    ideal: d.ideal,
                    gap: d.gap,
                    extra,
                    value,
                    amount: value,
                    residual: false,
                }
            })
            .collect();

        // Stage one: round everything except the last category.
        let (last, head) = allocations
            .split_last_mut()
            .ok_or(BudgetError::EmptyCategories)?;
        let mut total_rounded = Decimal::ZERO;
        for allocation in head.iter_mut() {
            allocation.amount = self.round_to_unit(allocation.value);
            total_rounded = total_rounded
                .checked_add(allocation.amount)
                .ok_or(BudgetError::AmountOverflow("rounded allocations"))?;
        }

        // Stage two: the last category takes the complement.
        last.amount = (income - total_rounded).max(Decimal::ZERO);
        last.residual = true;

        let total_actual: Decimal = allocations.iter().map(|a| a.amount).sum();
        let matches = (total_actual - income).abs() < Decimal::ONE;

        Ok(AllocationOutcome::Coherent(AllocationResult {
            income,
            total_fixed,
            surplus,
            total_gap,
            basis,
            allocations,
            total_actual,
            matches,
            unresolved_expenses,
        }))
    }

    /// Rounds `value` to the nearest multiple of the rounding unit, ties away from zero.
    #[must_use]
    pub fn round_to_unit(&self, value: Decimal) -> Decimal {
        let unit = self.settings.rounding_unit;
        (value / unit).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * unit
    }

    fn validate(
        &self,
        income: Decimal,
        categories: &[Category],
        fixed_expenses: &[FixedExpense],
    ) -> Result<(), BudgetError> {
        self.settings.validate()?;

        if categories.is_empty() {
            return Err(BudgetError::EmptyCategories);
        }

        if income < Decimal::ZERO {
            return Err(BudgetError::NegativeIncome(income));
        }

        let mut seen = HashSet::with_capacity(categories.len());
        if let Some(duplicate) = categories.iter().find(|c| !seen.insert(&c.id)) {
            return Err(BudgetError::DuplicateCategory(duplicate.id.clone()));
        }

        if let Some(expense) = fixed_expenses.iter().find(|e| e.amount < Decimal::ZERO) {
            return Err(BudgetError::NegativeFixedExpense {
                id: expense.id.clone(),
                amount: expense.amount,
            });
        }

        Ok(())
    }
}

fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal, BudgetError> {
    values.into_iter().try_fold(Decimal::ZERO, |total, value| {
        total
            .checked_add(value)
            .ok_or(BudgetError::AmountOverflow(what))
    })
}
