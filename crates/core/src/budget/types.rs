//! Budget data types.

use std::collections::HashMap;

use planwise_shared::AllocatorConfig;
use planwise_shared::types::{CategoryId, FixedExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// A spending category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Group label (e.g., "VIVIENDA", "FINANCIERO").
    pub group: String,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: group.into(),
        }
    }
}

/// An already-committed monthly expense tied to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    /// Fixed expense ID.
    pub id: FixedExpenseId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// Category this expense counts against.
    pub category_id: CategoryId,
}

impl FixedExpense {
    /// Creates a fixed expense.
    #[must_use]
    pub fn new(
        id: impl Into<FixedExpenseId>,
        name: impl Into<String>,
        amount: Decimal,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            category_id: category_id.into(),
        }
    }
}

/// Named set of target income proportions per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightProfile {
    name: String,
    weights: HashMap<CategoryId, Decimal>,
}

impl WeightProfile {
    /// Creates an empty profile. Every category falls back to the default weight.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weights: HashMap::new(),
        }
    }

    /// Builds a profile from `(category, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::WeightOutOfRange` if any weight is outside [0, 1].
    pub fn from_weights<I, K>(name: impl Into<String>, weights: I) -> Result<Self, BudgetError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<CategoryId>,
    {
        weights
            .into_iter()
            .try_fold(Self::new(name), |profile, (id, weight)| {
                profile.with_weight(id, weight)
            })
    }

    /// Builds a profile from weights already known to lie within [0, 1].
    pub(crate) fn from_trusted<I, K>(name: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<CategoryId>,
    {
        Self {
            name: name.into(),
            weights: weights.into_iter().map(|(id, w)| (id.into(), w)).collect(),
        }
    }

    /// Adds or replaces the weight of one category.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::WeightOutOfRange` if `weight` is outside [0, 1].
    pub fn with_weight(
        mut self,
        category: impl Into<CategoryId>,
        weight: Decimal,
    ) -> Result<Self, BudgetError> {
        let category = category.into();
        ensure_unit_interval(category.as_str(), weight)?;
        self.weights.insert(category, weight);
        Ok(self)
    }

    /// Profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weight explicitly mapped for `category`, if any.
    #[must_use]
    pub fn get(&self, category: &CategoryId) -> Option<Decimal> {
        self.weights.get(category).copied()
    }

    /// Weight for `category`, or `fallback` when the profile does not map it.
    #[must_use]
    pub fn weight_or(&self, category: &CategoryId, fallback: Decimal) -> Decimal {
        self.get(category).unwrap_or(fallback)
    }

    /// Number of explicitly mapped categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True when no category is explicitly mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the explicitly mapped weights.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.weights.values().copied().sum()
    }
}

pub(crate) fn ensure_unit_interval(category: &str, weight: Decimal) -> Result<(), BudgetError> {
    if weight < Decimal::ZERO || weight > Decimal::ONE {
        return Err(BudgetError::WeightOutOfRange {
            category: category.to_string(),
            weight,
        });
    }
    Ok(())
}

/// Allocator tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorSettings {
    /// Every category except the last is rounded to a multiple of this unit.
    pub rounding_unit: Decimal,
    /// Weight used for categories the profile does not map.
    pub fallback_weight: Decimal,
}

impl AllocatorSettings {
    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidRoundingUnit` if the unit is not positive, or
    /// `BudgetError::WeightOutOfRange` if the fallback weight is outside [0, 1].
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.rounding_unit <= Decimal::ZERO {
            return Err(BudgetError::InvalidRoundingUnit(self.rounding_unit));
        }
        ensure_unit_interval("*", self.fallback_weight)
    }
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            rounding_unit: Decimal::ONE_THOUSAND,
            fallback_weight: Decimal::new(5, 3),
        }
    }
}

impl From<&AllocatorConfig> for AllocatorSettings {
    fn from(config: &AllocatorConfig) -> Self {
        Self {
            rounding_unit: config.rounding_unit,
            fallback_weight: config.fallback_weight,
        }
    }
}

/// Scenario label of an allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Fixed expenses exceed income.
    Deficit,
    /// Income covers every floor; the surplus is distributed.
    Coherent,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deficit => write!(f, "DEFICIT"),
            Self::Coherent => write!(f, "COHERENT"),
        }
    }
}

/// How the surplus was spread across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionBasis {
    /// Proportional to each category's unmet ideal gap.
    Gap,
    /// Proportional to raw weights (every floor already met its ideal).
    Weight,
}

/// Deficit outcome: fixed expenses exceed income, nothing is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeficitReport {
    /// Income.
    pub income: Decimal,
    /// Sum of category floors.
    pub total_fixed: Decimal,
    /// `income - total_fixed` (negative).
    pub surplus: Decimal,
    /// Magnitude of the shortfall, `|surplus|`.
    pub shortfall: Decimal,
    /// Fixed expenses whose category is not in the category list.
    pub unresolved_expenses: Vec<FixedExpenseId>,
}

/// Allocation detail for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    /// Category ID.
    pub category_id: CategoryId,
    /// Category name.
    pub name: String,
    /// Category group.
    pub group: String,
    /// Sum of fixed expenses in this category.
    pub floor: Decimal,
    /// Weight applied (profile weight or fallback).
    pub weight: Decimal,
    /// `income * weight`.
    pub ideal: Decimal,
    /// `max(0, ideal - floor)`.
    pub gap: Decimal,
    /// Share of the surplus.
    pub extra: Decimal,
    /// `floor + extra`, before rounding.
    pub value: Decimal,
    /// Final allocated amount.
    pub amount: Decimal,
    /// True for the last category, which absorbs the rounding residual.
    pub residual: bool,
}

/// Coherent outcome: every category receives an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Income.
    pub income: Decimal,
    /// Sum of category floors.
    pub total_fixed: Decimal,
    /// `income - total_fixed` (non-negative).
    pub surplus: Decimal,
    /// Sum of category gaps.
    pub total_gap: Decimal,
    /// How the surplus was distributed.
    pub basis: DistributionBasis,
    /// Per-category allocations in input order.
    pub allocations: Vec<CategoryAllocation>,
    /// Sum of final amounts.
    pub total_actual: Decimal,
    /// True when `|total_actual - income| < 1`.
    pub matches: bool,
    /// Fixed expenses whose category is not in the category list.
    pub unresolved_expenses: Vec<FixedExpenseId>,
}

impl AllocationResult {
    /// Final amount allocated to `category`.
    #[must_use]
    pub fn amount_for(&self, category: &CategoryId) -> Option<Decimal> {
        self.allocations
            .iter()
            .find(|a| &a.category_id == category)
            .map(|a| a.amount)
    }

    /// The category that absorbed the rounding residual.
    #[must_use]
    pub fn residual_allocation(&self) -> Option<&CategoryAllocation> {
        self.allocations.last()
    }
}

/// Result of an allocation run, tagged with its scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// Fixed expenses exceed income.
    Deficit(DeficitReport),
    /// Surplus distributed across categories.
    Coherent(AllocationResult),
}

impl AllocationOutcome {
    /// Scenario label.
    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        match self {
            Self::Deficit(_) => Scenario::Deficit,
            Self::Coherent(_) => Scenario::Coherent,
        }
    }

    /// Income the run was computed for.
    #[must_use]
    pub const fn income(&self) -> Decimal {
        match self {
            Self::Deficit(d) => d.income,
            Self::Coherent(r) => r.income,
        }
    }

    /// Sum of category floors.
    #[must_use]
    pub const fn total_fixed(&self) -> Decimal {
        match self {
            Self::Deficit(d) => d.total_fixed,
            Self::Coherent(r) => r.total_fixed,
        }
    }

    /// `income - total_fixed`.
    #[must_use]
    pub const fn surplus(&self) -> Decimal {
        match self {
            Self::Deficit(d) => d.surplus,
            Self::Coherent(r) => r.surplus,
        }
    }

    /// Fixed expenses ignored because their category is unknown.
    #[must_use]
    pub fn unresolved_expenses(&self) -> &[FixedExpenseId] {
        match self {
            Self::Deficit(d) => &d.unresolved_expenses,
            Self::Coherent(r) => &r.unresolved_expenses,
        }
    }

    /// The coherent allocation, if any.
    #[must_use]
    pub const fn allocation(&self) -> Option<&AllocationResult> {
        match self {
            Self::Coherent(r) => Some(r),
            Self::Deficit(_) => None,
        }
    }
}

/// A requested budget raised to its category floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorAdjustment {
    /// Category ID.
    pub category_id: CategoryId,
    /// Amount the caller asked for.
    pub requested: Decimal,
    /// Floor it was raised to.
    pub floor: Decimal,
}

/// Budgets after floor enforcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorEnforcement {
    /// Accepted budgets in request order.
    pub budgets: Vec<(CategoryId, Decimal)>,
    /// Budgets that were raised.
    pub adjustments: Vec<FloorAdjustment>,
}
