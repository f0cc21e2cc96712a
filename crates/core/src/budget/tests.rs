//! Property-based tests for budget allocation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocator::BudgetAllocator;
use super::types::{AllocationOutcome, Category, DistributionBasis, FixedExpense, WeightProfile};

/// Income between 1,000,000 and 100,000,000 whole units.
fn income() -> impl Strategy<Value = Decimal> {
    (1_000_000i64..100_000_000).prop_map(Decimal::from)
}

/// Between 1 and 7 categories ahead of the residual one, each with a weight
/// of at most 0.10 and a floor share of at most 1/14 of income (in basis points).
fn category_specs() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..=100, 0i64..=700), 1..8)
}

/// Builds categories `c0..cN` plus a residual category `last` weighted 0.30
/// with no fixed expense, which keeps its share well above any rounding drift.
fn build(income: Decimal, specs: &[(i64, i64)]) -> (Vec<Category>, Vec<FixedExpense>, WeightProfile) {
    let mut categories = Vec::new();
    let mut fixed = Vec::new();
    let mut profile = WeightProfile::new("PROP");

    for (i, (permille, floor_bps)) in specs.iter().enumerate() {
        let id = format!("c{i}");
        categories.push(Category::new(id.as_str(), format!("Category {i}"), "G"));
        profile = profile
            .with_weight(id.as_str(), Decimal::new(*permille, 3))
            .unwrap();
        let floor = (income * Decimal::new(*floor_bps, 4)).round_dp(0);
        if floor > Decimal::ZERO {
            fixed.push(FixedExpense::new(format!("fe{i}"), "Fixed", floor, id.as_str()));
        }
    }

    categories.push(Category::new("last", "Residual", "G"));
    profile = profile.with_weight("last", Decimal::new(3, 1)).unwrap();

    (categories, fixed, profile)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Totals reconcile to income for coherent scenarios.
    #[test]
    fn prop_reconciliation(income in income(), specs in category_specs()) {
        let (categories, fixed, profile) = build(income, &specs);
        let outcome = BudgetAllocator::default()
            .allocate(income, &categories, &fixed, &profile)
            .unwrap();

        let result = outcome.allocation().unwrap();
        let sum: Decimal = result.allocations.iter().map(|a| a.amount).sum();
        prop_assert_eq!(sum, result.total_actual);
        prop_assert!((sum - income).abs() < Decimal::ONE);
        prop_assert!(result.matches);
    }

    /// No final allocation is negative.
    #[test]
    fn prop_non_negative(income in income(), specs in category_specs()) {
        let (categories, fixed, profile) = build(income, &specs);
        let outcome = BudgetAllocator::default()
            .allocate(income, &categories, &fixed, &profile)
            .unwrap();

        for allocation in &outcome.allocation().unwrap().allocations {
            prop_assert!(allocation.amount >= Decimal::ZERO);
            prop_assert!(allocation.floor >= Decimal::ZERO);
            prop_assert!(allocation.gap >= Decimal::ZERO);
        }
    }

    /// Every category but the last lands on a multiple of 1000.
    #[test]
    fn prop_rounded_to_thousands(income in income(), specs in category_specs()) {
        let (categories, fixed, profile) = build(income, &specs);
        let outcome = BudgetAllocator::default()
            .allocate(income, &categories, &fixed, &profile)
            .unwrap();

        let result = outcome.allocation().unwrap();
        let (last, head) = result.allocations.split_last().unwrap();
        for allocation in head {
            prop_assert!((allocation.amount % Decimal::ONE_THOUSAND).is_zero());
            prop_assert!(!allocation.residual);
        }
        prop_assert!(last.residual);
    }

    /// Floors above income always produce a deficit with no allocation.
    #[test]
    fn prop_deficit_detection(
        income in income(),
        excess in 1i64..10_000_000,
        split in 1u32..5,
    ) {
        let total_fixed = income + Decimal::from(excess);
        let share = total_fixed / Decimal::from(split);
        let categories: Vec<Category> = (0..split)
            .map(|i| Category::new(format!("c{i}").as_str(), "C", "G"))
            .collect();
        let fixed: Vec<FixedExpense> = (0..split)
            .map(|i| FixedExpense::new(format!("fe{i}"), "F", share, format!("c{i}").as_str()))
            .collect();

        let outcome = BudgetAllocator::default()
            .allocate(income, &categories, &fixed, &WeightProfile::new("EMPTY"))
            .unwrap();

        match outcome {
            AllocationOutcome::Deficit(report) => {
                prop_assert!(report.surplus < Decimal::ZERO);
                prop_assert_eq!(report.shortfall, report.surplus.abs());
                prop_assert_eq!(report.income, income);
            }
            AllocationOutcome::Coherent(_) => prop_assert!(false, "expected deficit"),
        }
    }

    /// Moving a different category to the end keeps the total and moves the residual.
    #[test]
    fn prop_order_sensitivity(income in income(), specs in category_specs()) {
        let (mut categories, fixed, profile) = build(income, &specs);
        // A second unfloored category up front, sized like `last`, so either can be residual.
        categories.insert(0, Category::new("head", "Head", "G"));
        let profile = profile.with_weight("head", Decimal::new(3, 1)).unwrap();
        let allocator = BudgetAllocator::default();

        let original = allocator.allocate(income, &categories, &fixed, &profile).unwrap();
        categories.rotate_left(1);
        let rotated = allocator.allocate(income, &categories, &fixed, &profile).unwrap();

        let original = original.allocation().unwrap();
        let rotated = rotated.allocation().unwrap();
        prop_assert_eq!(rotated.residual_allocation().unwrap().category_id.as_str(), "head");
        prop_assert_eq!(original.total_fixed, rotated.total_fixed);
        prop_assert_eq!(original.total_gap, rotated.total_gap);
        prop_assert_eq!(original.total_actual, income);
        prop_assert_eq!(original.total_actual, rotated.total_actual);
    }

    /// When every floor covers its ideal, surplus follows raw weights.
    #[test]
    fn prop_zero_gap_uses_weights(
        income in income(),
        permilles in prop::collection::vec(1i64..=100, 2..6),
    ) {
        let mut categories = Vec::new();
        let mut fixed = Vec::new();
        let mut profile = WeightProfile::new("FULL");
        for (i, permille) in permilles.iter().enumerate() {
            let id = format!("c{i}");
            let weight = Decimal::new(*permille, 3);
            categories.push(Category::new(id.as_str(), "C", "G"));
            profile = profile.with_weight(id.as_str(), weight).unwrap();
            fixed.push(FixedExpense::new(format!("fe{i}"), "F", income * weight, id.as_str()));
        }

        let outcome = BudgetAllocator::default()
            .allocate(income, &categories, &fixed, &profile)
            .unwrap();
        let result = outcome.allocation().unwrap();

        prop_assert_eq!(result.basis, DistributionBasis::Weight);
        prop_assert!(result.total_gap.is_zero());

        let total_weight: Decimal = permilles.iter().map(|p| Decimal::new(*p, 3)).sum();
        for (allocation, permille) in result.allocations.iter().zip(&permilles) {
            let expected = result.surplus * (Decimal::new(*permille, 3) / total_weight);
            prop_assert_eq!(allocation.extra, expected);
        }
    }

    /// Allocation is a deterministic function of its inputs.
    #[test]
    fn prop_deterministic(income in income(), specs in category_specs()) {
        let (categories, fixed, profile) = build(income, &specs);
        let allocator = BudgetAllocator::default();
        let first = allocator.allocate(income, &categories, &fixed, &profile).unwrap();
        let second = allocator.allocate(income, &categories, &fixed, &profile).unwrap();
        prop_assert_eq!(first, second);
    }
}
