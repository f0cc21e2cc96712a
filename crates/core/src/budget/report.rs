//! Plain-text rendering of allocation outcomes.
//!
//! Rendering is kept apart from the allocator so the computation stays pure.

use planwise_shared::format::{DEFAULT_THOUSANDS_SEPARATOR, format_thousands};
use rust_decimal::Decimal;

use super::types::{AllocationOutcome, AllocationResult, DeficitReport, FloorEnforcement};

/// Renders allocation outcomes as text lines.
#[derive(Debug, Clone, Copy)]
pub struct ReportRenderer {
    separator: char,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_THOUSANDS_SEPARATOR)
    }
}

impl ReportRenderer {
    /// Creates a renderer grouping thousands with `separator`.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Renders `outcome` as one string per line.
    #[must_use]
    pub fn render(&self, outcome: &AllocationOutcome) -> Vec<String> {
        let mut lines = vec![
            format!("Income: {}", self.amount(outcome.income())),
            format!("Total Fixed: {}", self.amount(outcome.total_fixed())),
            format!("Surplus: {}", self.amount(outcome.surplus())),
            format!("Scenario: {}", outcome.scenario()),
        ];

        match outcome {
            AllocationOutcome::Deficit(report) => self.render_deficit(report, &mut lines),
            AllocationOutcome::Coherent(result) => self.render_coherent(result, &mut lines),
        }

        lines.extend(
            outcome
                .unresolved_expenses()
                .iter()
                .map(|id| format!("Ignored fixed expense {id}: unknown category")),
        );

        lines
    }

    /// Renders `outcome` as a single newline-joined string.
    #[must_use]
    pub fn render_text(&self, outcome: &AllocationOutcome) -> String {
        self.render(outcome).join("\n")
    }

    /// Renders accepted budgets, noting the ones raised to their floor.
    #[must_use]
    pub fn render_budgets(&self, enforcement: &FloorEnforcement) -> Vec<String> {
        enforcement
            .budgets
            .iter()
            .map(|(category_id, amount)| {
                let raised = enforcement
                    .adjustments
                    .iter()
                    .find(|a| &a.category_id == category_id);
                match raised {
                    Some(adjustment) => format!(
                        "Budget {category_id}: {} (raised from {} to cover fixed expenses)",
                        self.amount(*amount),
                        self.amount(adjustment.requested)
                    ),
                    None => format!("Budget {category_id}: {}", self.amount(*amount)),
                }
            })
            .collect()
    }

    fn render_deficit(&self, report: &DeficitReport, lines: &mut Vec<String>) {
        lines.push(format!(
            "Shortfall: {} (fixed expenses exceed income)",
            self.amount(report.shortfall)
        ));
    }

    fn render_coherent(&self, result: &AllocationResult, lines: &mut Vec<String>) {
        lines.push(format!("Total Gap: {}", self.amount(result.total_gap)));
        for allocation in &result.allocations {
            let tag = if allocation.residual {
                "residual"
            } else {
                "rounded"
            };
            lines.push(format!(
                "{}: {} ({tag})",
                allocation.name,
                self.amount(allocation.amount)
            ));
        }
        lines.push(format!("Total Actual: {}", self.amount(result.total_actual)));
        lines.push(format!(
            "Matches Income: {}",
            if result.matches { "yes" } else { "no" }
        ));
    }

    fn amount(&self, value: Decimal) -> String {
        format_thousands(value, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetAllocator, BudgetService, Category, FixedExpense, SpendingProfile};
    use planwise_shared::types::CategoryId;
    use rust_decimal_macros::dec;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("cat_1", "Alquiler", "VIVIENDA"),
            Category::new("cat_viv_net", "Internet", "VIVIENDA"),
            Category::new("cat_2", "Alimentacion", "NECESIDADES"),
            Category::new("cat_3", "Transporte", "NECESIDADES"),
            Category::new("cat_9", "Ocio", "ESTILO_DE_VIDA"),
            Category::new("cat_5", "Ahorro", "FINANCIERO"),
        ]
    }

    #[test]
    fn test_render_coherent() {
        let fixed = vec![
            FixedExpense::new("fe_1", "Arriendo", dec!(1500000), "cat_1"),
            FixedExpense::new("fe_2", "Internet", dec!(100000), "cat_viv_net"),
        ];
        let outcome = BudgetAllocator::default()
            .allocate(
                dec!(5000000),
                &categories(),
                &fixed,
                &SpendingProfile::Balanced.weights(),
            )
            .unwrap();

        let lines = ReportRenderer::default().render(&outcome);

        assert_eq!(
            lines,
            vec![
                "Income: 5.000.000",
                "Total Fixed: 1.600.000",
                "Surplus: 3.400.000",
                "Scenario: COHERENT",
                "Total Gap: 1.500.000",
                "Alquiler: 1.500.000 (rounded)",
                "Internet: 100.000 (rounded)",
                "Alimentacion: 1.360.000 (rounded)",
                "Transporte: 567.000 (rounded)",
                "Ocio: 567.000 (rounded)",
                "Ahorro: 906.000 (residual)",
                "Total Actual: 5.000.000",
                "Matches Income: yes",
            ]
        );
    }

    #[test]
    fn test_render_deficit_with_unresolved() {
        let fixed = vec![
            FixedExpense::new("fe_1", "Arriendo", dec!(1500000), "cat_1"),
            FixedExpense::new("fe_2", "Carro", dec!(900000), "cat_5"),
            FixedExpense::new("fe_3", "Club", dec!(50000), "cat_club"),
        ];
        let outcome = BudgetAllocator::default()
            .allocate(
                dec!(2000000),
                &categories(),
                &fixed,
                &SpendingProfile::Balanced.weights(),
            )
            .unwrap();

        let text = ReportRenderer::new(',').render_text(&outcome);

        assert_eq!(
            text,
            "Income: 2,000,000\n\
             Total Fixed: 2,400,000\n\
             Surplus: -400,000\n\
             Scenario: DEFICIT\n\
             Shortfall: 400,000 (fixed expenses exceed income)\n\
             Ignored fixed expense fe_3: unknown category"
        );
    }

    #[test]
    fn test_render_budgets_marks_raised() {
        let fixed = vec![FixedExpense::new("fe_1", "Arriendo", dec!(1500000), "cat_1")];
        let floors = BudgetService::compute_floors(&fixed).unwrap();
        let enforcement = BudgetService::enforce_floors(
            &[
                (CategoryId::new("cat_1"), dec!(1200000)),
                (CategoryId::new("cat_2"), dec!(800000)),
            ],
            &floors,
        );

        assert_eq!(
            ReportRenderer::default().render_budgets(&enforcement),
            vec![
                "Budget cat_1: 1.500.000 (raised from 1.200.000 to cover fixed expenses)",
                "Budget cat_2: 800.000",
            ]
        );
    }
}
