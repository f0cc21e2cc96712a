//! Runs one plan through the allocator and renders the result.

use planwise_core::budget::{
    AllocationOutcome, AllocatorSettings, BudgetAllocator, BudgetService, FloorEnforcement,
    ProfileResolution, ReportRenderer,
};
use planwise_shared::types::{CategoryId, Currency};
use planwise_shared::{AppConfig, AppError, AppResult, ReportFormat};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::plan::Plan;

/// Everything produced for one plan.
#[derive(Debug)]
pub struct Run {
    /// Profile the weights came from.
    pub profile: ProfileResolution,
    /// Allocation outcome.
    pub outcome: AllocationOutcome,
    /// Requested budgets after floor enforcement, when the plan has any.
    pub budgets: Option<FloorEnforcement>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    currency: Currency,
    profile: &'a str,
    outcome: &'a AllocationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    budgets: Option<&'a FloorEnforcement>,
}

/// Resolves the plan's profile, allocates its income and checks its budgets.
pub fn execute(config: &AppConfig, plan: &Plan) -> AppResult<Run> {
    let requested = plan
        .profile
        .as_deref()
        .unwrap_or(&config.allocator.default_profile);
    let profile = plan.catalog()?.resolve(requested);

    if profile.fell_back {
        warn!(
            requested = %profile.requested,
            using = %profile.profile.name(),
            "Unknown spending profile, falling back"
        );
    }

    let allocator = BudgetAllocator::new(AllocatorSettings::from(&config.allocator));
    debug!(
        profile = %profile.profile.name(),
        weights = profile.profile.len(),
        rounding_unit = %allocator.settings().rounding_unit,
        fallback_weight = %allocator.settings().fallback_weight,
        "Allocator ready"
    );

    let outcome = allocator.allocate(
        plan.income,
        &plan.categories,
        &plan.fixed_expenses,
        &profile.profile,
    )?;

    for expense in outcome.unresolved_expenses() {
        warn!(fixed_expense = %expense, "Fixed expense references an unknown category, ignored");
    }

    match &outcome {
        AllocationOutcome::Deficit(report) => warn!(
            income = %report.income,
            total_fixed = %report.total_fixed,
            shortfall = %report.shortfall,
            "Fixed expenses exceed income"
        ),
        AllocationOutcome::Coherent(result) => info!(
            income = %result.income,
            surplus = %result.surplus,
            basis = ?result.basis,
            matches = result.matches,
            "Allocation complete"
        ),
    }

    let budgets = if plan.budgets.is_empty() {
        None
    } else {
        Some(enforce_budgets(plan)?)
    };

    Ok(Run {
        profile,
        outcome,
        budgets,
    })
}

fn enforce_budgets(plan: &Plan) -> AppResult<FloorEnforcement> {
    let floors = BudgetService::compute_floors(&plan.fixed_expenses)?;
    let requested: Vec<(CategoryId, _)> = plan
        .budgets
        .iter()
        .map(|(id, amount)| (CategoryId::new(id.as_str()), *amount))
        .collect();

    let enforcement = BudgetService::enforce_floors(&requested, &floors);
    for adjustment in &enforcement.adjustments {
        warn!(
            category = %adjustment.category_id,
            requested = %adjustment.requested,
            floor = %adjustment.floor,
            "Budget below fixed expenses, raised to floor"
        );
    }

    Ok(enforcement)
}

/// Renders `run` in the configured format.
pub fn render(config: &AppConfig, plan: &Plan, run: &Run) -> AppResult<String> {
    match config.report.format {
        ReportFormat::Text => {
            let renderer = ReportRenderer::new(config.report.thousands_separator);
            let mut lines = vec![
                format!("Currency: {}", plan.currency),
                format!("Profile: {}", run.profile.summary()),
            ];
            lines.extend(renderer.render(&run.outcome));
            if let Some(budgets) = &run.budgets {
                lines.extend(renderer.render_budgets(budgets));
            }
            Ok(lines.join("\n"))
        }
        ReportFormat::Json => {
            let report = JsonReport {
                currency: plan.currency,
                profile: run.profile.profile.name(),
                outcome: &run.outcome,
                budgets: run.budgets.as_ref(),
            };
            serde_json::to_string_pretty(&report).map_err(|e| AppError::Internal(e.to_string()))
        }
    }
}
