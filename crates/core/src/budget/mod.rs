//! Monthly income allocation across spending categories.

pub mod allocator;
pub mod error;
pub mod profile;
pub mod report;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use allocator::BudgetAllocator;
pub use error::BudgetError;
pub use profile::{ProfileCatalog, ProfileResolution, SpendingProfile};
pub use report::ReportRenderer;
pub use service::BudgetService;
pub use types::{
    AllocationOutcome, AllocationResult, AllocatorSettings, Category, CategoryAllocation,
    DeficitReport, DistributionBasis, FixedExpense, FloorAdjustment, FloorEnforcement, Scenario,
    WeightProfile,
};
