//! Planwise budget planner
//!
//! Reads a plan file, distributes its income across the listed categories
//! and prints the allocation report.
//!
//! Usage: planwise [PLAN_FILE]

mod plan;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use planwise_shared::{AppConfig, AppError};

use crate::plan::Plan;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing; the report itself goes to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planwise=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (error_code, exit_code) = failure_codes(&err);
            error!(
                error = format!("{err:#}"),
                error_code, exit_code, "Planner failed"
            );
            ExitCode::from(exit_code)
        }
    }
}

/// Machine-readable error code and process exit code for a failed run.
fn failure_codes(err: &anyhow::Error) -> (&'static str, u8) {
    err.downcast_ref::<AppError>()
        .map_or(("UNEXPECTED_ERROR", 1), |app| {
            (app.error_code(), app.exit_code())
        })
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;

    let path = std::env::args()
        .nth(1)
        .or_else(|| config.plan.path.clone())
        .map(PathBuf::from)
        .ok_or_else(|| {
            AppError::Configuration(
                "no plan file given and PLANWISE__PLAN__PATH is not set".to_string(),
            )
        })?;

    let plan = Plan::load(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!(
        path = %path.display(),
        categories = plan.categories.len(),
        fixed_expenses = plan.fixed_expenses.len(),
        "Loaded plan"
    );

    let run = runner::execute(&config, &plan)?;
    println!("{}", runner::render(&config, &plan, &run)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_codes_from_app_error() {
        let err = anyhow::Error::from(AppError::Validation("bad weight".to_string()))
            .context("Failed to allocate");
        assert_eq!(failure_codes(&err), ("VALIDATION_ERROR", 65));

        let err = anyhow::Error::from(AppError::NotFound("plan.toml".to_string()));
        assert_eq!(failure_codes(&err), ("NOT_FOUND", 66));
    }

    #[test]
    fn test_failure_codes_for_other_errors() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(failure_codes(&err), ("UNEXPECTED_ERROR", 1));
    }
}
