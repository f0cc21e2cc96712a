//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::format::DEFAULT_THOUSANDS_SEPARATOR;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Allocator tuning.
    #[serde(default)]
    pub allocator: AllocatorConfig,
    /// Report presentation.
    #[serde(default)]
    pub report: ReportConfig,
    /// Plan input location.
    #[serde(default)]
    pub plan: PlanConfig,
}

/// Allocator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocatorConfig {
    /// Every category except the last is rounded to a multiple of this unit.
    #[serde(default = "default_rounding_unit")]
    pub rounding_unit: Decimal,
    /// Weight used for categories the profile does not mention.
    #[serde(default = "default_fallback_weight")]
    pub fallback_weight: Decimal,
    /// Profile used when the plan does not name one.
    #[serde(default = "default_profile")]
    pub default_profile: String,
}

fn default_rounding_unit() -> Decimal {
    Decimal::ONE_THOUSAND
}

fn default_fallback_weight() -> Decimal {
    Decimal::new(5, 3) // 0.005
}

fn default_profile() -> String {
    "BALANCEADO".to_string()
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            rounding_unit: default_rounding_unit(),
            fallback_weight: default_fallback_weight(),
            default_profile: default_profile(),
        }
    }
}

/// Output format for the planner report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Human-readable text lines.
    #[default]
    Text,
    /// Pretty-printed JSON of the allocation outcome.
    Json,
}

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Separator placed between groups of thousands.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,
}

fn default_thousands_separator() -> char {
    DEFAULT_THOUSANDS_SEPARATOR
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            thousands_separator: default_thousands_separator(),
            format: ReportFormat::default(),
        }
    }
}

/// Plan input configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanConfig {
    /// Path of the plan file, used when none is given on the command line.
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PLANWISE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
