//! Plan file loading.
//!
//! A plan is a TOML document holding the income, categories, fixed expenses
//! and optional custom weight profiles for one allocation run.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use config::{Config, File, FileFormat};
use planwise_core::budget::{Category, FixedExpense, ProfileCatalog, WeightProfile};
use planwise_shared::types::Currency;
use planwise_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;

/// One allocation run as read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Monthly income.
    pub income: Decimal,
    /// Currency of every amount in the plan.
    #[serde(default)]
    pub currency: Currency,
    /// Profile name; the configured default is used when absent.
    #[serde(default)]
    pub profile: Option<String>,
    /// Categories in allocation order.
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Fixed expenses.
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    /// Custom profiles: name -> category -> weight.
    #[serde(default)]
    pub profiles: HashMap<String, HashMap<String, Decimal>>,
    /// Requested monthly budgets per category, checked against fixed expenses.
    #[serde(default)]
    pub budgets: BTreeMap<String, Decimal>,
}

impl Plan {
    /// Reads a plan from a TOML file.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "plan file {}",
                path.display()
            )));
        }

        let source = File::from(path).format(FileFormat::Toml).required(true);
        Self::from_source(Config::builder().add_source(source))
    }

    /// Parses a plan from TOML text.
    pub fn parse_toml(text: &str) -> AppResult<Self> {
        Self::from_source(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
    }

    fn from_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> AppResult<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Built-in profiles plus the plan's custom ones.
    pub fn catalog(&self) -> AppResult<ProfileCatalog> {
        self.profiles
            .iter()
            .try_fold(ProfileCatalog::new(), |catalog, (name, weights)| {
                let profile = WeightProfile::from_weights(
                    name.as_str(),
                    weights.iter().map(|(id, w)| (id.as_str(), *w)),
                )?;
                Ok(catalog.with_profile(profile))
            })
    }
}
