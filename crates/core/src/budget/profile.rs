//! Built-in spending profiles and profile resolution.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::WeightProfile;

/// Weights are stored in thousandths (`200` = 0.20).
type WeightTable = &'static [(&'static str, i64)];

/// Savings and debt first; leisure and vices cut to the minimum.
const CONSERVATIVE: WeightTable = &[
    ("cat_1", 250),
    ("cat_2", 150),
    ("cat_3", 50),
    ("cat_gasolina", 50),
    ("cat_4", 50),
    ("cat_8", 50),
    ("cat_9", 50),
    ("cat_personal", 50),
    ("cat_deporte", 0),
    ("cat_vicios", 0),
    ("cat_10", 50),
    ("cat_5", 100),
    ("cat_6", 0),
    ("cat_7", 100),
    ("cat_fin_4", 50),
    ("cat_fin_5", 50),
];

/// Roughly 50/30/20 needs, wants and savings, including household utilities.
const BALANCED: WeightTable = &[
    ("cat_1", 200),
    ("cat_2", 120),
    ("cat_3", 50),
    ("cat_gasolina", 40),
    ("cat_4", 50),
    ("cat_9", 50),
    ("cat_personal", 40),
    ("cat_deporte", 30),
    ("cat_vicios", 10),
    ("cat_8", 50),
    ("cat_10", 40),
    ("cat_5", 80),
    ("cat_6", 50),
    ("cat_7", 50),
    ("cat_fin_4", 20),
    ("cat_fin_5", 20),
    ("cat_rest", 40),
    ("cat_viv_luz", 10),
    ("cat_viv_agua", 10),
    ("cat_viv_net", 20),
    ("cat_viv_cel", 10),
    ("cat_viv_man", 10),
];

/// Quality of life today; savings kept low.
const FLEXIBLE: WeightTable = &[
    ("cat_1", 250),
    ("cat_2", 100),
    ("cat_3", 50),
    ("cat_gasolina", 50),
    ("cat_4", 50),
    ("cat_9", 100),
    ("cat_personal", 100),
    ("cat_deporte", 50),
    ("cat_vicios", 50),
    ("cat_8", 50),
    ("cat_10", 100),
    ("cat_5", 20),
    ("cat_6", 0),
    ("cat_7", 40),
    ("cat_fin_4", 20),
    ("cat_fin_5", 20),
];

/// Built-in spending profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpendingProfile {
    /// `CONSERVADOR`.
    #[serde(rename = "CONSERVADOR")]
    Conservative,
    /// `BALANCEADO`.
    #[default]
    #[serde(rename = "BALANCEADO")]
    Balanced,
    /// `FLEXIBLE`.
    Flexible,
}

impl SpendingProfile {
    /// Every built-in profile.
    pub const ALL: [Self; 3] = [Self::Conservative, Self::Balanced, Self::Flexible];

    /// Profile code as used in plan files.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Conservative => "CONSERVADOR",
            Self::Balanced => "BALANCEADO",
            Self::Flexible => "FLEXIBLE",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Conservative => "Savings and debt payoff first, leisure kept to a minimum",
            Self::Balanced => "50% needs, 30% wants, 20% savings",
            Self::Flexible => "Quality of life today, lower savings capacity",
        }
    }

    const fn table(self) -> WeightTable {
        match self {
            Self::Conservative => CONSERVATIVE,
            Self::Balanced => BALANCED,
            Self::Flexible => FLEXIBLE,
        }
    }

    /// Weight profile for this built-in.
    #[must_use]
    pub fn weights(self) -> WeightProfile {
        WeightProfile::from_trusted(
            self.code(),
            self.table()
                .iter()
                .map(|(id, permille)| (*id, Decimal::new(*permille, 3))),
        )
    }
}

impl std::fmt::Display for SpendingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for SpendingProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CONSERVADOR" | "CONSERVATIVE" => Ok(Self::Conservative),
            "BALANCEADO" | "BALANCED" => Ok(Self::Balanced),
            "FLEXIBLE" => Ok(Self::Flexible),
            _ => Err(format!("Unknown spending profile: {s}")),
        }
    }
}

/// Outcome of looking up a profile by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResolution {
    /// Name the caller asked for.
    pub requested: String,
    /// Profile that will be used.
    pub profile: WeightProfile,
    /// True when `requested` was unknown and the balanced profile was used.
    pub fell_back: bool,
    /// Built-in the weights came from; `None` for custom profiles.
    pub builtin: Option<SpendingProfile>,
}

impl ProfileResolution {
    /// Profile name with the built-in description, or `custom`.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.builtin {
            Some(builtin) => format!("{builtin} ({})", builtin.description()),
            None => format!("{} (custom)", self.profile.name()),
        }
    }
}

/// Built-in profiles plus caller-supplied ones.
///
/// Names are matched case-insensitively; custom profiles shadow built-ins.
#[derive(Debug, Clone, Default)]
pub struct ProfileCatalog {
    custom: HashMap<String, WeightProfile>,
}

impl ProfileCatalog {
    /// Catalog with only the built-in profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom profile under its own name.
    #[must_use]
    pub fn with_profile(mut self, profile: WeightProfile) -> Self {
        self.custom.insert(profile.name().to_uppercase(), profile);
        self
    }

    /// Looks up `name`, falling back to `BALANCEADO` when it is unknown.
    #[must_use]
    pub fn resolve(&self, name: &str) -> ProfileResolution {
        let key = name.trim().to_uppercase();

        if let Some(profile) = self.custom.get(&key) {
            return ProfileResolution {
                requested: name.to_string(),
                profile: profile.clone(),
                fell_back: false,
                builtin: None,
            };
        }

        match key.parse::<SpendingProfile>() {
            Ok(builtin) => ProfileResolution {
                requested: name.to_string(),
                profile: builtin.weights(),
                fell_back: false,
                builtin: Some(builtin),
            },
            Err(_) => ProfileResolution {
                requested: name.to_string(),
                profile: SpendingProfile::Balanced.weights(),
                fell_back: true,
                builtin: Some(SpendingProfile::Balanced),
            },
        }
    }
}
