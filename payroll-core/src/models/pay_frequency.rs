use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a paycheck is issued.
///
/// Each frequency carries a fixed annualization multiplier:
///
/// | Frequency   | Periods per year |
/// |-------------|------------------|
/// | Weekly      | 52               |
/// | Biweekly    | 26               |
/// | Semimonthly | 24               |
/// | Monthly     | 12               |
/// | Annual      | 1                |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    Weekly,
    #[default]
    Biweekly,
    Semimonthly,
    Monthly,
    Annual,
}

impl PayFrequency {
    pub fn all() -> &'static [PayFrequency] {
        &[
            PayFrequency::Weekly,
            PayFrequency::Biweekly,
            PayFrequency::Semimonthly,
            PayFrequency::Monthly,
            PayFrequency::Annual,
        ]
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Weekly => 52,
            Self::Biweekly => 26,
            Self::Semimonthly => 24,
            Self::Monthly => 12,
            Self::Annual => 1,
        }
    }

    /// The annualization multiplier as a decimal.
    pub fn multiplier(&self) -> Decimal {
        Decimal::from(self.periods_per_year())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Semimonthly => "semimonthly",
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Biweekly => "Bi-weekly",
            Self::Semimonthly => "Semi-monthly",
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "biweekly" | "bi-weekly" => Some(Self::Biweekly),
            "semimonthly" | "semi-monthly" => Some(Self::Semimonthly),
            "monthly" => Some(Self::Monthly),
            "annual" | "annually" | "yearly" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
