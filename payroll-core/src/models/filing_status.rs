use serde::{Deserialize, Serialize};

/// Federal filing status used to select a bracket schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    #[default]
    Single,
    Married,
    Head,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[FilingStatus::Single, FilingStatus::Married, FilingStatus::Head]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Married => "married",
            Self::Head => "head",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Married => "Married Filing Jointly",
            Self::Head => "Head of Household",
        }
    }

    /// Accepts the lowercase names as well as the IRS short codes.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Some(Self::Single),
            "married" | "mfj" => Some(Self::Married),
            "head" | "hoh" => Some(Self::Head),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
