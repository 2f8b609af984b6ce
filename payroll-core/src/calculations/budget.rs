use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PayrollResult;
use crate::calculations::common::round_half_up;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Which annual figure becomes the monthly budget income.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeBasis {
    Gross,
    #[default]
    Net,
}

impl IncomeBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gross => "gross",
            Self::Net => "net",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gross" => Some(Self::Gross),
            "net" => Some(Self::Net),
            _ => None,
        }
    }
}

/// Monthly income derived from an estimate: the annual gross or net pay over
/// twelve months, rounded to cents.
pub fn monthly_income(
    result: &PayrollResult,
    basis: IncomeBasis,
) -> Decimal {
    let annual = match basis {
        IncomeBasis::Gross => result.annual_gross_pay,
        IncomeBasis::Net => result.net_pay_annual,
    };
    round_half_up(annual / MONTHS_PER_YEAR)
}
