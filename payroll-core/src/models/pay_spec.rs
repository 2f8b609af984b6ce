use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FilingStatus, PayFrequency};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    #[default]
    Salary,
    Hourly,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Hourly => "hourly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Hourly => "Hourly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary" | "salaried" => Some(Self::Salary),
            "hourly" => Some(Self::Hourly),
            _ => None,
        }
    }
}

/// Typed input to the payroll estimator.
///
/// Deduction amounts are expressed per pay period, in the same unit as
/// `pay_frequency`. `gross_amount` is only read on the salary path and the
/// hourly fields only on the hourly path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySpec {
    pub pay_type: PayType,
    pub gross_amount: Decimal,
    pub pay_frequency: PayFrequency,
    pub hourly_rate: Decimal,
    pub regular_hours_per_week: Decimal,
    pub overtime_hours_per_week: Decimal,
    /// When `None`, overtime is paid at the configured multiple of `hourly_rate`.
    pub overtime_rate: Option<Decimal>,
    pub filing_status: FilingStatus,
    pub work_state: String,
    pub pre_tax_401k: Decimal,
    pub health_insurance_premium: Decimal,
    pub other_pre_tax_deductions: Decimal,
}

impl PaySpec {
    pub const DEFAULT_REGULAR_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

    /// Largest magnitude accepted for any money field (10^15).
    pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

    /// Hours in a week; the largest magnitude accepted for an hours field.
    pub const MAX_WEEKLY_HOURS: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

    /// Copy of this spec with every amount clamped to `±MAX_AMOUNT` and every
    /// hours field to `±MAX_WEEKLY_HOURS`.
    ///
    /// Within these bounds no step of the estimate can overflow a `Decimal`.
    pub fn bounded(&self) -> Self {
        let amount = |v: Decimal| v.clamp(-Self::MAX_AMOUNT, Self::MAX_AMOUNT);
        let hours = |v: Decimal| v.clamp(-Self::MAX_WEEKLY_HOURS, Self::MAX_WEEKLY_HOURS);
        Self {
            gross_amount: amount(self.gross_amount),
            hourly_rate: amount(self.hourly_rate),
            regular_hours_per_week: hours(self.regular_hours_per_week),
            overtime_hours_per_week: hours(self.overtime_hours_per_week),
            overtime_rate: self.overtime_rate.map(amount),
            pre_tax_401k: amount(self.pre_tax_401k),
            health_insurance_premium: amount(self.health_insurance_premium),
            other_pre_tax_deductions: amount(self.other_pre_tax_deductions),
            ..self.clone()
        }
    }

    /// A salaried spec with no deductions.
    pub fn salary(
        gross_amount: Decimal,
        pay_frequency: PayFrequency,
        filing_status: FilingStatus,
        work_state: impl Into<String>,
    ) -> Self {
        Self {
            pay_type: PayType::Salary,
            gross_amount,
            pay_frequency,
            filing_status,
            work_state: work_state.into(),
            ..Self::default()
        }
    }

    /// An hourly spec at 40 regular hours and no overtime or deductions.
    pub fn hourly(
        hourly_rate: Decimal,
        pay_frequency: PayFrequency,
        filing_status: FilingStatus,
        work_state: impl Into<String>,
    ) -> Self {
        Self {
            pay_type: PayType::Hourly,
            hourly_rate,
            pay_frequency,
            filing_status,
            work_state: work_state.into(),
            ..Self::default()
        }
    }
}

impl Default for PaySpec {
    fn default() -> Self {
        Self {
            pay_type: PayType::Salary,
            gross_amount: Decimal::ZERO,
            pay_frequency: PayFrequency::default(),
            hourly_rate: Decimal::ZERO,
            regular_hours_per_week: Self::DEFAULT_REGULAR_HOURS,
            overtime_hours_per_week: Decimal::ZERO,
            overtime_rate: None,
            filing_status: FilingStatus::default(),
            work_state: String::new(),
            pre_tax_401k: Decimal::ZERO,
            health_insurance_premium: Decimal::ZERO,
            other_pre_tax_deductions: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_spec_uses_forty_regular_hours() {
        let spec = PaySpec::default();

        assert_eq!(spec.regular_hours_per_week, dec!(40));
        assert_eq!(spec.overtime_hours_per_week, dec!(0));
        assert_eq!(spec.overtime_rate, None);
    }

    #[test]
    fn hourly_constructor_sets_pay_type() {
        let spec = PaySpec::hourly(dec!(25), PayFrequency::Weekly, FilingStatus::Single, "Texas");

        assert_eq!(spec.pay_type, PayType::Hourly);
        assert_eq!(spec.hourly_rate, dec!(25));
        assert_eq!(spec.work_state, "Texas");
    }

    fn sci(value: &str) -> Decimal {
        Decimal::from_scientific(value).expect("valid scientific literal")
    }

    #[test]
    fn max_amount_is_ten_to_the_fifteenth() {
        assert_eq!(PaySpec::MAX_AMOUNT, Decimal::from(1_000_000_000_000_000_i64));
    }

    #[test]
    fn bounded_clamps_amounts_and_hours() {
        let spec = PaySpec {
            gross_amount: sci("1e28"),
            hourly_rate: sci("-5e20"),
            regular_hours_per_week: dec!(1000),
            overtime_hours_per_week: dec!(-200),
            overtime_rate: Some(sci("2e16")),
            pre_tax_401k: sci("3e18"),
            ..PaySpec::default()
        };

        let bounded = spec.bounded();

        assert_eq!(bounded.gross_amount, PaySpec::MAX_AMOUNT);
        assert_eq!(bounded.hourly_rate, -PaySpec::MAX_AMOUNT);
        assert_eq!(bounded.regular_hours_per_week, dec!(168));
        assert_eq!(bounded.overtime_hours_per_week, dec!(-168));
        assert_eq!(bounded.overtime_rate, Some(PaySpec::MAX_AMOUNT));
        assert_eq!(bounded.pre_tax_401k, PaySpec::MAX_AMOUNT);
    }

    #[test]
    fn bounded_leaves_ordinary_spec_unchanged() {
        let spec = PaySpec {
            overtime_hours_per_week: dec!(5),
            pre_tax_401k: dec!(250),
            ..PaySpec::hourly(dec!(25), PayFrequency::Weekly, FilingStatus::Single, "Texas")
        };

        assert_eq!(spec.bounded(), spec);
    }
}
