use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayFrequency;

/// Regular/overtime split reported on the hourly path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyBreakdown {
    pub regular_pay_annual: Decimal,
    pub overtime_pay_annual: Decimal,
    pub regular_pay_period: Decimal,
    pub overtime_pay_period: Decimal,
}

/// Gross-to-net estimate produced by the payroll estimator.
///
/// Every `*_period` value is its `*_annual` counterpart divided by the pay
/// frequency multiplier, and
/// `net_pay_annual = annual_gross_pay - total_pre_tax_deductions_annual - total_taxes_annual()`.
/// Net pay is not clamped and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    pub tax_year: i32,
    pub pay_frequency: PayFrequency,

    pub period_gross_pay: Decimal,
    pub annual_gross_pay: Decimal,
    pub hourly_breakdown: Option<HourlyBreakdown>,

    pub total_pre_tax_deductions_period: Decimal,
    pub total_pre_tax_deductions_annual: Decimal,
    pub taxable_income_annual: Decimal,

    pub federal_tax_period: Decimal,
    pub federal_tax_annual: Decimal,
    pub social_security_period: Decimal,
    pub social_security_annual: Decimal,
    /// Includes the additional Medicare surtax.
    pub medicare_period: Decimal,
    pub medicare_annual: Decimal,
    pub state_tax_period: Decimal,
    pub state_tax_annual: Decimal,
    pub state_tax_rate: Decimal,
    /// False when the work state was not found and the default rate applied.
    pub state_recognized: bool,

    pub net_pay_period: Decimal,
    pub net_pay_annual: Decimal,

    pub effective_federal_rate_percent: Decimal,
    pub effective_total_rate_percent: Decimal,
}

impl PayrollResult {
    /// Federal, Social Security, Medicare and state tax for the year.
    pub fn total_taxes_annual(&self) -> Decimal {
        self.federal_tax_annual
            + self.social_security_annual
            + self.medicare_annual
            + self.state_tax_annual
    }

    pub fn total_taxes_period(&self) -> Decimal {
        self.federal_tax_period
            + self.social_security_period
            + self.medicare_period
            + self.state_tax_period
    }
}
