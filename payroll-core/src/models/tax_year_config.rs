use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll constants that change from one tax year to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    pub tax_year: i32,
    /// Maximum annual wages subject to Social Security tax.
    pub ss_wage_base: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    pub additional_medicare_rate: Decimal,
    /// Applied to gross pay for every filing status.
    pub additional_medicare_threshold: Decimal,
    /// Rate used when the work state is not in the state table.
    pub default_state_rate: Decimal,
    /// Overtime multiple of the hourly rate when no overtime rate is given.
    pub overtime_multiplier: Decimal,
}

impl PayrollTaxConfig {
    /// 2024 employee-side figures.
    pub fn for_2024() -> Self {
        Self {
            tax_year: 2024,
            ss_wage_base: Decimal::from(168_600),
            ss_tax_rate: Decimal::new(62, 3),
            medicare_tax_rate: Decimal::new(145, 4),
            additional_medicare_rate: Decimal::new(9, 3),
            additional_medicare_threshold: Decimal::from(200_000),
            default_state_rate: Decimal::new(5, 2),
            overtime_multiplier: Decimal::new(15, 1),
        }
    }
}
