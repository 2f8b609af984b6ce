use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// One slice of a progressive federal schedule, covering `[min_income, max_income)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub filing_status: FilingStatus,
    pub min_income: Decimal,
    /// `None` marks the unbounded top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    /// Portion of `taxable_income` that falls inside this bracket.
    pub fn taxable_portion(&self, taxable_income: Decimal) -> Decimal {
        if taxable_income <= self.min_income {
            return Decimal::ZERO;
        }
        let ceiling = match self.max_income {
            Some(max) => taxable_income.min(max),
            None => taxable_income,
        };
        ceiling - self.min_income
    }
}
