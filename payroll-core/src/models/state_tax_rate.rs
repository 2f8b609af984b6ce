use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat income-tax rate applied to taxable income for a work state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxRate {
    pub state: String,
    pub rate: Decimal,
    pub has_no_income_tax: bool,
}
