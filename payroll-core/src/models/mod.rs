mod budget_item;
mod filing_status;
mod pay_frequency;
mod pay_spec;
mod payroll_result;
mod state_tax_rate;
mod tax_bracket;
mod tax_tables;
mod tax_year_config;

pub use budget_item::{BudgetItem, BudgetItemType, NewBudgetItem};
pub use filing_status::FilingStatus;
pub use pay_frequency::PayFrequency;
pub use pay_spec::{PaySpec, PayType};
pub use payroll_result::{HourlyBreakdown, PayrollResult};
pub use state_tax_rate::StateTaxRate;
pub use tax_bracket::TaxBracket;
pub use tax_tables::{TaxTableError, TaxTableSet, TaxYearTables};
pub use tax_year_config::PayrollTaxConfig;
