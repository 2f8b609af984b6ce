use payroll_core::TaxTableSet;

use crate::loader::{TaxTableLoader, TaxTableLoaderError};

const FEDERAL_BRACKETS_CSV: &str = include_str!("../data/federal_brackets.csv");
const STATE_RATES_CSV: &str = include_str!("../data/state_rates.csv");
const TAX_YEAR_CONFIG_CSV: &str = include_str!("../data/tax_year_config.csv");

/// Tables compiled into the binary (currently tax year 2024).
pub fn builtin_tables() -> Result<TaxTableSet, TaxTableLoaderError> {
    TaxTableLoader::build(
        TaxTableLoader::parse_configs(TAX_YEAR_CONFIG_CSV.as_bytes())?,
        &TaxTableLoader::parse_brackets(FEDERAL_BRACKETS_CSV.as_bytes())?,
        &TaxTableLoader::parse_state_rates(STATE_RATES_CSV.as_bytes())?,
    )
}
