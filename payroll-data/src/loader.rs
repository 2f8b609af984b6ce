use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use payroll_core::{
    FilingStatus, PayrollTaxConfig, StateTaxRate, TaxBracket, TaxTableError, TaxTableSet,
    TaxYearTables,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const FEDERAL_BRACKETS_FILE: &str = "federal_brackets.csv";
pub const STATE_RATES_FILE: &str = "state_rates.csv";
pub const TAX_YEAR_CONFIG_FILE: &str = "tax_year_config.csv";

/// Errors that can occur when loading reference tables.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unrecognised filing status '{status}' on bracket row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("tax year {0} has brackets or state rates but no config row")]
    MissingConfig(i32),

    #[error("tax year {0} has more than one config row")]
    DuplicateConfig(i32),

    #[error("tables for tax year {year} are invalid: {source}")]
    InvalidTables {
        year: i32,
        #[source]
        source: TaxTableError,
    },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of `federal_brackets.csv`.
///
/// - `filing_status`: `single`, `married` or `head`
/// - `max_income`: empty for the unbounded top bracket
/// - `rate`: marginal rate as a decimal (e.g. `0.22`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FederalBracketRecord {
    pub tax_year: i32,
    pub filing_status: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// A single row of `state_rates.csv`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StateRateRecord {
    pub tax_year: i32,
    pub state: String,
    pub rate: Decimal,
    pub has_no_income_tax: bool,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Decimal>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn read_records<R, T>(reader: R) -> Result<Vec<T>, TaxTableLoaderError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .map(|result| result.map_err(TaxTableLoaderError::from))
        .collect()
}

/// Loader for the versioned reference tables.
///
/// Each of the three CSV files carries a `tax_year` column, so one set of
/// files can hold any number of years. [`TaxTableLoader::build`] groups the
/// rows by year and validates each year's tables.
pub struct TaxTableLoader;

impl TaxTableLoader {
    pub fn parse_brackets<R: Read>(
        reader: R
    ) -> Result<Vec<FederalBracketRecord>, TaxTableLoaderError> {
        read_records(reader)
    }

    pub fn parse_state_rates<R: Read>(
        reader: R
    ) -> Result<Vec<StateRateRecord>, TaxTableLoaderError> {
        read_records(reader)
    }

    pub fn parse_configs<R: Read>(reader: R) -> Result<Vec<PayrollTaxConfig>, TaxTableLoaderError> {
        read_records(reader)
    }

    /// Group parsed rows by tax year and validate every year.
    ///
    /// A year with bracket or state rows but no config row, or with more
    /// than one config row, is rejected. A config row with no brackets fails
    /// validation for that year.
    pub fn build(
        configs: Vec<PayrollTaxConfig>,
        brackets: &[FederalBracketRecord],
        states: &[StateRateRecord],
    ) -> Result<TaxTableSet, TaxTableLoaderError> {
        let mut configured = BTreeSet::new();
        for config in &configs {
            if !configured.insert(config.tax_year) {
                return Err(TaxTableLoaderError::DuplicateConfig(config.tax_year));
            }
        }
        let referenced = brackets
            .iter()
            .map(|b| b.tax_year)
            .chain(states.iter().map(|s| s.tax_year));
        for year in referenced {
            if !configured.contains(&year) {
                return Err(TaxTableLoaderError::MissingConfig(year));
            }
        }

        let mut set = TaxTableSet::new();
        for config in configs {
            let year = config.tax_year;
            let year_brackets = Self::brackets_for_year(brackets, year)?;
            let year_states: Vec<StateTaxRate> = states
                .iter()
                .filter(|s| s.tax_year == year)
                .map(|s| StateTaxRate {
                    state: s.state.clone(),
                    rate: s.rate,
                    has_no_income_tax: s.has_no_income_tax,
                })
                .collect();

            debug!(
                tax_year = year,
                brackets = year_brackets.len(),
                states = year_states.len(),
                "building tax year tables"
            );

            let tables = TaxYearTables::new(config, year_brackets, year_states)
                .map_err(|source| TaxTableLoaderError::InvalidTables { year, source })?;
            set.insert(tables);
        }
        Ok(set)
    }

    /// Read the three table files from `dir` and build the table set.
    pub fn load_dir(dir: &Path) -> Result<TaxTableSet, TaxTableLoaderError> {
        let configs = Self::parse_configs(open(&dir.join(TAX_YEAR_CONFIG_FILE))?)?;
        let brackets = Self::parse_brackets(open(&dir.join(FEDERAL_BRACKETS_FILE))?)?;
        let states = Self::parse_state_rates(open(&dir.join(STATE_RATES_FILE))?)?;
        Self::build(configs, &brackets, &states)
    }

    fn brackets_for_year(
        records: &[FederalBracketRecord],
        year: i32,
    ) -> Result<Vec<TaxBracket>, TaxTableLoaderError> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.tax_year == year)
            .map(|(idx, r)| {
                let filing_status = FilingStatus::parse(&r.filing_status).ok_or_else(|| {
                    TaxTableLoaderError::InvalidFilingStatus {
                        status: r.filing_status.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(TaxBracket {
                    filing_status,
                    min_income: r.min_income,
                    max_income: r.max_income,
                    tax_rate: r.rate,
                })
            })
            .collect()
    }
}

fn open(path: &Path) -> Result<File, TaxTableLoaderError> {
    File::open(path).map_err(|source| TaxTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
