//! Versioned reference tables consumed by the payroll estimator.
//!
//! A [`TaxYearTables`] bundles everything the estimator needs for one tax
//! year: the payroll constants, the federal bracket schedules for every
//! filing status, and the flat state rates. A [`TaxTableSet`] keys those
//! bundles by year so that a new year is a data change, not a code change.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FilingStatus, PayrollTaxConfig, StateTaxRate, TaxBracket};

/// Structural problems found while assembling a year of tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("no federal brackets for filing status '{0}'")]
    NoBrackets(FilingStatus),

    #[error("first '{status}' bracket starts at {min}, expected 0")]
    FirstBracketNotZero { status: FilingStatus, min: Decimal },

    #[error("'{status}' brackets are not contiguous: expected {expected}, found {found}")]
    BracketGap {
        status: FilingStatus,
        expected: Decimal,
        found: Decimal,
    },

    #[error("'{status}' bracket starting at {min} has max {max} not above its min")]
    EmptyBracket {
        status: FilingStatus,
        min: Decimal,
        max: Decimal,
    },

    #[error("'{status}' bracket starting at {min} is unbounded but not last")]
    UnboundedBracketNotLast { status: FilingStatus, min: Decimal },

    #[error("top '{status}' bracket is capped at {max}; it must be unbounded")]
    BoundedTopBracket { status: FilingStatus, max: Decimal },

    #[error("'{status}' bracket rate must be between 0 and 1, got {rate}")]
    InvalidBracketRate { status: FilingStatus, rate: Decimal },

    #[error("state rate for '{state}' must be between 0 and 1, got {rate}")]
    InvalidStateRate { state: String, rate: Decimal },

    #[error("state '{0}' appears more than once")]
    DuplicateState(String),

    #[error("'{state}' has no income tax but carries rate {rate}")]
    NoIncomeTaxStateWithRate { state: String, rate: Decimal },

    #[error("{name} must be between 0 and 1, got {rate}")]
    InvalidConfigRate { name: &'static str, rate: Decimal },

    #[error("social security wage base must be positive, got {0}")]
    InvalidWageBase(Decimal),

    #[error("overtime multiplier must be positive, got {0}")]
    InvalidOvertimeMultiplier(Decimal),

    #[error("additional medicare threshold must not be negative, got {0}")]
    InvalidMedicareThreshold(Decimal),
}

/// Reference data for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    tax_year: i32,
    config: PayrollTaxConfig,
    brackets: Vec<TaxBracket>,
    state_rates: BTreeMap<String, StateTaxRate>,
}

impl TaxYearTables {
    /// Assembles and validates one year of tables.
    ///
    /// Brackets may arrive in any order; they are sorted by filing status and
    /// lower bound before validation. A state listed twice, ignoring case and
    /// surrounding whitespace, is rejected.
    pub fn new(
        config: PayrollTaxConfig,
        mut brackets: Vec<TaxBracket>,
        state_rates: Vec<StateTaxRate>,
    ) -> Result<Self, TaxTableError> {
        brackets.sort_by(|a, b| {
            a.filing_status
                .cmp(&b.filing_status)
                .then(a.min_income.cmp(&b.min_income))
        });

        let mut seen = BTreeSet::new();
        let mut by_state = BTreeMap::new();
        for rate in state_rates {
            if !seen.insert(rate.state.trim().to_ascii_lowercase()) {
                return Err(TaxTableError::DuplicateState(rate.state));
            }
            by_state.insert(rate.state.clone(), rate);
        }

        let tables = Self {
            tax_year: config.tax_year,
            config,
            brackets,
            state_rates: by_state,
        };
        tables.validate()?;
        Ok(tables)
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    pub fn config(&self) -> &PayrollTaxConfig {
        &self.config
    }

    /// Brackets for `status`, ordered by `min_income`.
    pub fn brackets_for(
        &self,
        status: FilingStatus,
    ) -> impl Iterator<Item = &TaxBracket> {
        self.brackets
            .iter()
            .filter(move |b| b.filing_status == status)
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Looks up a state by name, ignoring surrounding whitespace and ASCII case.
    pub fn state_rate(
        &self,
        state: &str,
    ) -> Option<&StateTaxRate> {
        let state = state.trim();
        self.state_rates.get(state).or_else(|| {
            self.state_rates
                .values()
                .find(|r| r.state.eq_ignore_ascii_case(state))
        })
    }

    /// All states in alphabetical order.
    pub fn state_rates(&self) -> impl Iterator<Item = &StateTaxRate> {
        self.state_rates.values()
    }

    pub fn validate(&self) -> Result<(), TaxTableError> {
        self.validate_config()?;
        for status in FilingStatus::all() {
            self.validate_schedule(*status)?;
        }
        for rate in self.state_rates.values() {
            if !is_unit_rate(rate.rate) {
                return Err(TaxTableError::InvalidStateRate {
                    state: rate.state.clone(),
                    rate: rate.rate,
                });
            }
            if rate.has_no_income_tax && !rate.rate.is_zero() {
                return Err(TaxTableError::NoIncomeTaxStateWithRate {
                    state: rate.state.clone(),
                    rate: rate.rate,
                });
            }
        }
        Ok(())
    }

    fn validate_config(&self) -> Result<(), TaxTableError> {
        let c = &self.config;
        if c.ss_wage_base <= Decimal::ZERO {
            return Err(TaxTableError::InvalidWageBase(c.ss_wage_base));
        }
        if c.overtime_multiplier <= Decimal::ZERO {
            return Err(TaxTableError::InvalidOvertimeMultiplier(
                c.overtime_multiplier,
            ));
        }
        if c.additional_medicare_threshold < Decimal::ZERO {
            return Err(TaxTableError::InvalidMedicareThreshold(
                c.additional_medicare_threshold,
            ));
        }
        let rates = [
            ("social security tax rate", c.ss_tax_rate),
            ("medicare tax rate", c.medicare_tax_rate),
            ("additional medicare rate", c.additional_medicare_rate),
            ("default state rate", c.default_state_rate),
        ];
        for (name, rate) in rates {
            if !is_unit_rate(rate) {
                return Err(TaxTableError::InvalidConfigRate { name, rate });
            }
        }
        Ok(())
    }

    fn validate_schedule(
        &self,
        status: FilingStatus,
    ) -> Result<(), TaxTableError> {
        let schedule: Vec<&TaxBracket> = self.brackets_for(status).collect();
        let Some(first) = schedule.first() else {
            return Err(TaxTableError::NoBrackets(status));
        };
        if !first.min_income.is_zero() {
            return Err(TaxTableError::FirstBracketNotZero {
                status,
                min: first.min_income,
            });
        }

        let mut expected_min = Decimal::ZERO;
        for (idx, bracket) in schedule.iter().enumerate() {
            if !is_unit_rate(bracket.tax_rate) {
                return Err(TaxTableError::InvalidBracketRate {
                    status,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.min_income != expected_min {
                return Err(TaxTableError::BracketGap {
                    status,
                    expected: expected_min,
                    found: bracket.min_income,
                });
            }
            let is_last = idx == schedule.len() - 1;
            match (bracket.max_income, is_last) {
                (Some(max), _) if max <= bracket.min_income => {
                    return Err(TaxTableError::EmptyBracket {
                        status,
                        min: bracket.min_income,
                        max,
                    });
                }
                (Some(max), true) => {
                    return Err(TaxTableError::BoundedTopBracket { status, max });
                }
                (Some(max), false) => expected_min = max,
                (None, false) => {
                    return Err(TaxTableError::UnboundedBracketNotLast {
                        status,
                        min: bracket.min_income,
                    });
                }
                (None, true) => {}
            }
        }
        Ok(())
    }
}

fn is_unit_rate(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}

/// Tax tables for every known year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxTableSet {
    years: BTreeMap<i32, TaxYearTables>,
}

impl TaxTableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a year, returning the tables it replaced if the year was present.
    pub fn insert(
        &mut self,
        tables: TaxYearTables,
    ) -> Option<TaxYearTables> {
        self.years.insert(tables.tax_year(), tables)
    }

    pub fn get(
        &self,
        tax_year: i32,
    ) -> Option<&TaxYearTables> {
        self.years.get(&tax_year)
    }

    /// The most recent year in the set.
    pub fn latest(&self) -> Option<&TaxYearTables> {
        self.years.values().next_back()
    }

    /// Known years, oldest first.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn schedule(status: FilingStatus) -> Vec<TaxBracket> {
        vec![
            TaxBracket {
                filing_status: status,
                min_income: dec!(0),
                max_income: Some(dec!(10000)),
                tax_rate: dec!(0.10),
            },
            TaxBracket {
                filing_status: status,
                min_income: dec!(10000),
                max_income: None,
                tax_rate: dec!(0.20),
            },
        ]
    }

    fn all_schedules() -> Vec<TaxBracket> {
        FilingStatus::all().iter().flat_map(|s| schedule(*s)).collect()
    }

    fn states() -> Vec<StateTaxRate> {
        vec![
            StateTaxRate {
                state: "Texas".to_string(),
                rate: dec!(0),
                has_no_income_tax: true,
            },
            StateTaxRate {
                state: "Utah".to_string(),
                rate: dec!(0.0465),
                has_no_income_tax: false,
            },
        ]
    }

    fn config(year: i32) -> PayrollTaxConfig {
        PayrollTaxConfig {
            tax_year: year,
            ..PayrollTaxConfig::for_2024()
        }
    }

    // =========================================================================
    // TaxYearTables::new tests
    // =========================================================================

    #[test]
    fn new_accepts_valid_tables() {
        let tables = TaxYearTables::new(config(2024), all_schedules(), states());

        assert!(tables.is_ok());
    }

    #[test]
    fn new_sorts_unordered_brackets() {
        let mut brackets = all_schedules();
        brackets.reverse();

        let tables = TaxYearTables::new(config(2024), brackets, states()).unwrap();
        let mins: Vec<Decimal> = tables
            .brackets_for(FilingStatus::Head)
            .map(|b| b.min_income)
            .collect();

        assert_eq!(mins, vec![dec!(0), dec!(10000)]);
    }

    #[test]
    fn new_rejects_missing_schedule() {
        let brackets: Vec<TaxBracket> = all_schedules()
            .into_iter()
            .filter(|b| b.filing_status != FilingStatus::Married)
            .collect();

        let result = TaxYearTables::new(config(2024), brackets, states());

        assert_eq!(result, Err(TaxTableError::NoBrackets(FilingStatus::Married)));
    }

    #[test]
    fn new_rejects_gap_between_brackets() {
        let mut brackets = all_schedules();
        brackets[1].min_income = dec!(12000);

        let result = TaxYearTables::new(config(2024), brackets, states());

        assert_eq!(
            result,
            Err(TaxTableError::BracketGap {
                status: FilingStatus::Single,
                expected: dec!(10000),
                found: dec!(12000),
            })
        );
    }

    #[test]
    fn new_rejects_bounded_top_bracket() {
        let mut brackets = all_schedules();
        brackets[1].max_income = Some(dec!(50000));

        let result = TaxYearTables::new(config(2024), brackets, states());

        assert_eq!(
            result,
            Err(TaxTableError::BoundedTopBracket {
                status: FilingStatus::Single,
                max: dec!(50000),
            })
        );
    }

    #[test]
    fn new_rejects_first_bracket_above_zero() {
        let mut brackets = all_schedules();
        brackets[0].min_income = dec!(100);

        let result = TaxYearTables::new(config(2024), brackets, states());

        assert_eq!(
            result,
            Err(TaxTableError::FirstBracketNotZero {
                status: FilingStatus::Single,
                min: dec!(100),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let mut brackets = all_schedules();
        brackets[0].tax_rate = dec!(10);

        let result = TaxYearTables::new(config(2024), brackets, states());

        assert_eq!(
            result,
            Err(TaxTableError::InvalidBracketRate {
                status: FilingStatus::Single,
                rate: dec!(10),
            })
        );
    }

    #[test]
    fn new_rejects_taxed_no_income_tax_state() {
        let mut rates = states();
        rates[0].rate = dec!(0.01);

        let result = TaxYearTables::new(config(2024), all_schedules(), rates);

        assert_eq!(
            result,
            Err(TaxTableError::NoIncomeTaxStateWithRate {
                state: "Texas".to_string(),
                rate: dec!(0.01),
            })
        );
    }

    #[test]
    fn new_rejects_non_positive_wage_base() {
        let cfg = PayrollTaxConfig {
            ss_wage_base: dec!(0),
            ..config(2024)
        };

        let result = TaxYearTables::new(cfg, all_schedules(), states());

        assert_eq!(result, Err(TaxTableError::InvalidWageBase(dec!(0))));
    }

    #[test]
    fn new_rejects_negative_medicare_threshold() {
        let cfg = PayrollTaxConfig {
            additional_medicare_threshold: dec!(-1),
            ..config(2024)
        };

        let result = TaxYearTables::new(cfg, all_schedules(), states());

        assert_eq!(result, Err(TaxTableError::InvalidMedicareThreshold(dec!(-1))));
    }

    #[test]
    fn new_accepts_zero_medicare_threshold() {
        let cfg = PayrollTaxConfig {
            additional_medicare_threshold: dec!(0),
            ..config(2024)
        };

        assert!(TaxYearTables::new(cfg, all_schedules(), states()).is_ok());
    }

    #[test]
    fn new_rejects_duplicate_state() {
        let mut rates = states();
        rates.push(StateTaxRate {
            state: "Utah".to_string(),
            rate: dec!(0.05),
            has_no_income_tax: false,
        });

        let result = TaxYearTables::new(config(2024), all_schedules(), rates);

        assert_eq!(result, Err(TaxTableError::DuplicateState("Utah".to_string())));
    }

    #[test]
    fn new_rejects_duplicate_state_differing_in_case() {
        let mut rates = states();
        rates.push(StateTaxRate {
            state: " TEXAS ".to_string(),
            rate: dec!(0),
            has_no_income_tax: true,
        });

        let result = TaxYearTables::new(config(2024), all_schedules(), rates);

        assert_eq!(result, Err(TaxTableError::DuplicateState(" TEXAS ".to_string())));
    }

    // =========================================================================
    // state_rate tests
    // =========================================================================

    #[test]
    fn state_rate_ignores_case_and_whitespace() {
        let tables = TaxYearTables::new(config(2024), all_schedules(), states()).unwrap();

        let rate = tables.state_rate("  utah ").map(|r| r.rate);

        assert_eq!(rate, Some(dec!(0.0465)));
    }

    #[test]
    fn state_rate_returns_none_for_unknown_state() {
        let tables = TaxYearTables::new(config(2024), all_schedules(), states()).unwrap();

        assert!(tables.state_rate("Ontario").is_none());
    }

    // =========================================================================
    // TaxTableSet tests
    // =========================================================================

    #[test]
    fn table_set_returns_latest_year() {
        let mut set = TaxTableSet::new();
        set.insert(TaxYearTables::new(config(2025), all_schedules(), states()).unwrap());
        set.insert(TaxYearTables::new(config(2024), all_schedules(), states()).unwrap());

        assert_eq!(set.years(), vec![2024, 2025]);
        assert_eq!(set.latest().map(|t| t.tax_year()), Some(2025));
        assert_eq!(set.get(2024).map(|t| t.tax_year()), Some(2024));
        assert!(set.get(2023).is_none());
    }

    #[test]
    fn table_set_insert_replaces_existing_year() {
        let mut set = TaxTableSet::new();
        let first = set.insert(TaxYearTables::new(config(2024), all_schedules(), states()).unwrap());
        let second = set.insert(TaxYearTables::new(config(2024), all_schedules(), states()).unwrap());

        assert!(first.is_none());
        assert!(second.is_some());
        assert_eq!(set.len(), 1);
    }
}
