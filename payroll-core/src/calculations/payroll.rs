//! Gross-to-net payroll estimation.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annualization multiplier `M` from the pay frequency |
//! | 2    | Annual gross: salary × `M`, or hourly weekly pay × 52 |
//! | 3    | Annual pre-tax deductions: per-period deductions × `M` |
//! | 4    | Taxable income: gross minus deductions, minimum 0 |
//! | 5    | Federal tax over the progressive brackets for the filing status |
//! | 6    | Social Security on gross, capped at the wage base |
//! | 7    | Medicare on gross, plus the additional surtax above the threshold |
//! | 8    | State tax: taxable income × flat state rate |
//! | 9    | Net pay and per-period figures (annual ÷ `M`) |
//! | 10   | Effective federal and total rates as a percentage of gross |
//!
//! Hourly pay is always annualized over 52 weeks. The pay frequency only
//! decides how that annual figure is split into periods.
//!
//! # Degraded Inputs
//!
//! The estimator never fails. Inputs beyond [`PaySpec::MAX_AMOUNT`] or
//! [`PaySpec::MAX_WEEKLY_HOURS`] are clamped first, which keeps every step
//! inside `Decimal` range. A work state missing from the rate table is
//! taxed at [`crate::PayrollTaxConfig::default_state_rate`], and a filing
//! status without a bracket schedule owes no federal tax. Both cases emit a
//! `warn` event, as does clamping.
//!
//! # Example
//!
//! ```
//! use payroll_core::{
//!     FilingStatus, PayFrequency, PaySpec, PayrollEstimator, PayrollTaxConfig, StateTaxRate,
//!     TaxBracket, TaxYearTables,
//! };
//! use rust_decimal_macros::dec;
//!
//! let brackets = FilingStatus::all()
//!     .iter()
//!     .map(|status| TaxBracket {
//!         filing_status: *status,
//!         min_income: dec!(0),
//!         max_income: None,
//!         tax_rate: dec!(0.10),
//!     })
//!     .collect();
//! let states = vec![StateTaxRate {
//!     state: "Texas".to_string(),
//!     rate: dec!(0),
//!     has_no_income_tax: true,
//! }];
//! let tables = TaxYearTables::new(PayrollTaxConfig::for_2024(), brackets, states).unwrap();
//!
//! let spec = PaySpec::salary(dec!(5000), PayFrequency::Monthly, FilingStatus::Single, "Texas");
//! let result = PayrollEstimator::new(&tables).compute_gross_pay(&spec);
//!
//! assert_eq!(result.annual_gross_pay, dec!(60000));
//! assert_eq!(result.federal_tax_annual, dec!(6000));
//! assert_eq!(result.state_tax_annual, dec!(0));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{divide_or_zero, percent_of};
use crate::{FilingStatus, HourlyBreakdown, PaySpec, PayType, PayrollResult, TaxYearTables};

const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(52, 0, 0, false, 0);

/// Annual gross pay before any splitting into periods.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GrossPay {
    annual: Decimal,
    period: Decimal,
    hourly: Option<HourlyBreakdown>,
}

/// Payroll estimator bound to one year of reference tables.
///
/// The estimator holds no state beyond the borrowed tables, so a single
/// instance can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct PayrollEstimator<'a> {
    tables: &'a TaxYearTables,
}

impl<'a> PayrollEstimator<'a> {
    pub fn new(tables: &'a TaxYearTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a TaxYearTables {
        self.tables
    }

    /// Computes the full gross-to-net estimate for `spec`.
    pub fn compute_gross_pay(
        &self,
        spec: &PaySpec,
    ) -> PayrollResult {
        let bounded = spec.bounded();
        if bounded != *spec {
            warn!(
                max_amount = %PaySpec::MAX_AMOUNT,
                max_weekly_hours = %PaySpec::MAX_WEEKLY_HOURS,
                "pay inputs out of range; clamped before estimating"
            );
        }
        let spec = &bounded;

        let multiplier = spec.pay_frequency.multiplier();
        let per_period = |annual: Decimal| divide_or_zero(annual, multiplier);

        let gross = self.gross_pay(spec, multiplier);
        let deductions = self.annual_pre_tax_deductions(spec, multiplier);
        let taxable_income = self.taxable_income(gross.annual, deductions);

        let federal_tax = self.federal_tax(taxable_income, spec.filing_status);
        let social_security = self.social_security_tax(gross.annual);
        let medicare = self.medicare_tax(gross.annual);
        let (state_rate, state_recognized) = self.state_rate(&spec.work_state);
        let state_tax = taxable_income * state_rate;

        let total_taxes = federal_tax + social_security + medicare + state_tax;
        let net_pay = gross.annual - deductions - total_taxes;

        debug!(
            tax_year = self.tables.tax_year(),
            annual_gross = %gross.annual,
            taxable_income = %taxable_income,
            federal_tax = %federal_tax,
            state = %spec.work_state,
            net_pay = %net_pay,
            "computed payroll estimate"
        );

        PayrollResult {
            tax_year: self.tables.tax_year(),
            pay_frequency: spec.pay_frequency,
            period_gross_pay: gross.period,
            annual_gross_pay: gross.annual,
            hourly_breakdown: gross.hourly,
            total_pre_tax_deductions_period: per_period(deductions),
            total_pre_tax_deductions_annual: deductions,
            taxable_income_annual: taxable_income,
            federal_tax_period: per_period(federal_tax),
            federal_tax_annual: federal_tax,
            social_security_period: per_period(social_security),
            social_security_annual: social_security,
            medicare_period: per_period(medicare),
            medicare_annual: medicare,
            state_tax_period: per_period(state_tax),
            state_tax_annual: state_tax,
            state_tax_rate: state_rate,
            state_recognized,
            net_pay_period: per_period(net_pay),
            net_pay_annual: net_pay,
            effective_federal_rate_percent: percent_of(federal_tax, gross.annual),
            effective_total_rate_percent: percent_of(total_taxes + deductions, gross.annual),
        }
    }

    /// Progressive federal income tax on `taxable_income`.
    pub fn federal_tax(
        &self,
        taxable_income: Decimal,
        filing_status: FilingStatus,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        let mut matched_any = false;
        for bracket in self.tables.brackets_for(filing_status) {
            matched_any = true;
            tax += bracket.taxable_portion(taxable_income) * bracket.tax_rate;
            match bracket.max_income {
                Some(max) if taxable_income > max => continue,
                _ => break,
            }
        }

        if !matched_any {
            warn!(
                filing_status = filing_status.as_str(),
                tax_year = self.tables.tax_year(),
                "no federal brackets for filing status; federal tax treated as zero"
            );
        }
        tax
    }

    /// Employee Social Security tax, capped at the wage base.
    pub fn social_security_tax(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        let config = self.tables.config();
        annual_gross.min(config.ss_wage_base) * config.ss_tax_rate
    }

    /// Employee Medicare tax including the additional surtax.
    ///
    /// The surtax threshold is compared against gross pay and is the same
    /// for every filing status.
    pub fn medicare_tax(
        &self,
        annual_gross: Decimal,
    ) -> Decimal {
        let config = self.tables.config();
        let base = annual_gross * config.medicare_tax_rate;
        if annual_gross > config.additional_medicare_threshold {
            base + (annual_gross - config.additional_medicare_threshold)
                * config.additional_medicare_rate
        } else {
            base
        }
    }

    /// Flat state rate for `state`, and whether the state was found.
    pub fn state_rate(
        &self,
        state: &str,
    ) -> (Decimal, bool) {
        match self.tables.state_rate(state) {
            Some(rate) => (rate.rate, true),
            None => {
                let default_rate = self.tables.config().default_state_rate;
                warn!(
                    state = %state,
                    default_rate = %default_rate,
                    "work state not in rate table; applying default rate"
                );
                (default_rate, false)
            }
        }
    }

    fn gross_pay(
        &self,
        spec: &PaySpec,
        multiplier: Decimal,
    ) -> GrossPay {
        match spec.pay_type {
            PayType::Salary => GrossPay {
                annual: spec.gross_amount * multiplier,
                period: spec.gross_amount,
                hourly: None,
            },
            PayType::Hourly => {
                let overtime_rate = spec.overtime_rate.unwrap_or_else(|| {
                    spec.hourly_rate
                        .saturating_mul(self.tables.config().overtime_multiplier)
                        .clamp(-PaySpec::MAX_AMOUNT, PaySpec::MAX_AMOUNT)
                });
                let regular_annual =
                    spec.hourly_rate * spec.regular_hours_per_week * WEEKS_PER_YEAR;
                let overtime_annual =
                    overtime_rate * spec.overtime_hours_per_week * WEEKS_PER_YEAR;
                let annual = regular_annual + overtime_annual;

                GrossPay {
                    annual,
                    period: divide_or_zero(annual, multiplier),
                    hourly: Some(HourlyBreakdown {
                        regular_pay_annual: regular_annual,
                        overtime_pay_annual: overtime_annual,
                        regular_pay_period: divide_or_zero(regular_annual, multiplier),
                        overtime_pay_period: divide_or_zero(overtime_annual, multiplier),
                    }),
                }
            }
        }
    }

    fn annual_pre_tax_deductions(
        &self,
        spec: &PaySpec,
        multiplier: Decimal,
    ) -> Decimal {
        (spec.pre_tax_401k + spec.health_insurance_premium + spec.other_pre_tax_deductions)
            * multiplier
    }

    fn taxable_income(
        &self,
        annual_gross: Decimal,
        annual_deductions: Decimal,
    ) -> Decimal {
        (annual_gross - annual_deductions).max(Decimal::ZERO)
    }
}
