//! Plain-text rendering of estimates and budget items.
//!
//! All amounts are rounded half-up to cents for display only; the estimate
//! itself stays exact.

use std::fmt::{self, Display, Formatter};

use payroll_core::calculations::common::round_half_up;
use payroll_core::{BudgetItem, PaySpec, PayType, PayrollResult, TaxYearTables};
use rust_decimal::Decimal;

fn money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

/// Per-period and annual breakdown of one estimate.
pub struct PayrollReport<'a> {
    pub spec: &'a PaySpec,
    pub result: &'a PayrollResult,
}

impl PayrollReport<'_> {
    fn row(
        f: &mut Formatter<'_>,
        label: &str,
        period: Decimal,
        annual: Decimal,
    ) -> fmt::Result {
        writeln!(f, "  {label:<24}{:>14}{:>14}", money(period), money(annual))
    }
}

impl Display for PayrollReport<'_> {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        let spec = self.spec;
        let r = self.result;

        let state = if spec.work_state.is_empty() {
            "(none)"
        } else {
            spec.work_state.as_str()
        };
        writeln!(
            f,
            "Tax year {} | {} | {} | {} | {}",
            r.tax_year,
            spec.pay_type.label(),
            r.pay_frequency.label(),
            spec.filing_status.label(),
            state
        )?;
        writeln!(f, "  {:<24}{:>14}{:>14}", "", "Per period", "Annual")?;

        Self::row(f, "Gross pay", r.period_gross_pay, r.annual_gross_pay)?;
        if let (PayType::Hourly, Some(hourly)) = (spec.pay_type, &r.hourly_breakdown) {
            Self::row(f, "  Regular", hourly.regular_pay_period, hourly.regular_pay_annual)?;
            Self::row(f, "  Overtime", hourly.overtime_pay_period, hourly.overtime_pay_annual)?;
        }
        Self::row(
            f,
            "Pre-tax deductions",
            r.total_pre_tax_deductions_period,
            r.total_pre_tax_deductions_annual,
        )?;
        Self::row(f, "Federal income tax", r.federal_tax_period, r.federal_tax_annual)?;
        Self::row(f, "Social Security", r.social_security_period, r.social_security_annual)?;
        Self::row(f, "Medicare", r.medicare_period, r.medicare_annual)?;
        Self::row(f, "State income tax", r.state_tax_period, r.state_tax_annual)?;
        Self::row(f, "Net pay", r.net_pay_period, r.net_pay_annual)?;

        writeln!(f, "  Taxable income (annual): {}", money(r.taxable_income_annual))?;
        writeln!(
            f,
            "  Effective federal rate:  {}%",
            money(r.effective_federal_rate_percent)
        )?;
        writeln!(
            f,
            "  Effective total rate:    {}%",
            money(r.effective_total_rate_percent)
        )?;
        if !r.state_recognized {
            writeln!(
                f,
                "  note: state '{state}' not recognised; default rate {} applied",
                r.state_tax_rate
            )?;
        }
        Ok(())
    }
}

/// One line per batch row.
pub fn summary_line(
    label: &str,
    result: &PayrollResult,
) -> String {
    let mut line = format!(
        "{label:<20} gross {:>12}  taxes {:>12}  net {:>12}  ({}%)",
        money(result.period_gross_pay),
        money(result.total_taxes_period()),
        money(result.net_pay_period),
        money(result.effective_total_rate_percent),
    );
    if !result.state_recognized {
        line.push_str("  [default state rate]");
    }
    line
}

pub fn states_table(tables: &TaxYearTables) -> String {
    let mut out = format!("State income tax rates, {}\n", tables.tax_year());
    for rate in tables.state_rates() {
        let note = if rate.has_no_income_tax {
            "  no income tax"
        } else {
            ""
        };
        out.push_str(&format!("  {:<16}{:>8}{note}\n", rate.state, rate.rate));
    }
    out.push_str(&format!(
        "  {:<16}{:>8}\n",
        "(other)",
        tables.config().default_state_rate
    ));
    out
}

pub fn budget_table(items: &[BudgetItem]) -> String {
    if items.is_empty() {
        return "No budget items.\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "{:>5}  {:<28}{:>12}  {:<8}{}\n",
            item.id,
            item.name,
            money(item.amount),
            item.item_type.as_str(),
            if item.recurring { "monthly" } else { "" },
        ));
    }
    out
}
