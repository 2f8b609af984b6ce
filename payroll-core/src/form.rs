//! Coercion of raw pay-form text into a typed [`PaySpec`].
//!
//! Form fields arrive as free text. Blank or unparseable numbers become zero
//! and unrecognised choices fall back to their defaults, so the estimator
//! itself only ever sees well-typed decimals.
//!
//! | Field             | Blank / invalid value becomes |
//! |-------------------|-------------------------------|
//! | numeric amounts   | `0`                           |
//! | beyond ±10^15     | `0`                           |
//! | `regular_hours`   | `40`                          |
//! | `overtime_rate`   | unset (multiple of hourly)    |
//! | `pay_type`        | salary                        |
//! | `pay_frequency`   | bi-weekly                     |
//! | `filing_status`   | single                        |

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{FilingStatus, PayFrequency, PaySpec, PayType};

/// Currency symbols, thousands separators and embedded whitespace.
static NUMBER_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s$,]").expect("static pattern compiles"));

/// Parses a form number, treating blank or malformed input as zero.
///
/// Values whose magnitude exceeds [`PaySpec::MAX_AMOUNT`] count as malformed.
///
/// ```
/// use payroll_core::parse_form_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_form_number("$1,250.50"), dec!(1250.50));
/// assert_eq!(parse_form_number(""), dec!(0));
/// assert_eq!(parse_form_number("abc"), dec!(0));
/// assert_eq!(parse_form_number("1e28"), dec!(0));
/// ```
pub fn parse_form_number(input: &str) -> Decimal {
    let cleaned = NUMBER_NOISE.replace_all(input, "");
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
        .filter(|value| value.abs() <= PaySpec::MAX_AMOUNT)
        .unwrap_or(Decimal::ZERO)
}

/// Parses an optional form number. Blank, malformed and non-positive input
/// all mean "not provided".
pub fn parse_optional_form_number(input: &str) -> Option<Decimal> {
    let value = parse_form_number(input);
    (value > Decimal::ZERO).then_some(value)
}

/// Raw pay-form fields as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayForm {
    pub pay_type: String,
    pub gross_amount: String,
    pub pay_frequency: String,
    pub hourly_rate: String,
    pub regular_hours: String,
    pub overtime_hours: String,
    pub overtime_rate: String,
    pub filing_status: String,
    pub work_state: String,
    pub pre_tax_401k: String,
    pub health_insurance: String,
    pub other_pre_tax: String,
}

impl PayForm {
    pub fn to_pay_spec(&self) -> PaySpec {
        let regular_hours = if self.regular_hours.trim().is_empty() {
            PaySpec::DEFAULT_REGULAR_HOURS
        } else {
            parse_form_number(&self.regular_hours)
        };

        PaySpec {
            pay_type: PayType::parse(&self.pay_type).unwrap_or_default(),
            gross_amount: parse_form_number(&self.gross_amount),
            pay_frequency: PayFrequency::parse(&self.pay_frequency).unwrap_or_default(),
            hourly_rate: parse_form_number(&self.hourly_rate),
            regular_hours_per_week: regular_hours,
            overtime_hours_per_week: parse_form_number(&self.overtime_hours),
            overtime_rate: parse_optional_form_number(&self.overtime_rate),
            filing_status: FilingStatus::parse(&self.filing_status).unwrap_or_default(),
            work_state: self.work_state.trim().to_string(),
            pre_tax_401k: parse_form_number(&self.pre_tax_401k),
            health_insurance_premium: parse_form_number(&self.health_insurance),
            other_pre_tax_deductions: parse_form_number(&self.other_pre_tax),
        }
    }
}
