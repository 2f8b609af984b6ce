//! Decimal helpers shared by the payroll calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with exact midpoints moving away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(3567.245)), dec!(3567.25));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn divide_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// `part` as a percentage of `whole`, or zero when `whole` is zero.
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    divide_or_zero(part, whole) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_half_up_rounds_midpoint_up() {
        assert_eq!(round_half_up(dec!(10.125)), dec!(10.13));
    }

    #[test]
    fn round_half_up_rounds_below_midpoint_down() {
        assert_eq!(round_half_up(dec!(10.124)), dec!(10.12));
    }

    #[test]
    fn round_half_up_keeps_negative_sign() {
        assert_eq!(round_half_up(dec!(-10.125)), dec!(-10.13));
    }

    #[test]
    fn divide_or_zero_divides() {
        assert_eq!(divide_or_zero(dec!(52000), dec!(26)), dec!(2000));
    }

    #[test]
    fn divide_or_zero_guards_zero_denominator() {
        assert_eq!(divide_or_zero(dec!(100), dec!(0)), dec!(0));
    }

    #[test]
    fn percent_of_computes_percentage() {
        assert_eq!(percent_of(dec!(8253), dec!(60000)), dec!(13.755));
    }

    #[test]
    fn percent_of_zero_whole_is_zero() {
        assert_eq!(percent_of(dec!(500), dec!(0)), dec!(0));
    }
}
