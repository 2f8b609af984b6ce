//! 2024 reference tables shared by the calculation tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{FilingStatus, PayrollTaxConfig, StateTaxRate, TaxBracket, TaxYearTables};

fn rates() -> [Decimal; 7] {
    [
        dec!(0.10),
        dec!(0.12),
        dec!(0.22),
        dec!(0.24),
        dec!(0.32),
        dec!(0.35),
        dec!(0.37),
    ]
}

fn schedule(
    status: FilingStatus,
    bounds: [Decimal; 6],
) -> Vec<TaxBracket> {
    let mut min = Decimal::ZERO;
    let mut brackets = Vec::new();
    for (idx, rate) in rates().into_iter().enumerate() {
        let max = bounds.get(idx).copied();
        brackets.push(TaxBracket {
            filing_status: status,
            min_income: min,
            max_income: max,
            tax_rate: rate,
        });
        if let Some(max) = max {
            min = max;
        }
    }
    brackets
}

pub fn brackets_2024() -> Vec<TaxBracket> {
    let mut brackets = schedule(
        FilingStatus::Single,
        [dec!(11600), dec!(47150), dec!(100525), dec!(191950), dec!(243725), dec!(609350)],
    );
    brackets.extend(schedule(
        FilingStatus::Married,
        [dec!(23200), dec!(94300), dec!(201050), dec!(383900), dec!(487450), dec!(731200)],
    ));
    brackets.extend(schedule(
        FilingStatus::Head,
        [dec!(16550), dec!(63100), dec!(100500), dec!(191950), dec!(243700), dec!(609350)],
    ));
    brackets
}

fn state(
    name: &str,
    rate: Decimal,
) -> StateTaxRate {
    StateTaxRate {
        state: name.to_string(),
        rate,
        has_no_income_tax: rate.is_zero(),
    }
}

pub fn tables_2024() -> TaxYearTables {
    TaxYearTables::new(
        PayrollTaxConfig::for_2024(),
        brackets_2024(),
        vec![
            state("California", dec!(0.0725)),
            state("Florida", dec!(0)),
            state("New York", dec!(0.0685)),
            state("Texas", dec!(0)),
            state("Washington", dec!(0)),
        ],
    )
    .expect("2024 fixture tables are valid")
}
