use std::path::Path;

use anyhow::{Context, Result, anyhow};
use payroll_core::db::RepositoryRegistry;
use payroll_core::{
    BudgetRepository, IncomeBasis, PayForm, PaySpec, PayrollEstimator, PayrollResult,
    TaxTableSet, TaxYearTables, monthly_income,
};
use payroll_data::{TaxTableLoader, builtin_tables};
use payroll_db_sqlite::SqliteRepositoryFactory;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::csv_loader::BatchRow;

/// Registry with every budget store backend this binary ships with.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

/// Tables from `dir` when given, otherwise the embedded tables.
pub fn load_tables(dir: Option<&Path>) -> Result<TaxTableSet> {
    match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "loading tax tables from directory");
            TaxTableLoader::load_dir(dir)
                .with_context(|| format!("failed to load tax tables from '{}'", dir.display()))
        }
        None => builtin_tables().context("embedded tax tables are invalid"),
    }
}

/// The requested year, or the latest year available.
pub fn select_year(
    set: &TaxTableSet,
    year: Option<i32>,
) -> Result<&TaxYearTables> {
    match year {
        Some(year) => set
            .get(year)
            .ok_or_else(|| anyhow!("no tax tables for {year}; available: {:?}", set.years())),
        None => set.latest().ok_or_else(|| anyhow!("no tax tables loaded")),
    }
}

/// Coerce a raw form and run the estimate.
pub fn estimate(
    tables: &TaxYearTables,
    form: &PayForm,
) -> (PaySpec, PayrollResult) {
    let spec = form.to_pay_spec();
    let result = PayrollEstimator::new(tables).compute_gross_pay(&spec);
    (spec, result)
}

pub fn estimate_batch(
    tables: &TaxYearTables,
    rows: &[BatchRow],
) -> Vec<(String, PayrollResult)> {
    let estimator = PayrollEstimator::new(tables);
    rows.iter()
        .map(|row| {
            let result = estimator.compute_gross_pay(&row.form.to_pay_spec());
            (row.label.clone(), result)
        })
        .collect()
}

/// Store the estimate's monthly income as a recurring budget item.
///
/// Returns the new item's id and the monthly amount recorded.
pub async fn record_income(
    repo: &dyn BudgetRepository,
    name: &str,
    result: &PayrollResult,
    basis: IncomeBasis,
) -> Result<(i64, Decimal)> {
    let amount = monthly_income(result, basis);
    let id = repo
        .record_recurring_income(name, amount)
        .await
        .with_context(|| format!("failed to record '{name}' in the budget"))?;
    info!(id, name, %amount, basis = basis.as_str(), "recorded monthly income");
    Ok((id, amount))
}
