use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use payroll_core::{FilingStatus, TaxTableSet};
use payroll_data::{TaxTableLoader, builtin_tables};

/// Validate payroll reference tables and print a summary per tax year.
///
/// The directory must contain:
/// - federal_brackets.csv: tax_year, filing_status, min_income, max_income, rate
/// - state_rates.csv: tax_year, state, rate, has_no_income_tax
/// - tax_year_config.csv: one row of payroll constants per tax year
#[derive(Parser, Debug)]
#[command(name = "payroll-tables")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the table CSV files; the embedded tables are checked when omitted
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Also list every state rate
    #[arg(short, long, default_value_t = false)]
    states: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let set = match &args.dir {
        Some(dir) => {
            println!("Loading tables from: {}", dir.display());
            TaxTableLoader::load_dir(dir)
                .with_context(|| format!("Failed to load tables from: {}", dir.display()))?
        }
        None => {
            println!("Checking embedded tables");
            builtin_tables().context("Embedded tables are invalid")?
        }
    };

    print_summary(&set, args.states);
    Ok(())
}

fn print_summary(
    set: &TaxTableSet,
    with_states: bool,
) {
    for year in set.years() {
        let Some(tables) = set.get(year) else {
            continue;
        };
        let config = tables.config();
        println!("Tax year {year}");
        println!(
            "  Social Security: {} up to {}",
            config.ss_tax_rate, config.ss_wage_base
        );
        println!(
            "  Medicare: {} (+{} above {})",
            config.medicare_tax_rate,
            config.additional_medicare_rate,
            config.additional_medicare_threshold
        );
        for status in FilingStatus::all() {
            println!(
                "  {:<24} {} brackets",
                status.label(),
                tables.brackets_for(*status).count()
            );
        }
        let rates: Vec<_> = tables.state_rates().collect();
        let untaxed = rates.iter().filter(|r| r.has_no_income_tax).count();
        println!("  States: {} ({} without income tax)", rates.len(), untaxed);
        if with_states {
            for rate in rates {
                println!("    {:<16} {}", rate.state, rate.rate);
            }
        }
    }
    println!("Tables are valid.");
}
