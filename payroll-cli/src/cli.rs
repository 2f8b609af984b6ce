//! Command-line definition for `paycalc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use payroll_core::{IncomeBasis, PayForm};

use crate::config::PaycalcConfig;

/// Gross-to-net payroll estimator.
///
/// Estimates federal, Social Security, Medicare and state withholding for a
/// salaried or hourly paycheck and can record the resulting monthly income
/// in a budget store.
#[derive(Debug, Parser)]
#[command(name = "paycalc", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of table CSV files to use instead of the embedded tables.
    #[arg(long, global = true)]
    pub tables: Option<PathBuf>,

    /// Tax year to estimate against (defaults to the latest available).
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// Budget store backend.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Budget store connection string.
    /// For SQLite this is a file path (e.g. `budget.db`) or `:memory:`.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Log level or `EnvFilter` directive. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate one paycheck.
    Calculate(CalculateArgs),

    /// Estimate every pay form in a CSV file.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },

    /// List the state income tax table.
    States,

    /// Inspect the budget store.
    #[command(subcommand)]
    Budget(BudgetCommand),
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    List,
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub form: PayFormArgs,

    /// Store the monthly income as a recurring budget item with this name.
    #[arg(long)]
    pub record: Option<String>,

    /// Record monthly gross or net pay.
    #[arg(long, value_parser = parse_basis)]
    pub basis: Option<IncomeBasis>,
}

/// Pay-form fields. Values are taken as typed and coerced the same way the
/// form boundary coerces any other input.
#[derive(Debug, Clone, Default, Args)]
pub struct PayFormArgs {
    /// `salary` or `hourly`.
    #[arg(long, default_value = "")]
    pub pay_type: String,

    /// Gross pay per period (salary).
    #[arg(long = "gross", default_value = "", allow_hyphen_values = true)]
    pub gross_amount: String,

    /// `weekly`, `biweekly`, `semimonthly`, `monthly` or `annual`.
    #[arg(long = "frequency", default_value = "")]
    pub pay_frequency: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub hourly_rate: String,

    /// Regular hours per week (blank means 40).
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub regular_hours: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub overtime_hours: String,

    /// Overtime hourly rate; 1.5x the hourly rate when omitted.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub overtime_rate: String,

    /// `single`, `married` or `head`.
    #[arg(long, default_value = "")]
    pub filing_status: String,

    /// Work state, by full name (e.g. `California`).
    #[arg(long = "state", default_value = "")]
    pub work_state: String,

    #[arg(long = "pre-tax-401k", default_value = "", allow_hyphen_values = true)]
    pub pre_tax_401k: String,

    /// Health insurance premium per period.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub health_insurance: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub other_pre_tax: String,
}

impl PayFormArgs {
    pub fn to_form(&self) -> PayForm {
        PayForm {
            pay_type: self.pay_type.clone(),
            gross_amount: self.gross_amount.clone(),
            pay_frequency: self.pay_frequency.clone(),
            hourly_rate: self.hourly_rate.clone(),
            regular_hours: self.regular_hours.clone(),
            overtime_hours: self.overtime_hours.clone(),
            overtime_rate: self.overtime_rate.clone(),
            filing_status: self.filing_status.clone(),
            work_state: self.work_state.clone(),
            pre_tax_401k: self.pre_tax_401k.clone(),
            health_insurance: self.health_insurance.clone(),
            other_pre_tax: self.other_pre_tax.clone(),
        }
    }
}

fn parse_basis(s: &str) -> Result<IncomeBasis, String> {
    IncomeBasis::parse(s).ok_or_else(|| format!("expected 'gross' or 'net', got '{s}'"))
}

impl Cli {
    /// Layer the command-line flags over a loaded configuration.
    pub fn apply_overrides(
        &self,
        mut config: PaycalcConfig,
    ) -> PaycalcConfig {
        if let Some(year) = self.year {
            config.tax_year = Some(year);
        }
        if let Some(dir) = &self.tables {
            config.tables_dir = Some(dir.clone());
        }
        if let Some(backend) = &self.backend {
            config.database.backend = backend.clone();
        }
        if let Some(db) = &self.db {
            config.database.connection_string = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        if let Command::Calculate(CalculateArgs {
            basis: Some(basis), ..
        }) = &self.command
        {
            config.budget.basis = *basis;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("paycalc").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn calculate_collects_raw_form_fields() {
        let cli = parse(&[
            "calculate",
            "--gross",
            "$5,000",
            "--frequency",
            "monthly",
            "--state",
            "California",
            "--pre-tax-401k",
            "250",
        ]);

        let Command::Calculate(args) = &cli.command else {
            panic!("expected calculate, got {:?}", cli.command);
        };
        let form = args.form.to_form();
        assert_eq!(form.gross_amount, "$5,000");
        assert_eq!(form.pay_frequency, "monthly");
        assert_eq!(form.work_state, "California");
        assert_eq!(form.pre_tax_401k, "250");
        assert_eq!(form.regular_hours, "");
        assert_eq!(args.record, None);
    }

    #[test]
    fn calculate_accepts_record_and_basis() {
        let cli = parse(&["calculate", "--record", "Paycheck", "--basis", "gross"]);

        let Command::Calculate(args) = &cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.record.as_deref(), Some("Paycheck"));
        assert_eq!(args.basis, Some(IncomeBasis::Gross));
    }

    #[test]
    fn numeric_flags_accept_negative_values() {
        let cli = parse(&[
            "calculate",
            "--pay-type",
            "hourly",
            "--hourly-rate",
            "-1",
            "--regular-hours",
            "-2",
            "--overtime-hours",
            "-3",
            "--overtime-rate",
            "-4",
            "--pre-tax-401k",
            "-5",
            "--health-insurance",
            "-6",
            "--other-pre-tax",
            "-7",
        ]);

        let Command::Calculate(args) = &cli.command else {
            panic!("expected calculate");
        };
        let form = args.form.to_form();
        assert_eq!(form.hourly_rate, "-1");
        assert_eq!(form.regular_hours, "-2");
        assert_eq!(form.overtime_hours, "-3");
        assert_eq!(form.overtime_rate, "-4");
        assert_eq!(form.pre_tax_401k, "-5");
        assert_eq!(form.health_insurance, "-6");
        assert_eq!(form.other_pre_tax, "-7");
    }

    #[test]
    fn invalid_basis_is_a_usage_error() {
        let result = Cli::try_parse_from(["paycalc", "calculate", "--basis", "take-home"]);

        assert!(result.is_err());
    }

    #[test]
    fn budget_delete_takes_id() {
        let cli = parse(&["budget", "delete", "7"]);

        assert!(matches!(cli.command, Command::Budget(BudgetCommand::Delete { id: 7 })));
    }

    #[test]
    fn flags_override_config_file() {
        let cli = parse(&[
            "--db",
            ":memory:",
            "--log-level",
            "debug",
            "calculate",
            "--basis",
            "gross",
            "--year",
            "2024",
        ]);
        let from_file = PaycalcConfig::from_toml_str(
            "tax_year = 2023\n[database]\nconnection_string = \"budget.db\"\n[logging]\nfile = \"paycalc.log\"\n",
        )
        .expect("config parses");

        let config = cli.apply_overrides(from_file);

        assert_eq!(config.tax_year, Some(2024));
        assert_eq!(config.database.connection_string, ":memory:");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("paycalc.log")));
        assert_eq!(config.budget.basis, IncomeBasis::Gross);
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let cli = parse(&["states"]);
        let config = PaycalcConfig::default();

        assert_eq!(cli.apply_overrides(config.clone()), config);
    }
}
