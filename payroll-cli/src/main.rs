use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use payroll_cli::cli::{BudgetCommand, Cli, Command};
use payroll_cli::config::PaycalcConfig;
use payroll_cli::report::{self, PayrollReport};
use payroll_cli::{app, csv_loader, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => PaycalcConfig::load(path)?,
        None => PaycalcConfig::default(),
    };
    let config = cli.apply_overrides(file_config);

    logging::init_logging(&config.logging.level, config.logging.file.as_deref())?;
    debug!(?config, "resolved configuration");

    let tables = app::load_tables(config.tables_dir.as_deref())?;
    let year = app::select_year(&tables, config.tax_year)?;
    debug!(tax_year = year.tax_year(), "using tax tables");

    match cli.command {
        Command::Calculate(args) => {
            let (spec, result) = app::estimate(year, &args.form.to_form());
            print!("{}", PayrollReport { spec: &spec, result: &result });

            if let Some(name) = args.record.as_deref() {
                let repo = app::build_registry().create(&config.database).await?;
                let (id, amount) =
                    app::record_income(&*repo, name, &result, config.budget.basis).await?;
                println!(
                    "Recorded '{name}' as budget item {id}: {amount} per month ({} pay)",
                    config.budget.basis.as_str()
                );
            }
        }
        Command::Batch { file } => {
            let rows = csv_loader::load_from_file(&file)
                .with_context(|| format!("failed to load batch file '{}'", file.display()))?;
            if rows.is_empty() {
                warn!(file = %file.display(), "batch file has no rows");
            }
            for (label, result) in app::estimate_batch(year, &rows) {
                println!("{}", report::summary_line(&label, &result));
            }
            info!(rows = rows.len(), "batch complete");
        }
        Command::States => {
            print!("{}", report::states_table(year));
        }
        Command::Budget(command) => {
            let repo = app::build_registry().create(&config.database).await?;
            match command {
                BudgetCommand::List => {
                    let items = repo.list_budget_items().await?;
                    print!("{}", report::budget_table(&items));
                }
                BudgetCommand::Delete { id } => {
                    repo.delete_budget_item(id)
                        .await
                        .with_context(|| format!("failed to delete budget item {id}"))?;
                    info!(id, "deleted budget item");
                }
            }
        }
    }

    Ok(())
}
