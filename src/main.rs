mod cmd;
mod core;
mod store;

use clap::{Parser, Subcommand};
use cmd::{
    add::AddCommand, list::ListCommand, schema::SchemaCommand, summary::SummaryCommand,
    years::YearsCommand,
};
use std::path::PathBuf;

/// Record and review self-employment income by UK tax year (6 April to 5 April).
#[derive(Parser, Debug)]
#[command(name = "incometrack", version, about)]
struct Cli {
    /// CSV file holding the income records (Amount, Date, Source)
    #[arg(
        short,
        long,
        global = true,
        env = "INCOME_FILE",
        default_value = "income_total.csv"
    )]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show income records for a tax year with the running total
    List(ListCommand),
    /// Show the totals for a tax year
    Summary(SummaryCommand),
    /// List the tax years available in the income file
    Years(YearsCommand),
    /// Add an income entry and save the file
    Add(AddCommand),
    /// Print the expected input format
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::List(list) => list.exec(&cli.file),
        Command::Summary(summary) => summary.exec(&cli.file),
        Command::Years(years) => years.exec(&cli.file),
        Command::Add(add) => add.exec(&cli.file),
        Command::Schema(schema) => schema.exec(),
    }
}
