//! GovLens CLI
//!
//! Command-line interface for querying governance datasets

use clap::{Parser, Subcommand};
use govlens_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "govlens")]
#[command(about = "GovLens - query AI governance datasets", long_about = None)]
struct Cli {
    /// Log output format on stderr (pretty or json)
    #[arg(long, global = true, default_value = "pretty")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Filter a dataset and show matches with category counts
    Query(commands::query::QueryArgs),
    /// Category counts and percentages for a whole dataset
    Summary(commands::summary::SummaryArgs),
    /// Grade a catalogued model's fairness metrics
    Analyze(commands::analyze::AnalyzeArgs),
    /// Write matched records to a JSON file
    Export(commands::export::ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_format);

    let result = match cli.command {
        Commands::Query(args) => commands::query::execute(args),
        Commands::Summary(args) => commands::summary::execute(args),
        Commands::Analyze(args) => commands::analyze::execute(args),
        Commands::Export(args) => commands::export::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
