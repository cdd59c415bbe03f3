//! Export command
//!
//! Usage: govlens export (--domain <D> | --file <F>) [--search <S>] [--category <C>] --output <FILE>

use clap::Args;
use govlens_core::export::export_json;
use govlens_core::query;
use std::path::PathBuf;

use super::{FilterArgs, SourceArgs};

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output file path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute export command
pub fn execute(args: ExportArgs) -> anyhow::Result<()> {
    let store = args.source.load()?;
    let criteria = args.filter.criteria()?;

    let result = query(&store, &criteria);
    let json = export_json(result.matched.iter().copied(), store.schema())?;

    std::fs::write(&args.output, json)?;
    println!(
        "✓ Exported {} of {} records to {}",
        result.matched_count,
        result.total_count,
        args.output.display()
    );

    Ok(())
}
