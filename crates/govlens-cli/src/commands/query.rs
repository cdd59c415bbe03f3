//! Query command
//!
//! Usage: govlens query (--domain <D> | --file <F>) [--search <S>] [--category <C>]
//!        [--range <R> [--reference <TS>]] [--format table|json]

use clap::{Args, ValueEnum};
use govlens_core::view::showing_caption;
use govlens_core::{query, QueryResult, Record, Schema};

use super::{noun_for, FilterArgs, SourceArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Execute query command
pub fn execute(args: QueryArgs) -> anyhow::Result<()> {
    let store = args.source.load()?;
    let criteria = args.filter.criteria()?;

    let result = query(&store, &criteria);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => print_table(&result, store.schema()),
    }

    Ok(())
}

fn print_table(result: &QueryResult<'_>, schema: &Schema) {
    println!("{}", showing_caption(result, noun_for(schema.domain())));

    for record in &result.matched {
        println!("  {}", row(record, schema));
    }

    if !result.buckets.is_empty() {
        println!();
        println!("Categories:");
        for bucket in &result.buckets {
            println!("  {} ({})", bucket.category_value, bucket.count);
        }
    }
}

/// Identifier, searchable fields and category on one line
fn row(record: &Record, schema: &Schema) -> String {
    let mut cells = vec![record.text_of(schema.id_field()).into_owned()];
    cells.extend(
        schema
            .searchable()
            .iter()
            .map(|field| record.text_of(field).into_owned()),
    );
    cells.push(format!("[{}]", record.text_of(schema.category_field())));
    cells.join(" | ")
}
