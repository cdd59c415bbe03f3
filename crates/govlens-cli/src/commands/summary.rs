//! Summary command
//!
//! Usage: govlens summary (--domain <D> | --file <F>) [--field <NAME> | --declared] [--sum <NAME>]

use clap::Args;
use govlens_core::aggregate::{aggregate_by, aggregate_with_declared, bucket_total, sum_by};

use super::SourceArgs;

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Field to group by (default: the schema's category field)
    #[arg(long, conflicts_with = "declared")]
    pub field: Option<String>,

    /// Also list declared category values with no records
    #[arg(long)]
    pub declared: bool,

    /// Numeric field to total across all records
    #[arg(long)]
    pub sum: Option<String>,
}

/// Execute summary command
pub fn execute(args: SummaryArgs) -> anyhow::Result<()> {
    let store = args.source.load()?;
    let schema = store.schema();
    let records = store.all_records();

    let field = args
        .field
        .as_deref()
        .unwrap_or_else(|| schema.category_field());
    if !schema.declares(field) {
        anyhow::bail!(
            "field '{}' is not declared by the {} schema",
            field,
            schema.domain()
        );
    }

    let buckets = if args.declared {
        aggregate_with_declared(records, schema)
    } else {
        aggregate_by(records, field)
    };
    let total = bucket_total(&buckets);

    println!("{} by {}", schema.domain(), field);
    for bucket in &buckets {
        println!(
            "  {}: {} ({:.1}%)",
            bucket.category_value,
            bucket.count,
            bucket.percentage_of(total)
        );
    }
    println!("Total: {}", total);

    if let Some(sum_field) = &args.sum {
        println!("Sum of {}: {}", sum_field, sum_by(records, sum_field));
    }

    Ok(())
}
