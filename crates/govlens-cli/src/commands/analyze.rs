//! Analyze command
//!
//! Usage: govlens analyze --model <ID> [--threshold <T>] [--attributes <A,B>]

use clap::Args;
use govlens_core::analysis::{
    analyze, AnalysisOutcome, AnalysisReport, AnalysisRequest, ProtectedAttribute,
    DEFAULT_THRESHOLD,
};
use govlens_core::fixtures::{metric_samples, model_catalog};

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Catalogued model ID (model-1, model-2, model-3)
    #[arg(short, long)]
    pub model: String,

    /// Pass threshold in [0, 1]
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Protected attributes, comma separated (default: gender,race,age)
    #[arg(short, long, value_delimiter = ',')]
    pub attributes: Vec<String>,
}

/// Execute analyze command
pub fn execute(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut request = AnalysisRequest::new(args.model).with_threshold(args.threshold);
    if !args.attributes.is_empty() {
        let attributes = args
            .attributes
            .iter()
            .map(|name| name.parse::<ProtectedAttribute>())
            .collect::<Result<Vec<_>, _>>()?;
        request = request.with_attributes(attributes);
    }

    let catalog = model_catalog()?;
    match analyze(&catalog, &metric_samples(), &request)? {
        AnalysisOutcome::Completed(report) => {
            print_report(&report);
            Ok(())
        }
        AnalysisOutcome::Failed { model_id, reason } => {
            anyhow::bail!("analysis of {} failed: {}", model_id, reason)
        }
    }
}

fn print_report(report: &AnalysisReport) {
    let attributes: Vec<&str> = report
        .protected_attributes
        .iter()
        .map(ProtectedAttribute::as_str)
        .collect();

    println!("{} ({})", report.model_name, report.model_id);
    println!("Protected attributes: {}", attributes.join(", "));
    println!("Threshold: {:.2}", report.threshold);
    println!("Overall score: {:.3}", report.overall_score);
    println!();

    for metric in report.metrics.all_records() {
        println!(
            "  {:<20} {:>5} {}",
            metric.text_of("name"),
            metric.text_of("value"),
            metric.text_of("status")
        );
    }

    if report.recommendations.is_empty() {
        println!();
        println!("✓ All metrics meet the threshold");
    } else {
        println!();
        println!("Recommendations:");
        for recommendation in &report.recommendations {
            println!("  - {}", recommendation);
        }
    }
}
