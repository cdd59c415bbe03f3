//! Subcommands and the argument groups they share

pub mod analyze;
pub mod export;
pub mod query;
pub mod summary;

use clap::Args;
use govlens_core::filter::{parse_reference, TimeRange, TimeWindow};
use govlens_core::fixtures::Domain;
use govlens_core::view::Tab;
use govlens_core::{FilterCriteria, RecordStore};
use std::path::PathBuf;

/// Where the records come from: a built-in domain or a dataset file
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Built-in dataset (audit, policy, bias, models)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Dataset file (.yaml, .yml or .json)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn load(&self) -> anyhow::Result<RecordStore> {
        let store = match (&self.domain, &self.file) {
            (Some(domain), _) => domain.parse::<Domain>()?.store()?,
            (None, Some(path)) => govlens_dataset::load_dataset_file(path)?,
            (None, None) => anyhow::bail!("either --domain or --file is required"),
        };
        tracing::debug!(
            domain = store.schema().domain(),
            record_count = store.len(),
            "dataset ready"
        );
        Ok(store)
    }
}

/// Filter controls mirroring the dashboard search box and dropdowns
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive substring over the searchable fields
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category value to keep, or "all"
    #[arg(short, long, default_value = "all")]
    pub category: String,

    /// Time range ending at the reference instant (1d, 7d, 30d, 90d)
    #[arg(short, long)]
    pub range: Option<String>,

    /// Reference instant for --range, "YYYY-MM-DD HH:MM:SS" (default: now)
    #[arg(long, requires = "range")]
    pub reference: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> anyhow::Result<FilterCriteria> {
        let criteria = FilterCriteria::new(self.search.as_str(), self.category.as_str());
        let Some(range) = &self.range else {
            return Ok(criteria);
        };

        let range: TimeRange = range.parse()?;
        let reference = match &self.reference {
            Some(value) => parse_reference(value)?,
            None => chrono::Local::now().naive_local(),
        };
        Ok(criteria.with_window(TimeWindow::new(range, reference)))
    }
}

/// Plural noun for a domain's records in captions
pub fn noun_for(domain: &str) -> &'static str {
    [Tab::AuditTrail, Tab::PolicyEngine, Tab::BiasDetection]
        .into_iter()
        .find(|tab| tab.domain().is_some_and(|d| d.as_str() == domain))
        .map_or("records", |tab| tab.noun())
}
