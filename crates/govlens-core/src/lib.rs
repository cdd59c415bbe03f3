//! GovLens Core - record query engine for governance datasets
//!
//! This crate provides:
//! - Typed records and per-domain schemas
//! - An immutable record store validated once at construction
//! - A predicate filter (free text, category, optional time window)
//! - Categorical aggregation in first-seen order
//! - The query facade combining both into one stateless call
//! - Bias analysis as a request/outcome pair, view state and JSON export
//! - Built-in sample datasets for the audit, policy, bias and model views

pub mod aggregate;
pub mod analysis;
pub mod errors;
pub mod export;
pub mod filter;
pub mod fixtures;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod store;
pub mod view;

// Macros refer to the schema constants through this path
pub use govlens_core_types;

// Re-export commonly used types
pub use aggregate::{aggregate, aggregate_by, aggregate_with_declared, AggregateBucket};
pub use errors::{ExError, ExErrorKind, GovLensError, Result};
pub use filter::{matches, CategorySelector, FilterCriteria, TimeRange, TimeWindow};
pub use model::{FieldKind, FieldValue, Record, Schema};
pub use query::{query, query_with_context, QueryFacade, QueryResult};
pub use store::RecordStore;
