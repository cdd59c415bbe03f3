//! GovLens Dataset - loading record stores from YAML or JSON files
//!
//! Provides:
//! - Dataset Format v0 schema
//! - Parsers for YAML and JSON with version validation
//! - Conversion of raw values into typed records by declared field kind

pub mod errors;
pub mod format_v0;
pub mod parser;

// Re-export key types
pub use errors::Result;
pub use format_v0::{DatasetV0, SchemaSection};
pub use parser::{load_dataset_file, parse_dataset_json, parse_dataset_str};
