//! Core types shared across GovLens crates
//!
//! This crate provides foundational types used by the query engine
//! and its structured logging:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical log field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
