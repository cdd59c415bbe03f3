//! Query facade
//!
//! The single entry point combining filtering and aggregation for one request.
//! A query never mutates the store and keeps no state between calls, so a
//! host can re-run it on every keystroke and simply keep the latest result.

use govlens_core_types::{RequestContext, TraceId};
use serde::Serialize;
use std::time::Instant;

use crate::aggregate::{aggregate, AggregateBucket};
use crate::filter::{FilterCriteria, PreparedFilter};
use crate::model::Record;
use crate::store::RecordStore;
use crate::{log_op_end, log_op_start};

/// Filtered records plus the aggregate over them
///
/// `matched` borrows from the store and keeps store order. `buckets` are
/// computed over `matched`, not the full store, so summaries track the
/// active filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<'a> {
    pub matched: Vec<&'a Record>,
    pub buckets: Vec<AggregateBucket>,
    pub total_count: usize,
    pub matched_count: usize,
}

impl<'a> QueryResult<'a> {
    /// Result of querying an empty store
    pub fn empty() -> Self {
        Self {
            matched: Vec::new(),
            buckets: Vec::new(),
            total_count: 0,
            matched_count: 0,
        }
    }

    /// Count for one category value, zero if no bucket exists
    pub fn count_for(&self, category_value: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.category_value == category_value)
            .map_or(0, |b| b.count)
    }

    /// Clone the matched records out of the store borrow
    pub fn into_owned_records(self) -> Vec<Record> {
        self.matched.into_iter().cloned().collect()
    }
}

/// Run one query with a fresh request context
pub fn query<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> QueryResult<'a> {
    query_with_context(store, criteria, &RequestContext::new())
}

/// Run one query, tagging its log events with `ctx`
pub fn query_with_context<'a>(
    store: &'a RecordStore,
    criteria: &FilterCriteria,
    ctx: &RequestContext,
) -> QueryResult<'a> {
    let schema = store.schema();
    log_op_start!(
        "query",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_ref().map(TraceId::as_str),
        domain = schema.domain(),
        category = criteria.category.as_str()
    );
    let start = Instant::now();

    let filter = PreparedFilter::new(criteria, schema);
    if filter.ignores_window(criteria) {
        tracing::warn!(
            request_id = %ctx.request_id,
            domain = schema.domain(),
            "time window ignored: schema declares no timestamp field"
        );
    }
    let matched: Vec<&Record> = store
        .all_records()
        .iter()
        .filter(|record| filter.matches(record))
        .collect();
    let buckets = aggregate(matched.iter().copied(), schema);

    let result = QueryResult {
        matched_count: matched.len(),
        total_count: store.len(),
        matched,
        buckets,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    log_op_end!(
        "query",
        duration_ms = elapsed,
        request_id = %ctx.request_id,
        total_count = result.total_count,
        matched_count = result.matched_count,
        bucket_count = result.buckets.len()
    );

    result
}

/// A store bound to its query entry point
///
/// Convenience for hosts that keep one store per view and issue many
/// queries against it.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: RecordStore,
}

impl QueryFacade {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn query(&self, criteria: &FilterCriteria) -> QueryResult<'_> {
        query(&self.store, criteria)
    }

    pub fn query_with_context(
        &self,
        criteria: &FilterCriteria,
        ctx: &RequestContext,
    ) -> QueryResult<'_> {
        query_with_context(&self.store, criteria, ctx)
    }
}
