//! Caching layer for query outcomes.
//!
//! Planning is deterministic for a fixed index, so an outcome keyed by
//! (origin, destination, deadline) stays valid for the index's lifetime. The
//! TTL only bounds memory held by stale popular queries.
//!
//! Errors are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{StopIdx, TransitTime};
use crate::planner::{Planner, Query, QueryError, QueryOutcome};

/// Cache key: (origin, destination, deadline).
type QueryKey = (StopIdx, StopIdx, TransitTime);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 10_000,
        }
    }
}

/// Memoized query outcomes for one timetable index.
#[derive(Clone)]
pub struct QueryCache {
    outcomes: MokaCache<QueryKey, Arc<QueryOutcome>>,
}

impl QueryCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let outcomes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { outcomes }
    }

    fn key(query: &Query) -> QueryKey {
        (query.origin, query.destination, query.arrive_by)
    }

    /// Get a cached outcome.
    pub async fn get(&self, query: &Query) -> Option<Arc<QueryOutcome>> {
        self.outcomes.get(&Self::key(query)).await
    }

    /// Insert an outcome into the cache.
    pub async fn insert(&self, query: &Query, outcome: Arc<QueryOutcome>) {
        self.outcomes.insert(Self::key(query), outcome).await;
    }

    /// Answer `query`, using the cache if available.
    pub async fn plan(
        &self,
        planner: &Planner<'_>,
        query: &Query,
    ) -> Result<Arc<QueryOutcome>, QueryError> {
        if let Some(cached) = self.get(query).await {
            trace!(
                origin = %query.origin,
                destination = %query.destination,
                arrive_by = %query.arrive_by,
                "query cache hit"
            );
            return Ok(cached);
        }

        let outcome = Arc::new(planner.plan(query)?);
        self.insert(query, outcome.clone()).await;

        Ok(outcome)
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.outcomes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.outcomes.invalidate_all();
    }
}
