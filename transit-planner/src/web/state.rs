//! Application state for the web layer.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::cache::{CacheConfig, QueryCache};
use crate::planner::PlannerConfig;
use crate::timetable::TimetableIndex;

/// Shared application state.
///
/// The index is read-only, so every request shares it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Timetable index loaded at startup
    pub index: Arc<TimetableIndex>,

    /// Date that request times default to
    pub service_date: NaiveDate,

    /// Journey planner configuration
    pub config: Arc<PlannerConfig>,

    /// Memoized query outcomes
    pub cache: QueryCache,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        index: TimetableIndex,
        service_date: NaiveDate,
        config: PlannerConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            index: Arc::new(index),
            service_date,
            config: Arc::new(config),
            cache: QueryCache::new(cache_config),
        }
    }
}
