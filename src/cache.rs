use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use lru::LruCache;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::CalendarError;
use crate::metrics::Metrics;
use crate::month_grid::{build_month_grid, MonthGrid};

type GridKey = (i32, u32, NaiveDate);

/// LRU of built month grids, keyed by year, month and the `today` they were built for.
pub struct GridCache {
    cache: RwLock<LruCache<GridKey, Arc<MonthGrid>>>,
    metrics: Arc<Metrics>,
}

impl GridCache {
    pub fn new(capacity: NonZeroUsize, metrics: Arc<Metrics>) -> Self {
        info!(target: "grid_cache", "Grid cache ready with capacity {}", capacity);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Cached grid for the key, building and storing it on a miss.
    ///
    /// Lookups use `peek` under the read lock, so hits do not refresh recency.
    pub fn grid(&self, year: i32, month: u32, today: NaiveDate) -> Result<Arc<MonthGrid>, CalendarError> {
        let key = (year, month, today);
        if let Some(grid) = self.cache.read().peek(&key) {
            self.metrics.record_cache_hit();
            return Ok(Arc::clone(grid));
        }
        self.metrics.record_cache_miss();

        let started = Instant::now();
        let grid = Arc::new(build_month_grid(year, month, today)?);
        let duration = started.elapsed();
        self.metrics.record_calculation(duration);

        debug!(
            target: "grid_cache",
            "Cached {}-{:02} grid after {}µs",
            year,
            month,
            duration.as_micros()
        );

        self.cache.write().put(key, Arc::clone(&grid));
        Ok(grid)
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn cache_with(capacity: usize) -> GridCache {
        GridCache::new(NonZeroUsize::new(capacity).unwrap(), Arc::new(Metrics::new()))
    }

    #[test]
    fn second_lookup_hits() {
        let cache = cache_with(4);
        let today = ymd(2024, 2, 15);
        let first = cache.grid(2024, 2, today).unwrap();
        let second = cache.grid(2024, 2, today).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.metrics().cache_hits(), 1);
        assert_eq!(cache.metrics().cache_misses(), 1);
        assert_eq!(cache.metrics().grids_built(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_today_is_a_different_entry() {
        let cache = cache_with(4);
        let a = cache.grid(2024, 2, ymd(2024, 2, 15)).unwrap();
        let b = cache.grid(2024, 2, ymd(2024, 2, 16)).unwrap();
        assert_eq!(a.today().map(|c| c.date), Some(ymd(2024, 2, 15)));
        assert_eq!(b.today().map(|c| c.date), Some(ymd(2024, 2, 16)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_inserted() {
        let cache = cache_with(2);
        let today = ymd(2024, 1, 1);
        cache.grid(2024, 1, today).unwrap();
        cache.grid(2024, 2, today).unwrap();
        cache.grid(2024, 3, today).unwrap();
        assert_eq!(cache.len(), 2);

        // January was evicted, so this is a miss
        cache.grid(2024, 1, today).unwrap();
        assert_eq!(cache.metrics().cache_misses(), 4);
        assert_eq!(cache.metrics().cache_hits(), 0);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = cache_with(2);
        let today = ymd(2024, 1, 1);
        assert_eq!(
            cache.grid(2024, 13, today).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
        assert!(cache.is_empty());
        assert_eq!(cache.metrics().grids_built(), 0);
    }

    #[test]
    fn clear_empties() {
        let cache = cache_with(2);
        cache.grid(2024, 1, ymd(2024, 1, 1)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
