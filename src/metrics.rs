use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// Performance Metrics
#[derive(Debug, Default)]
pub struct Metrics {
    calculation_time: AtomicU64,
    grids_built: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_calculation(&self, duration: Duration) {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.calculation_time.fetch_add(micros, Ordering::Relaxed);
        self.grids_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn grids_built(&self) -> u64 {
        self.grids_built.load(Ordering::Relaxed)
    }

    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits() as f64;
        let total = hits + self.cache_misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }

    pub fn report(&self) -> String {
        format!(
            "Performance Metrics:\n\
             Grids Built: {}\n\
             Calculation Time: {}µs\n\
             Cache Hits: {}\n\
             Cache Misses: {}\n\
             Cache Hit Rate: {:.2}%",
            self.grids_built(),
            self.calculation_time.load(Ordering::Relaxed),
            self.cache_hits(),
            self.cache_misses(),
            self.cache_hit_rate() * 100.0
        )
    }
}
