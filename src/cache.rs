use chrono::Duration;

/// Shared-cache lifetime advertised on successful responses.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub max_age: Duration,
    pub stale_while_revalidate: Duration,
}

impl CachePolicy {
    pub fn new(cache_minutes: i64) -> Self {
        Self {
            max_age: Duration::minutes(cache_minutes),
            stale_while_revalidate: Duration::minutes(cache_minutes),
        }
    }

    pub fn header_value(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate={}",
            self.max_age.num_seconds().max(0),
            self.stale_while_revalidate.num_seconds().max(0)
        )
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(15)
    }
}
