//! Cache configuration

use std::time::Duration;

/// TTL settings for cached lookups.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use moddash_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_tag_ttl(Duration::from_secs(60));
/// assert_eq!(config.tag_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the per-platform tag vocabulary.
    ///
    /// Default: 10 minutes
    pub tag_ttl: Duration,

    /// TTL for total row counts shown on metrics cards.
    ///
    /// Default: 1 minute
    pub count_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            tag_ttl: Duration::from_secs(600),
            count_ttl: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag_ttl(mut self, ttl: Duration) -> Self {
        self.tag_ttl = ttl;
        self
    }

    pub fn with_count_ttl(mut self, ttl: Duration) -> Self {
        self.count_ttl = ttl;
        self
    }

    /// A config with caching disabled. Concurrent lookups still share one fetch.
    pub fn no_cache() -> Self {
        Self {
            tag_ttl: Duration::ZERO,
            count_ttl: Duration::ZERO,
        }
    }
}
