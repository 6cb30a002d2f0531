use async_trait::async_trait;
use common::{GeoPoint, TrafficSample};
use moka::future::Cache;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

use super::TrafficProvider;
use crate::error::Result;

/// Coordinate rounded to five decimal places (about 1 m).
pub type CoordinateKey = (i64, i64);

/// A traffic provider wrapper that memoizes successful lookups.
///
/// Failed lookups are never cached.
pub struct CachedTrafficProvider<P> {
    inner: P,
    cache: Cache<CoordinateKey, TrafficSample>,
}

impl<P: TrafficProvider> CachedTrafficProvider<P> {
    /// Creates a new cached provider holding at most `max_capacity` samples
    /// for `ttl` each.
    pub fn new(inner: P, max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    /// Creates a new cached provider with default settings.
    ///
    /// Default settings:
    /// - Cache size: 1000 entries
    /// - TTL: 30 seconds
    pub fn with_defaults(inner: P) -> Self {
        Self::new(inner, 1000, Duration::from_secs(30))
    }

    pub fn cache_key(point: GeoPoint) -> CoordinateKey {
        (
            (point.lat * 1e5).round() as i64,
            (point.lon * 1e5).round() as i64,
        )
    }
}

impl<P: fmt::Debug> fmt::Debug for CachedTrafficProvider<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedTrafficProvider")
            .field("inner", &self.inner)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl<P: TrafficProvider> TrafficProvider for CachedTrafficProvider<P> {
    async fn lookup(&self, point: GeoPoint) -> Result<TrafficSample> {
        let key = Self::cache_key(point);

        if let Some(sample) = self.cache.get(&key).await {
            debug!("Traffic cache hit for {:?}", key);
            return Ok(sample);
        }

        trace!("Traffic cache miss for {:?}", key);
        let sample = self.inner.lookup(point).await?;
        self.cache.insert(key, sample).await;

        Ok(sample)
    }
}
