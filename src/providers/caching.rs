use crate::core::cache::TtlCache;
use crate::core::currency::{ExchangeRate, RateProvider};
use crate::core::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// TTL caching wrapper around any `RateProvider`.
///
/// Concurrent misses for one pair collapse into a single upstream fetch:
/// the first caller fetches under that pair's gate while the others wait on
/// it and read the freshly cached value. Fresh hits never touch a gate.
pub struct CachingRateProvider<T: RateProvider> {
    inner: T,
    cache: TtlCache<String, ExchangeRate>,
    gates: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<T: RateProvider> CachingRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
            gates: Mutex::new(HashMap::new()),
        }
    }

    async fn pair_gate(&self, key: &str) -> Arc<Mutex<()>> {
        let mut gates = self.gates.lock().await;
        gates.entry(key.to_string()).or_default().clone()
    }
}

#[async_trait]
impl<T: RateProvider> RateProvider for CachingRateProvider<T> {
    async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        let key = format!("{from}-{to}");
        if let Some(rate) = self.cache.get(&key).await {
            debug!("Cache hit for currency rate: {}", key);
            return Ok(rate);
        }

        let gate = self.pair_gate(&key).await;
        let _fetching = gate.lock().await;

        // Another caller may have finished the fetch while we waited
        if let Some(rate) = self.cache.get(&key).await {
            debug!("Rate for {} fetched by a concurrent caller", key);
            return Ok(rate);
        }

        debug!("Cache miss for currency rate: {}", key);
        let rate = self.inner.get_rate(from, to).await?;
        self.cache.put(key, rate.clone()).await;
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockInnerProvider {
        call_count: AtomicUsize,
        delay: Duration,
    }

    impl MockInnerProvider {
        fn new(delay: Duration) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                delay,
            }
        }
    }

    #[async_trait]
    impl<'a> RateProvider for &'a MockInnerProvider {
        async fn get_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(ExchangeRate {
                from: from.to_string(),
                to: to.to_string(),
                rate: 5.43,
                fetched_at: Utc::now(),
            })
        }
    }

    #[tokio::test]
    async fn test_fresh_entry_served_from_cache() {
        let inner = MockInnerProvider::new(Duration::ZERO);
        let caching = CachingRateProvider::new(&inner, Duration::from_secs(60));

        // First call hits upstream
        let first = caching.get_rate("USD", "BRL").await.unwrap();
        assert_eq!(first.rate, 5.43);
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);

        // Second call within the TTL is served from cache
        let second = caching.get_rate("USD", "BRL").await.unwrap();
        assert_eq!(second.fetched_at, first.fetched_at);
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);

        // A different pair is a separate entry
        let _ = caching.get_rate("EUR", "BRL").await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let inner = MockInnerProvider::new(Duration::ZERO);
        let caching = CachingRateProvider::new(&inner, Duration::ZERO);

        let _ = caching.get_rate("USD", "BRL").await.unwrap();
        let _ = caching.get_rate("USD", "BRL").await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_collapse_into_one_fetch() {
        let inner = MockInnerProvider::new(Duration::from_millis(50));
        let caching = CachingRateProvider::new(&inner, Duration::from_secs(60));

        let (a, b, c) = tokio::join!(
            caching.get_rate("USD", "BRL"),
            caching.get_rate("USD", "BRL"),
            caching.get_rate("USD", "BRL"),
        );

        // All callers got the single in-flight fetch's result
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);
        let a = a.unwrap();
        assert_eq!(b.unwrap().fetched_at, a.fetched_at);
        assert_eq!(c.unwrap().fetched_at, a.fetched_at);
    }

    #[tokio::test]
    async fn test_distinct_pairs_fetch_independently() {
        let inner = MockInnerProvider::new(Duration::from_millis(20));
        let caching = CachingRateProvider::new(&inner, Duration::from_secs(60));

        let (a, b) = tokio::join!(
            caching.get_rate("USD", "BRL"),
            caching.get_rate("EUR", "BRL"),
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
    }
}
