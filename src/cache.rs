//! Persistent cache backed by fjall
//!
//! Values are postcard-encoded together with an absolute expiry stamp.
//! Forecast snapshots and geocoding results live here so repeated lookups
//! for the same place stay off the network inside their TTL window. Expired
//! entries are evicted lazily on read.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use rand::RngExt;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_CACHE: OnceCell<ForecastCache> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    value: T,
    // Unix timestamp in seconds
    expires_at: u64,
}

pub struct ForecastCache {
    store: Keyspace,
}

fn read_raw(store: Keyspace, key: Vec<u8>) -> anyhow::Result<Option<Vec<u8>>> {
    Ok(store.get(key)?.map(|v| v.to_vec()))
}

impl ForecastCache {
    fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("cache", fjall::KeyspaceCreateOptions::default)?;
        Ok(ForecastCache { store })
    }

    /// Store a serializable value with a time-to-live.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let expires_at = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = CacheEntry { value, expires_at };
        let bytes = postcard::to_stdvec(&entry)?;

        let _ = task::spawn_blocking(move || store.insert(key, bytes)).await?;
        Ok(())
    }

    /// Retrieve a value if present and not expired; `None` on a miss or an
    /// expired entry (which is evicted on the way out).
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || read_raw(store, key_bytes)).await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("cache miss");
            return Ok(None);
        };

        let entry: CacheEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        if now < entry.expires_at {
            tracing::debug!("cache hit");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("cache entry expired, evicting");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Drop a key regardless of its TTL.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        let _ = task::spawn_blocking(move || store.remove(key)).await?;
        Ok(())
    }
}

/// Open the global persistent cache. **Must be called once before use.**
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = ForecastCache::open(path)?;
    GLOBAL_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

/// Whether [`init`] has been called. Callers degrade to uncached fetches
/// when it hasn't.
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL_CACHE.get().is_some()
}

/// # Panics
/// Panics if [`init`] has not been called; gate call sites on
/// [`is_initialized`].
fn get_cache() -> &'static ForecastCache {
    GLOBAL_CACHE
        .get()
        .expect("Cache not initialized. Call cache::init() first.")
}

/// Jitter a TTL by ±10% so entries written together don't expire together.
#[must_use]
pub fn jittered(ttl: Duration) -> Duration {
    let factor: f64 = rand::rng().random_range(0.9..1.1);
    Duration::from_secs_f64(ttl.as_secs_f64() * factor)
}

// Ergonomic wrappers over the global cache.
pub async fn put<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    get_cache().put(key, value, ttl).await
}

pub async fn get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    get_cache().get(key).await
}

pub async fn remove(key: &str) -> Result<()> {
    get_cache().remove(key).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jittered_ttl_stays_within_ten_percent() {
        let base = Duration::from_secs(3600);
        for _ in 0..100 {
            let ttl = jittered(base);
            assert!(ttl >= Duration::from_secs(3240));
            assert!(ttl <= Duration::from_secs(3960));
        }
    }

    #[tokio::test]
    async fn entries_round_trip_and_expire() {
        let dir = std::env::temp_dir().join(format!("skycast-cache-unit-{}", std::process::id()));
        let cache = ForecastCache::open(&dir).unwrap();

        cache
            .put("answer", 42u64, Duration::from_secs(600))
            .await
            .unwrap();
        assert_eq!(cache.get::<u64>("answer").await.unwrap(), Some(42));

        // Zero TTL expires immediately and is evicted on read.
        cache.put("gone", 7u64, Duration::from_secs(0)).await.unwrap();
        assert_eq!(cache.get::<u64>("gone").await.unwrap(), None);
    }
}
