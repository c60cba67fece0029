use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache for computed match responses
///
/// Values are stored as serialized JSON with a fixed time-to-live. Profile
/// writes call `invalidate_all`, since any change can shift another user's
/// ranking. Every invalidation bumps a generation counter; writers capture
/// the generation before reading from the store and `set` refuses values
/// computed under an older generation.
pub struct CacheManager {
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    generation: AtomicU64,
    ttl_secs: u64,
}

impl CacheManager {
    pub fn new(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            l1_cache,
            generation: AtomicU64::new(0),
            ttl_secs,
        }
    }

    /// Current invalidation generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.l1_cache.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Store a value computed while `generation` was current
    ///
    /// Returns `false` without keeping the value when an invalidation
    /// happened since `generation` was read.
    pub async fn set<T>(&self, key: &str, value: &T, generation: u64) -> Result<bool, CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;

        if self.generation() != generation {
            tracing::debug!("Skipping stale cache write: {}", key);
            return Ok(false);
        }

        self.l1_cache.insert(key.to_string(), bytes).await;

        // an invalidation may have landed between the check and the insert
        if self.generation() != generation {
            self.l1_cache.invalidate(key).await;
            tracing::debug!("Dropped stale cache write: {}", key);
            return Ok(false);
        }

        tracing::trace!("Cache set: {} (ttl {}s)", key, self.ttl_secs);
        Ok(true)
    }

    /// Drop every cached entry
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.l1_cache.invalidate_all();
        tracing::debug!("Invalidated all cached matches");
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for ranked matches of a user at a given limit
    pub fn matches(user_id: &Uuid, limit: usize) -> String {
        format!("matches:{}:{}", user_id, limit)
    }
}
