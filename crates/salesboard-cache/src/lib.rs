//! TTL cache for the dataset snapshot, with two interchangeable backends.
//!
//! The backend is chosen once at construction from configuration: a
//! networked Redis store when an address is configured (shared across
//! processes, survives restarts within the TTL), otherwise an in-process
//! map (survives only for process lifetime). Both backends store the value
//! as JSON, so callers observe identical logical content regardless of
//! which one is active.
//!
//! Callers treat read errors as a cache miss — the pipeline falls through
//! to a fresh fetch rather than failing a cycle on a cache problem.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors from either cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// A get/set-with-expiry cache over one of two backends.
pub enum SnapshotCache {
    Memory(MemoryCache),
    Redis(RedisCache),
}

impl SnapshotCache {
    /// Selects the backend from configuration: `Some(url)` connects to
    /// Redis, `None` uses the in-process map.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Redis`] if the Redis connection cannot be
    /// established.
    pub async fn from_config(redis_url: Option<&str>) -> Result<Self, CacheError> {
        match redis_url {
            Some(url) => Ok(Self::Redis(RedisCache::connect(url).await?)),
            None => Ok(Self::Memory(MemoryCache::new())),
        }
    }

    /// An in-process cache, independent of configuration. Used directly in
    /// tests and by the CLI.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::Memory(MemoryCache::new())
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }

    /// Looks up `key`, returning `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on a backend read failure or if the stored
    /// payload does not deserialize into `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let payload = match self {
            Self::Memory(backend) => backend.get_raw(key).await,
            Self::Redis(backend) => backend.get_raw(key).await?,
        };
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key` for `ttl_secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if serialization or the backend write fails.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let payload = serde_json::to_string(value)?;
        match self {
            Self::Memory(backend) => {
                backend.set_raw(key, payload, ttl_secs).await;
                Ok(())
            }
            Self::Redis(backend) => backend.set_raw(key, payload, ttl_secs).await,
        }
    }
}

struct MemoryEntry {
    expires_at: Instant,
    payload: String,
}

/// Process-local backend: a mutex-guarded map of JSON payloads with
/// per-entry deadlines. Expired entries are dropped lazily on read.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set_raw(&self, key: &str, payload: String, ttl_secs: u64) {
        let entry = MemoryEntry {
            expires_at: Instant::now() + Duration::from_secs(ttl_secs),
            payload,
        };
        self.entries.lock().await.insert(key.to_string(), entry);
    }
}

/// Networked backend over Redis. Expiry is delegated to the server via
/// `SET .. EX`, so the TTL contract matches the in-process backend.
pub struct RedisCache {
    manager: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis at `url` and establishes a managed connection.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Redis`] if the URL is invalid or the initial
    /// connection fails.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let manager = redis::aio::ConnectionManager::new(client).await?;
        tracing::info!("connected to redis cache backend");
        Ok(Self { manager })
    }

    async fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn.get(key).await?;
        Ok(payload)
    }

    async fn set_raw(&self, key: &str, payload: String, ttl_secs: u64) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let () = conn.set_ex(key, payload, ttl_secs).await?;
        Ok(())
    }
}
