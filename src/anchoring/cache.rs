//! Bounded caches in front of a block explorer

use std::collections::HashMap;
use std::hash::Hash;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::anchoring::bitcoin::BlockExplorer;
use crate::anchoring::error::AnchorError;
use crate::anchoring::types::BlockHeader;

/// Default number of entries kept per cache
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Small least-recently-used map
///
/// Recency is tracked in an access-ordered list; the front is evicted first.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: HashMap<K, V>,
    lru_order: Vec<K>,
}

impl<K: Eq + Hash + Clone, V: Clone> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            lru_order: Vec::with_capacity(capacity),
        }
    }

    /// Look up `key`, marking it most recently used
    pub fn get(&mut self, key: &K) -> Option<V> {
        let value = self.entries.get(key).cloned()?;
        self.touch(key.clone());
        Some(value)
    }

    /// Insert or replace `key`, evicting the oldest entry when full
    pub fn put(&mut self, key: K, value: V) {
        self.entries.insert(key.clone(), value);
        self.touch(key);
        self.evict_lru();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: K) {
        self.lru_order.retain(|k| k != &key);
        self.lru_order.push(key);
    }

    fn evict_lru(&mut self) {
        while self.entries.len() > self.capacity && !self.lru_order.is_empty() {
            let oldest = self.lru_order.remove(0);
            self.entries.remove(&oldest);
        }
    }
}

/// Explorer wrapper caching height→hash and hash→header lookups
pub struct CachedExplorer<E> {
    inner: E,
    hashes: Mutex<LruCache<u64, String>>,
    headers: Mutex<LruCache<String, BlockHeader>>,
}

impl<E: BlockExplorer> CachedExplorer<E> {
    /// Wrap `inner` with caches of `capacity` entries each
    #[must_use]
    pub fn new(inner: E, capacity: usize) -> Self {
        Self {
            inner,
            hashes: Mutex::new(LruCache::new(capacity)),
            headers: Mutex::new(LruCache::new(capacity)),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: BlockExplorer> BlockExplorer for CachedExplorer<E> {
    async fn block_hash(&self, height: u64) -> Result<String, AnchorError> {
        let cached = self.hashes.lock().get(&height);
        if let Some(hash) = cached {
            tracing::debug!(height = height, "Block hash cache hit");
            return Ok(hash);
        }

        let hash = self.inner.block_hash(height).await?;
        self.hashes.lock().put(height, hash.clone());
        Ok(hash)
    }

    async fn block_header(&self, hash: &str) -> Result<BlockHeader, AnchorError> {
        let cached = self.headers.lock().get(&hash.to_string());
        if let Some(header) = cached {
            tracing::debug!(block_hash = %hash, "Block header cache hit");
            return Ok(header);
        }

        let header = self.inner.block_header(hash).await?;
        self.headers.lock().put(hash.to_string(), header.clone());
        Ok(header)
    }
}
