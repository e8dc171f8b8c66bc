// src/utils/cache.rs

//! On-disk HTTP response cache.
//!
//! Entries are keyed by the SHA-256 of the request URL. Only successful
//! (200) responses are stored, so a transient failure is retried on the next
//! run instead of being replayed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::storage::LocalStorage;
use crate::utils::http::Response;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    status: u16,
    fetched_at: DateTime<Utc>,
}

/// Response cache stored under one directory.
#[derive(Debug, Clone)]
pub struct HttpCache {
    storage: LocalStorage,
    expire_after: Option<Duration>,
}

impl HttpCache {
    pub fn new(storage: LocalStorage, expire_after_secs: Option<u64>) -> Self {
        Self {
            storage,
            expire_after: expire_after_secs
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(Duration::try_seconds),
        }
    }

    fn key(url: &str) -> String {
        hex::encode(Sha256::digest(url.as_bytes()))
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        match self.expire_after {
            Some(ttl) => Utc::now() - entry.fetched_at < ttl,
            None => true,
        }
    }

    /// Stored response for `url`, unless absent or expired.
    pub fn get(&self, url: &str) -> Result<Option<Response>> {
        let key = Self::key(url);
        let Some(entry) = self.storage.read_json::<CacheEntry>(&format!("{key}.json"))? else {
            return Ok(None);
        };
        if entry.url != url || !self.is_fresh(&entry) {
            return Ok(None);
        }
        let Some(body) = self.storage.read_bytes(&format!("{key}.body"))? else {
            return Ok(None);
        };

        Ok(Some(Response {
            url: entry.url,
            status: entry.status,
            body,
            from_cache: true,
        }))
    }

    /// Store a response. Non-200 responses are ignored.
    pub fn put(&self, url: &str, response: &Response) -> Result<()> {
        if !response.is_success() {
            return Ok(());
        }
        let key = Self::key(url);
        // Body first: a metadata file without its body reads as a miss.
        self.storage.write_bytes(&format!("{key}.body"), &response.body)?;
        self.storage.write_json(
            &format!("{key}.json"),
            &CacheEntry {
                url: url.to_string(),
                status: response.status,
                fetched_at: Utc::now(),
            },
        )?;
        Ok(())
    }

    /// Drop every stored response.
    pub fn clear(&self) -> Result<usize> {
        self.storage.clear()
    }
}
