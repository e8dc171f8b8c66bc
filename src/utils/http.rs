// src/utils/http.rs

//! HTTP session and page fetching.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::storage::LocalStorage;
use crate::utils::cache::HttpCache;
use crate::utils::html::Document;

/// A fetched response with its body fully read.
#[derive(Debug, Clone)]
pub struct Response {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
    pub from_cache: bool,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8, the encoding the documentation site serves.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Source of HTTP responses.
///
/// Transport problems are errors; a non-200 answer is still a `Response`.
pub trait Session {
    fn get(&self, url: &str) -> Result<Response>;
}

/// Create a configured blocking HTTP client.
pub fn create_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.http.user_agent)
        .timeout(Duration::from_secs(config.http.timeout_secs))
        .build()?;
    Ok(client)
}

/// Blocking session that serves repeated URLs from an on-disk cache.
pub struct CachedSession {
    client: Client,
    cache: Option<HttpCache>,
}

impl CachedSession {
    pub fn new(config: &Config) -> Result<Self> {
        let cache = config.cache.enabled.then(|| {
            HttpCache::new(
                LocalStorage::new(&config.cache.dir),
                config.cache.expire_after_secs,
            )
        });
        Ok(Self {
            client: create_client(config)?,
            cache,
        })
    }

    /// Remove every cached response.
    pub fn clear_cache(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            let removed = cache.clear()?;
            log::info!("Cleared {} cached files", removed);
        }
        Ok(())
    }

    fn cached(&self, url: &str) -> Option<Response> {
        let cache = self.cache.as_ref()?;
        match cache.get(url) {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry for {}: {}", url, e);
                None
            }
        }
    }
}

impl Session for CachedSession {
    fn get(&self, url: &str) -> Result<Response> {
        if let Some(hit) = self.cached(url) {
            return Ok(hit);
        }

        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let fetched = Response {
            url: response.url().to_string(),
            status: response.status().as_u16(),
            body: response.bytes()?.to_vec(),
            from_cache: false,
        };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(url, &fetched) {
                log::warn!("Failed to cache {}: {}", url, e);
            }
        }
        Ok(fetched)
    }
}

/// GET `url` and keep the response only if it is a 200.
///
/// Failures are logged and turned into `None`: a missing page shrinks the
/// result, it never aborts the run.
pub fn get_response(session: &dyn Session, url: &str) -> Option<Response> {
    let outcome = session.get(url).and_then(|response| {
        if response.is_success() {
            Ok(response)
        } else {
            Err(AppError::Status {
                url: url.to_string(),
                status: response.status,
            })
        }
    });

    match outcome {
        Ok(response) => {
            if response.from_cache {
                log::debug!("Cache hit: {}", url);
            }
            Some(response)
        }
        Err(e) => {
            log::error!("Failed to load page {}: {}", url, e);
            None
        }
    }
}

/// Fetch a page and parse it as HTML.
///
/// The document carries the URL the response came from, so relative links
/// resolve against the final location after redirects.
pub fn fetch_page(session: &dyn Session, url: &str) -> Option<Document> {
    get_response(session, url)
        .map(|response| Document::parse(response.url.as_str(), &response.text()))
}

/// Fetch raw bytes, e.g. an archive.
pub fn fetch_bytes(session: &dyn Session, url: &str) -> Option<Vec<u8>> {
    get_response(session, url).map(|response| response.body)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::utils::html::{locate, text};

    struct Scripted {
        status: u16,
        fail: bool,
        calls: RefCell<usize>,
    }

    impl Session for Scripted {
        fn get(&self, url: &str) -> Result<Response> {
            *self.calls.borrow_mut() += 1;
            if self.fail {
                return Err(AppError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "refused",
                )));
            }
            Ok(Response {
                url: url.to_string(),
                status: self.status,
                body: b"<html><body><h1>Hi</h1></body></html>".to_vec(),
                from_cache: false,
            })
        }
    }

    fn scripted(status: u16, fail: bool) -> Scripted {
        Scripted {
            status,
            fail,
            calls: RefCell::new(0),
        }
    }

    #[test]
    fn test_fetch_page_success() {
        let session = scripted(200, false);
        let doc = fetch_page(&session, "https://x.test/").unwrap();
        assert_eq!(doc.url(), "https://x.test/");
        assert_eq!(*session.calls.borrow(), 1);
    }

    #[test]
    fn test_non_200_becomes_none() {
        assert!(fetch_page(&scripted(404, false), "https://x.test/").is_none());
        assert!(fetch_bytes(&scripted(500, false), "https://x.test/").is_none());
    }

    #[test]
    fn test_transport_error_becomes_none() {
        assert!(fetch_page(&scripted(200, true), "https://x.test/").is_none());
    }

    #[test]
    fn test_cached_response_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cache.dir = dir.path().to_path_buf();

        // Nothing listens on the discard port, so only the cache can answer.
        let url = "http://127.0.0.1:9/unreachable";
        HttpCache::new(LocalStorage::new(dir.path()), None)
            .put(
                url,
                &Response {
                    url: url.to_string(),
                    status: 200,
                    body: b"<html><body><h1>Cached</h1></body></html>".to_vec(),
                    from_cache: false,
                },
            )
            .unwrap();

        let session = CachedSession::new(&config).unwrap();
        let hit = session.get(url).unwrap();
        assert!(hit.from_cache);
        assert_eq!(hit.url, url);

        let doc = fetch_page(&session, url).unwrap();
        assert_eq!(doc.url(), url);
        assert_eq!(text(locate(doc.root(), "h1", None).unwrap()), "Cached");
    }

    #[test]
    fn test_uncached_url_goes_to_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.cache.dir = dir.path().to_path_buf();
        config.http.timeout_secs = 2;

        let session = CachedSession::new(&config).unwrap();
        assert!(fetch_page(&session, "http://127.0.0.1:9/unreachable").is_none());
    }

    #[test]
    fn test_disabled_cache_session_builds() {
        let mut config = Config::default();
        config.cache.enabled = false;
        let session = CachedSession::new(&config).unwrap();
        assert!(session.cache.is_none());
        assert!(session.clear_cache().is_ok());
    }
}
